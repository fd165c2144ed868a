use yew::prelude::*;

use super::observer::use_seen_once;
use crate::config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ImageState {
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug, PartialEq)]
struct ImageAttrs<'a> {
    src: Option<&'a str>,
    srcset: Option<&'a str>,
    class: Option<&'static str>,
}

fn image_attrs<'a>(
    state: ImageState,
    src: &'a str,
    srcset: Option<&'a str>,
    fallback: Option<&'a str>,
) -> ImageAttrs<'a> {
    match state {
        ImageState::Pending => ImageAttrs {
            src: None,
            srcset: None,
            class: None,
        },
        ImageState::Loaded => ImageAttrs {
            src: Some(src),
            srcset,
            class: Some("loaded"),
        },
        // srcset would win over the fallback, so it goes too.
        ImageState::Failed => match fallback {
            Some(fallback) => ImageAttrs {
                src: Some(fallback),
                srcset: None,
                class: Some("loaded error"),
            },
            None => ImageAttrs {
                src: Some(src),
                srcset,
                class: Some("loaded error"),
            },
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct LazyImageProps {
    pub src: AttrValue,
    pub alt: AttrValue,
    #[prop_or_default]
    pub srcset: Option<AttrValue>,
    #[prop_or_default]
    pub fallback: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
}

/// An `<img>` that only fetches its source once it nears the viewport.
#[function_component(LazyImage)]
pub fn lazy_image(props: &LazyImageProps) -> Html {
    let node = use_node_ref();
    let near_viewport = use_seen_once(
        node.clone(),
        config::LAZY_IMAGE_THRESHOLD,
        config::LAZY_IMAGE_ROOT_MARGIN,
    );
    let failed = use_state_eq(|| false);

    let onerror = {
        let failed = failed.clone();
        let src = props.src.clone();
        Callback::from(move |_: Event| {
            if !*failed {
                gloo_console::warn!("Failed to load image:", src.to_string());
                failed.set(true);
            }
        })
    };

    let state = if *failed {
        ImageState::Failed
    } else if near_viewport {
        ImageState::Loaded
    } else {
        ImageState::Pending
    };
    let attrs = image_attrs(
        state,
        &props.src,
        props.srcset.as_deref(),
        props.fallback.as_deref(),
    );

    html! {
        <img
            ref={node}
            class={classes!(props.class.clone(), attrs.class)}
            src={attrs.src.map(str::to_string)}
            srcset={attrs.srcset.map(str::to_string)}
            alt={props.alt.clone()}
            {onerror}
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_image_has_no_source() {
        let attrs = image_attrs(ImageState::Pending, "/a.jpg", Some("/a@2x.jpg 2x"), None);
        assert_eq!(attrs.src, None);
        assert_eq!(attrs.srcset, None);
        assert_eq!(attrs.class, None);
    }

    #[test]
    fn loaded_image_gets_both_sources() {
        let attrs = image_attrs(ImageState::Loaded, "/a.jpg", Some("/a@2x.jpg 2x"), Some("/f.jpg"));
        assert_eq!(attrs.src, Some("/a.jpg"));
        assert_eq!(attrs.srcset, Some("/a@2x.jpg 2x"));
        assert_eq!(attrs.class, Some("loaded"));
    }

    #[test]
    fn failed_image_switches_to_fallback() {
        let attrs = image_attrs(ImageState::Failed, "/a.jpg", Some("/a@2x.jpg 2x"), Some("/f.jpg"));
        assert_eq!(attrs.src, Some("/f.jpg"));
        assert_eq!(attrs.srcset, None);
        assert_eq!(attrs.class, Some("loaded error"));
    }

    #[test]
    fn failed_image_without_fallback_keeps_source() {
        let attrs = image_attrs(ImageState::Failed, "/a.jpg", None, None);
        assert_eq!(attrs.src, Some("/a.jpg"));
        assert_eq!(attrs.class, Some("loaded error"));
    }
}
