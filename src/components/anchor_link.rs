use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;

use crate::config;

/// Where to scroll so a section's top clears the fixed header.
pub fn anchor_scroll_top(offset_top: f64) -> f64 {
    (offset_top - config::HEADER_OFFSET).max(0.0)
}

pub fn anchor_href(target: &str) -> String {
    format!("#{}", target)
}

fn scroll_to_section(id: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Some(target) = window
        .document()
        .and_then(|document| document.get_element_by_id(id))
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return false;
    };

    let options = ScrollToOptions::new();
    options.set_top(anchor_scroll_top(target.offset_top() as f64));
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
    true
}

#[derive(Properties, PartialEq)]
pub struct AnchorLinkProps {
    /// Id of the section to scroll to, without the `#`.
    pub target: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    /// Fired after a successful scroll.
    #[prop_or_default]
    pub on_navigate: Option<Callback<()>>,
    #[prop_or_default]
    pub children: Children,
}

/// In-page link that smooth-scrolls its section below the fixed header.
#[function_component(AnchorLink)]
pub fn anchor_link(props: &AnchorLinkProps) -> Html {
    let onclick = {
        let target = props.target.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if scroll_to_section(&target) {
                if let Some(on_navigate) = &on_navigate {
                    on_navigate.emit(());
                }
            }
        })
    };

    html! {
        <a class={props.class.clone()} href={anchor_href(&props.target)} {onclick}>
            { for props.children.iter() }
        </a>
    }
}
