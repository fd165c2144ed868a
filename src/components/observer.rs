use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Observes `element` until it first intersects, then disconnects and runs `on_visible`.
/// Returns `None` when the browser has no IntersectionObserver.
fn observe_once(
    element: &Element,
    threshold: f64,
    root_margin: &str,
    mut on_visible: impl FnMut() + 'static,
) -> Option<(IntersectionObserver, ObserverCallback)> {
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            let intersecting = entries
                .iter()
                .map(|entry| entry.unchecked_into::<IntersectionObserverEntry>())
                .any(|entry| entry.is_intersecting());
            if intersecting {
                observer.disconnect();
                on_visible();
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    options.set_root_margin(root_margin);

    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            observer.observe(element);
            Some((observer, callback))
        }
        Err(e) => {
            warn!("IntersectionObserver unavailable, showing immediately: {:?}", e);
            drop(callback);
            None
        }
    }
}

/// True once the referenced element has scrolled into view. Never flips back.
#[hook]
pub fn use_seen_once(node: NodeRef, threshold: f64, root_margin: &'static str) -> bool {
    let seen = use_state_eq(|| false);

    {
        let seen = seen.clone();
        use_effect_with_deps(
            move |node: &NodeRef| {
                let observed = match node.cast::<Element>() {
                    Some(element) => {
                        let setter = seen.clone();
                        let observed = observe_once(&element, threshold, root_margin, move || {
                            setter.set(true)
                        });
                        if observed.is_none() {
                            seen.set(true);
                        }
                        observed
                    }
                    None => None,
                };
                move || {
                    if let Some((observer, _callback)) = observed {
                        observer.disconnect();
                    }
                }
            },
            node,
        );
    }

    *seen
}
