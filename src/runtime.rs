use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::js_sys::Reflect;
use web_sys::Document;
use yew::prelude::*;

use crate::config;

fn animation_play_state(hidden: bool) -> &'static str {
    if hidden {
        "paused"
    } else {
        "running"
    }
}

fn document() -> Option<Document> {
    web_sys::window().and_then(|window| window.document())
}

fn sync_animation_play_state(document: &Document) {
    if let Some(body) = document.body() {
        let _ = body
            .style()
            .set_property("animation-play-state", animation_play_state(document.hidden()));
    }
}

/// Pauses body animations while the tab is hidden.
#[hook]
pub fn use_pause_when_hidden() {
    use_effect_with_deps(
        move |_| {
            let listener = document().map(|document| {
                let target = document.clone();
                let callback = Closure::<dyn Fn()>::new(move || sync_animation_play_state(&target));
                let _ = document.add_event_listener_with_callback(
                    "visibilitychange",
                    callback.as_ref().unchecked_ref(),
                );
                (document, callback)
            });
            move || {
                if let Some((document, callback)) = listener {
                    let _ = document.remove_event_listener_with_callback(
                        "visibilitychange",
                        callback.as_ref().unchecked_ref(),
                    );
                }
            }
        },
        (),
    );
}

pub fn preload_fonts() {
    let Some(document) = document() else {
        return;
    };
    let Some(head) = document.head() else {
        return;
    };
    for href in config::PRELOAD_FONTS {
        let Ok(link) = document.create_element("link") else {
            continue;
        };
        let attached = link
            .set_attribute("rel", "preload")
            .and_then(|_| link.set_attribute("as", "style"))
            .and_then(|_| link.set_attribute("href", href))
            .and_then(|_| head.append_child(&link).map(|_| ()));
        if let Err(e) = attached {
            warn!("Failed to preload font {}: {:?}", href, e);
        }
    }
}

/// The window `load` event has already fired once the document is complete.
fn load_already_fired(ready_state: &str) -> bool {
    ready_state == "complete"
}

/// Registers the service worker once the page has finished loading, so it
/// does not compete with the first load for bandwidth.
#[hook]
pub fn use_service_worker_after_load() {
    use_effect_with_deps(
        move |_| {
            let listener = web_sys::window().and_then(|window| {
                let ready_state = window.document()?.ready_state();
                if load_already_fired(&ready_state) {
                    register_service_worker();
                    return None;
                }
                let callback = Closure::once(register_service_worker);
                let _ = window
                    .add_event_listener_with_callback("load", callback.as_ref().unchecked_ref());
                Some((window, callback))
            });
            move || {
                if let Some((window, callback)) = listener {
                    let _ = window.remove_event_listener_with_callback(
                        "load",
                        callback.as_ref().unchecked_ref(),
                    );
                }
            }
        },
        (),
    );
}

fn register_service_worker() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    let supported = Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false);
    if !supported {
        info!("Service workers not supported, skipping registration");
        return;
    }

    let registration = navigator
        .service_worker()
        .register(config::SERVICE_WORKER_PATH);
    spawn_local(async move {
        match JsFuture::from(registration).await {
            Ok(_) => info!("SW registered: {}", config::SERVICE_WORKER_PATH),
            Err(e) => warn!("SW registration failed: {:?}", e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_documents_pause_animations() {
        assert_eq!(animation_play_state(true), "paused");
        assert_eq!(animation_play_state(false), "running");
    }

    #[test]
    fn registration_waits_for_load_until_document_is_complete() {
        assert!(!load_already_fired("loading"));
        assert!(!load_already_fired("interactive"));
        assert!(load_already_fired("complete"));
    }
}
