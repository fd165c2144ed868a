use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, MouseEvent, Node};
use yew::prelude::*;
use yew_hooks::prelude::*;

use super::anchor_link::AnchorLink;
use crate::config;

pub const SECTIONS: [(&str, &str); 4] = [
    ("about", "About"),
    ("services", "Services"),
    ("cases", "Cases"),
    ("contact", "Contact"),
];

fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > config::NAV_SCROLL_THRESHOLD
}

fn set_body_overflow(value: &str) {
    if let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    {
        let _ = body.style().set_property("overflow", value);
    }
}

fn node_contains(node_ref: &NodeRef, target: Option<&Node>) -> bool {
    node_ref
        .cast::<Node>()
        .map_or(false, |node| node.contains(target))
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state_eq(|| false);
    let scrolled = use_state_eq(|| false);
    let panel_ref = use_node_ref();
    let button_ref = use_node_ref();

    {
        let scrolled = scrolled.clone();
        use_event_with_window("scroll", move |_: Event| {
            if let Some(scroll_y) = web_sys::window().and_then(|window| window.scroll_y().ok()) {
                scrolled.set(is_scrolled(scroll_y));
            }
        });
    }

    {
        let menu_open = menu_open.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" && *menu_open {
                menu_open.set(false);
            }
        });
    }

    {
        let menu_open = menu_open.clone();
        let panel_ref = panel_ref.clone();
        let button_ref = button_ref.clone();
        use_event_with_window("click", move |e: MouseEvent| {
            if !*menu_open {
                return;
            }
            let target = e.target().and_then(|target| target.dyn_into::<Node>().ok());
            if !node_contains(&panel_ref, target.as_ref())
                && !node_contains(&button_ref, target.as_ref())
            {
                menu_open.set(false);
            }
        });
    }

    use_effect_with_deps(
        |open: &bool| {
            set_body_overflow(if *open { "hidden" } else { "" });
            || set_body_overflow("")
        },
        *menu_open,
    );

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: ()| menu_open.set(false))
    };

    let links = SECTIONS
        .iter()
        .map(|&(id, label)| {
            html! {
                <AnchorLink class="nav__link" target={id} on_navigate={close_menu.clone()}>
                    {label}
                </AnchorLink>
            }
        })
        .collect::<Html>();

    html! {
        <nav id="nav" class={classes!("nav", (*scrolled).then(|| "nav--scrolled"))}>
            <div class="nav__content">
                <AnchorLink class="nav__logo" target="top" on_navigate={close_menu}>
                    {"UNevent"}
                </AnchorLink>
                <div
                    id="navPanel"
                    ref={panel_ref}
                    class={classes!("nav__panel", (*menu_open).then(|| "open"))}
                >
                    {links}
                </div>
                <button
                    id="mobileMenuBtn"
                    ref={button_ref}
                    class="mobile-menu-btn"
                    aria-label="Open menu"
                    aria-expanded={if *menu_open { "true" } else { "false" }}
                    onclick={toggle_menu}
                >
                    {"☰"}
                </button>
            </div>
        </nav>
    }
}
