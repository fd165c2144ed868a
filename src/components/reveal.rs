use yew::prelude::*;

use super::observer::use_seen_once;
use crate::config;

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

/// Fades its children in the first time they scroll into view.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let visible = use_seen_once(node.clone(), config::REVEAL_THRESHOLD, config::REVEAL_ROOT_MARGIN);

    html! {
        <div
            ref={node}
            class={classes!(props.class.clone(), visible.then(|| "visible"))}
            data-animate="true"
        >
            { for props.children.iter() }
        </div>
    }
}
