use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config;

const LETTERS: [(&str, &str); 7] = [
    ("letterU", "U"),
    ("letterN", "N"),
    ("letterE1", "E"),
    ("letterV", "V"),
    ("letterE2", "E"),
    ("letterN2", "N"),
    ("letterT", "T"),
];

/// Delay before the next letter lights up, or `None` once all are lit.
/// The first letter goes immediately.
fn next_letter_delay(animated: usize, total: usize, delay_ms: u32) -> Option<u32> {
    match animated {
        n if n >= total => None,
        0 => Some(0),
        _ => Some(delay_ms),
    }
}

#[function_component(LetterTitle)]
pub fn letter_title() -> Html {
    let animated = use_state(|| 0usize);

    {
        let setter = animated.clone();
        use_effect_with_deps(
            move |count: &usize| {
                let count = *count;
                let timeout = next_letter_delay(count, LETTERS.len(), config::LETTER_DELAY_MS)
                    .map(|delay| Timeout::new(delay, move || setter.set(count + 1)));
                move || drop(timeout)
            },
            *animated,
        );
    }

    html! {
        <h1 class="hero__title" aria-label="UNEVENT">
            { for LETTERS.iter().enumerate().map(|(i, (id, letter))| html! {
                <span id={*id} class={classes!("hero__letter", (i < *animated).then(|| "animate"))}>
                    {*letter}
                </span>
            }) }
        </h1>
    }
}
