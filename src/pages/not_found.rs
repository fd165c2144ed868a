use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <main class="section not-found">
            <h1>{"Page not found"}</h1>
            <Link<Route> to={Route::Home} classes="hero__cta">
                {"Back to the home page"}
            </Link<Route>>
        </main>
    }
}
