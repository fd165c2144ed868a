use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};

mod config;
mod runtime;
mod form {
    pub mod channel;
    pub mod controller;
    pub mod field;
    pub mod render;
    pub mod validation;
}
mod components {
    pub mod anchor_link;
    pub mod contact_form;
    pub mod lazy_image;
    pub mod letter_title;
    pub mod nav;
    pub mod observer;
    pub mod reveal;
}
mod pages {
    pub mod home;
    pub mod not_found;
}

use components::nav::Nav;
use pages::{home::Home, not_found::NotFound};


#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        },
    }
}


#[function_component]
fn App() -> Html {
    runtime::use_pause_when_hidden();
    runtime::use_service_worker_after_load();

    use_effect_with_deps(
        |_| {
            runtime::preload_fonts();
            || ()
        },
        (),
    );

    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("UNevent website initialized");
    yew::Renderer::<App>::new().render();
}
