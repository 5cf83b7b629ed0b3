use yew::prelude::*;
use yew_router::prelude::*;
use log::info;
use web_sys::window;

mod config;
mod animation {
    pub mod dom;
    pub mod ease;
    pub mod frame;
    pub mod hero;
    pub mod plan;
    pub mod player;
    pub mod scroll;
    pub mod state;
}
mod components {
    pub mod whatsapp_link;
}
mod pages {
    pub mod home;
}

use pages::home::Home;


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
            info!("Unknown route, redirecting home");
            html! { <Redirect<Route> to={Route::Home} /> }
        },
    }
}


/// Title and description for the document head. The description meta tag
/// is created when the host page does not ship one.
fn apply_metadata() {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    document.set_title(config::SITE_TITLE);

    let meta = match document.query_selector("meta[name=\"description\"]").ok().flatten() {
        Some(meta) => Some(meta),
        None => document.create_element("meta").ok().and_then(|meta| {
            let _ = meta.set_attribute("name", "description");
            let head = document.head()?;
            head.append_child(&meta).ok()?;
            Some(meta)
        }),
    };
    if let Some(meta) = meta {
        let _ = meta.set_attribute("content", config::SITE_DESCRIPTION);
    }
}


#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    apply_metadata();
    yew::Renderer::<App>::new().render();
}
