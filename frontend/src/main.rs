mod components;
mod config;
mod pages;
mod router;
mod services;

use yew::prelude::*;
use yew_router::BrowserRouter;

use crate::router::{switch, Route};
use crate::services::api::{self, Api};

#[function_component(App)]
fn app() -> Html {
    let api = use_state(api::client);

    html! {
        <ContextProvider<Api> context={(*api).clone()}>
            <BrowserRouter>
                <div id="app">
                    <components::header::Header />
                    <yew_router::Switch<Route> render={switch} />
                </div>
            </BrowserRouter>
        </ContextProvider<Api>>
    }
}

fn main() {
    // Initialize tracing
    tracing_wasm::set_as_global_default();
    tracing::info!(api_base_url = config::api_base_url(), "starting Schedule Concierge");

    yew::Renderer::<App>::new().render();
}
