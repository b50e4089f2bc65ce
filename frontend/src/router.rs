use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{home::Home, not_found::NotFound, oauth_callback::OAuthCallback};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/oauth/callback")]
    OAuthCallback,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Home /> },
        Route::OAuthCallback => html! { <OAuthCallback /> },
        Route::NotFound => html! { <NotFound /> },
    }
}
