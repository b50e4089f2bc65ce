use client::oauth::{self, CallbackParams, CallbackStatus, REDIRECT_DELAY_MS, RETURN_LABEL};
use gloo::timers::callback::Timeout;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::config;
use crate::router::Route;
use crate::services::api::use_api;
use crate::services::storage::BrowserSession;

#[function_component(OAuthCallback)]
pub fn oauth_callback() -> Html {
    let api = use_api();
    let navigator = use_navigator();
    let params = use_location()
        .and_then(|location| location.query::<CallbackParams>().ok())
        .unwrap_or_default();
    let status = use_state(|| CallbackStatus::Processing);

    {
        let status = status.clone();
        let navigator = navigator.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let outcome =
                    oauth::complete_callback(&api, &BrowserSession, &config::origin(), &params)
                        .await;
                if outcome == CallbackStatus::Success {
                    if let Some(navigator) = navigator {
                        Timeout::new(REDIRECT_DELAY_MS, move || navigator.push(&Route::Home))
                            .forget();
                    }
                }
                status.set(outcome);
            });
            || ()
        });
    }

    let on_return = Callback::from(move |_: MouseEvent| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Home);
        }
    });

    html! {
        <div class="container">
            <div class="oauth-callback">
                <h2>{ "Google Calendar" }</h2>
                <p class={classes!(status.is_error().then_some("notice-error"))}>
                    { status.message() }
                </p>
                if status.is_error() {
                    <button class="btn btn-primary" onclick={on_return}>{ RETURN_LABEL }</button>
                }
            </div>
        </div>
    }
}
