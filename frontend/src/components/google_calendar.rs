use client::integrations::{self, connection_label, sync_summary};
use client::{IntegrationPanel, PanelOp};
use yew::prelude::*;

use super::{sink, Store};
use crate::config;
use crate::services::api::{use_api, Api};
use crate::services::storage::BrowserSession;

type PanelHandle = UseReducerHandle<Store<IntegrationPanel>>;

/// Button callback that runs `run` unless another panel request is outstanding
fn panel_action<F, Fut>(api: &Api, panel: &PanelHandle, run: F) -> Callback<MouseEvent>
where
    F: Fn(Api, UseReducerDispatcher<Store<IntegrationPanel>>) -> Fut + 'static,
    Fut: std::future::Future<Output = ()> + 'static,
{
    let api = api.clone();
    let panel = panel.clone();
    Callback::from(move |_: MouseEvent| {
        if panel.is_busy() {
            return;
        }
        wasm_bindgen_futures::spawn_local(run(api.clone(), panel.dispatcher()));
    })
}

#[function_component(GoogleCalendar)]
pub fn google_calendar() -> Html {
    let api = use_api();
    let panel = use_reducer(Store::<IntegrationPanel>::default);

    {
        let api = api.clone();
        let panel = panel.dispatcher();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                integrations::load(&api, &sink(panel)).await;
            });
            || ()
        });
    }

    let on_connect = panel_action(&api, &panel, |api, panel| async move {
        let origin = config::origin();
        if let Some(url) = integrations::connect(&api, &BrowserSession, &origin, &sink(panel)).await
        {
            if let Err(e) = gloo::utils::window().location().set_href(&url) {
                tracing::error!("Failed to navigate to consent screen: {:?}", e);
            }
        }
    });
    let on_sync_calendars = panel_action(&api, &panel, |api, panel| async move {
        integrations::sync_calendars(&api, &sink(panel)).await;
    });
    let on_sync_events = panel_action(&api, &panel, |api, panel| async move {
        integrations::sync_events(&api, &sink(panel)).await;
    });
    let on_disconnect = panel_action(&api, &panel, |api, panel| async move {
        integrations::disconnect(&api, &sink(panel)).await;
    });

    let pending = panel.pending;
    let busy_label = |op: PanelOp, idle: &'static str, busy: &'static str| {
        if pending == Some(op) {
            busy
        } else {
            idle
        }
    };

    let body = if panel.loading {
        html! { <div class="loading"><div class="spinner"></div></div> }
    } else if let Some(google) = panel.google() {
        html! {
            <>
                <p class="connection">{ connection_label(google) }</p>
                <div class="actions">
                    <button class="btn" onclick={on_sync_calendars} disabled={panel.is_busy()}>
                        { busy_label(PanelOp::SyncingCalendars, "Sync calendars", "Syncing...") }
                    </button>
                    <button class="btn" onclick={on_sync_events} disabled={panel.is_busy()}>
                        { busy_label(PanelOp::SyncingEvents, "Sync events", "Syncing...") }
                    </button>
                    <button class="btn btn-danger" onclick={on_disconnect} disabled={panel.is_busy()}>
                        { busy_label(PanelOp::Disconnecting, "Disconnect", "Disconnecting...") }
                    </button>
                </div>
            </>
        }
    } else {
        html! {
            <>
                <p>{ "Google Calendar is not connected." }</p>
                <button class="btn btn-primary" onclick={on_connect} disabled={panel.is_busy()}>
                    { busy_label(PanelOp::Connecting, "Connect Google Calendar", "Connecting...") }
                </button>
            </>
        }
    };

    html! {
        <section class="google-calendar">
            <h2>{ "Google Calendar" }</h2>
            if let Some(error) = panel.error {
                <p class="notice notice-error">{ error }</p>
            }
            { body }
            if let Some(sync) = &panel.last_sync {
                <ul class="sync-result">
                    { for sync_summary(sync).into_iter().map(|line| html! { <li>{ line }</li> }) }
                </ul>
            }
        </section>
    }
}
