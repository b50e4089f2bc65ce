use client::calendars;
use client::CalendarManager;
use yew::prelude::*;

use super::{sink, Store};
use crate::services::api::use_api;

#[function_component(CalendarManagerView)]
pub fn calendar_manager() -> Html {
    let api = use_api();
    let manager = use_reducer(Store::<CalendarManager>::default);

    {
        let api = api.clone();
        let manager = manager.dispatcher();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                calendars::load(&api, &sink(manager)).await;
            });
            || ()
        });
    }

    // One update at a time; every row waits for the outstanding one
    let busy = manager.is_busy();

    let rows = manager.calendars.iter().map(|calendar| {
        let on_toggle = {
            let api = api.clone();
            let manager = manager.clone();
            let calendar_id = calendar.id.clone();
            let selected = !calendar.selected;
            Callback::from(move |_: Event| {
                if manager.is_busy() {
                    return;
                }
                let api = api.clone();
                let dispatch = sink(manager.dispatcher());
                let calendar_id = calendar_id.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    calendars::set_selected(&api, &calendar_id, selected, &dispatch).await;
                });
            })
        };
        let on_default = {
            let api = api.clone();
            let manager = manager.clone();
            let calendar_id = calendar.id.clone();
            Callback::from(move |_: MouseEvent| {
                if manager.is_busy() {
                    return;
                }
                let api = api.clone();
                let dispatch = sink(manager.dispatcher());
                let calendar_id = calendar_id.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    calendars::set_default(&api, &calendar_id, &dispatch).await;
                });
            })
        };
        let saving = manager.is_pending(&calendar.id);

        html! {
            <li key={calendar.id.clone()} class={classes!("calendar-item", saving.then_some("saving"))}>
                <label>
                    <input
                        type="checkbox"
                        checked={calendar.selected}
                        disabled={busy}
                        onchange={on_toggle}
                    />
                    <span
                        class="calendar-color"
                        style={calendar.color.as_ref().map(|c| format!("background-color: {}", c))}
                    />
                    { calendar.display_name() }
                </label>
                if calendar.is_primary {
                    <span class="badge">{ "Primary" }</span>
                }
                if calendar.is_default {
                    <span class="badge badge-default">{ "Default" }</span>
                } else {
                    <button class="btn btn-small" onclick={on_default} disabled={busy}>
                        { if saving { "Saving..." } else { "Set as default" } }
                    </button>
                }
            </li>
        }
    });

    html! {
        <section class="calendar-manager">
            <h2>{ "Calendars" }</h2>
            if let Some(error) = manager.error {
                <p class="notice notice-error">{ error }</p>
            }
            if manager.loading {
                <div class="loading"><div class="spinner"></div></div>
            } else if manager.calendars.is_empty() {
                <p class="empty-state">{ "No calendars synced yet" }</p>
            } else {
                <ul class="calendar-list">{ for rows }</ul>
            }
        </section>
    }
}
