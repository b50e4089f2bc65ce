use client::forms::event::{CANCEL_LABEL, FOCUS_CONFLICT, OVERRIDE_LABEL};
use client::{EventForm, EventFormAction};
use shared::{CreateEventRequest, EventType, SlotSuggestion};
use yew::prelude::*;

use super::{form_feedback, input_value, select_value, textarea_value, Store};
use crate::services::api::{use_api, Api};

#[derive(Properties, PartialEq)]
pub struct EventManagerProps {
    /// Slot chosen on the Slots tab; pre-populates the form
    #[prop_or_default]
    pub prefill: Option<SlotSuggestion>,
    #[prop_or_default]
    pub title: Option<AttrValue>,
}

fn send(api: &Api, form: &UseReducerHandle<Store<EventForm>>, request: CreateEventRequest) {
    form.dispatch(EventFormAction::Submitting(request.clone()));
    let api = api.clone();
    let dispatcher = form.dispatcher();
    wasm_bindgen_futures::spawn_local(async move {
        let result = api.create_event(&request).await;
        dispatcher.dispatch(EventFormAction::Completed(result));
    });
}

#[function_component(EventManager)]
pub fn event_manager(props: &EventManagerProps) -> Html {
    let api = use_api();
    let form = use_reducer(Store::<EventForm>::default);

    {
        let form = form.dispatcher();
        let title = props.title.clone();
        use_effect_with(props.prefill.clone(), move |prefill| {
            if let Some(slot) = prefill {
                form.dispatch(EventFormAction::Prefill {
                    slot: slot.clone(),
                    title: title.map(|t| t.to_string()),
                });
            }
            || ()
        });
    }

    let on_title = {
        let form = form.dispatcher();
        Callback::from(move |e: InputEvent| form.dispatch(EventFormAction::Title(input_value(&e))))
    };
    let on_start = {
        let form = form.dispatcher();
        Callback::from(move |e: InputEvent| form.dispatch(EventFormAction::StartAt(input_value(&e))))
    };
    let on_end = {
        let form = form.dispatcher();
        Callback::from(move |e: InputEvent| form.dispatch(EventFormAction::EndAt(input_value(&e))))
    };
    let on_type = {
        let form = form.dispatcher();
        Callback::from(move |e: Event| {
            if let Ok(event_type) = select_value(&e).parse::<EventType>() {
                form.dispatch(EventFormAction::Type(event_type));
            }
        })
    };
    let on_description = {
        let form = form.dispatcher();
        Callback::from(move |e: InputEvent| {
            form.dispatch(EventFormAction::Description(textarea_value(&e)))
        })
    };

    let on_submit = {
        let api = api.clone();
        let form = form.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if form.is_submitting() {
                return;
            }
            match form.validate() {
                Ok(request) => send(&api, &form, request),
                Err(messages) => form.dispatch(EventFormAction::Invalid(messages)),
            }
        })
    };
    let on_override = {
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(request) = form.override_request() {
                send(&api, &form, request);
            }
        })
    };
    let on_cancel = {
        let form = form.dispatcher();
        Callback::from(move |_: MouseEvent| form.dispatch(EventFormAction::CancelConflict))
    };

    html! {
        <section class="event-manager">
            <h2>{ "Create event" }</h2>
            <form onsubmit={on_submit}>
                <label>
                    { "Title" }
                    <input type="text" value={form.title.clone()} oninput={on_title} />
                </label>
                <label>
                    { "Start" }
                    <input type="datetime-local" value={form.start_at.clone()} oninput={on_start} />
                </label>
                <label>
                    { "End" }
                    <input type="datetime-local" value={form.end_at.clone()} oninput={on_end} />
                </label>
                <label>
                    { "Type" }
                    <select onchange={on_type}>
                        { for EventType::ALL.iter().map(|kind| html! {
                            <option value={kind.as_str()} selected={form.event_type == *kind}>
                                { kind.label() }
                            </option>
                        }) }
                    </select>
                </label>
                <label>
                    { "Description" }
                    <textarea value={form.description.clone()} oninput={on_description} />
                </label>
                <button type="submit" class="btn btn-primary" disabled={form.is_submitting()}>
                    { if form.is_submitting() { "Creating..." } else { "Create event" } }
                </button>
            </form>
            if form.has_conflict() {
                <div class="focus-conflict" role="alert">
                    <p>{ FOCUS_CONFLICT }</p>
                    <button class="btn btn-warning" onclick={on_override} disabled={form.is_submitting()}>
                        { OVERRIDE_LABEL }
                    </button>
                    <button class="btn" onclick={on_cancel} disabled={form.is_submitting()}>
                        { CANCEL_LABEL }
                    </button>
                </div>
            }
            { form_feedback(&form.errors, form.notice) }
        </section>
    }
}
