use client::slots::{score_label, slot_label, SELECT_LABEL};
use client::{SlotAction, SlotRecommendation, DEFAULT_SLOT_LIMIT};
use shared::SlotSuggestion;
use yew::prelude::*;

use super::Store;
use crate::services::api::use_api;

#[derive(Properties, PartialEq)]
pub struct SlotRecommendationProps {
    pub task_id: AttrValue,
    #[prop_or(DEFAULT_SLOT_LIMIT)]
    pub limit: u32,
    /// Without a callback the slots are shown read-only
    #[prop_or_default]
    pub on_select: Option<Callback<SlotSuggestion>>,
}

#[function_component(SlotRecommendationView)]
pub fn slot_recommendation(props: &SlotRecommendationProps) -> Html {
    let api = use_api();
    let view = {
        let task_id = props.task_id.to_string();
        let limit = props.limit;
        use_reducer(move || Store(SlotRecommendation::with_limit(task_id, limit)))
    };

    {
        let view = view.dispatcher();
        use_effect_with(props.task_id.clone(), move |task_id| {
            view.dispatch(SlotAction::Retarget(task_id.to_string()));
            || ()
        });
    }

    let on_fetch = {
        let view = view.clone();
        Callback::from(move |_: MouseEvent| {
            if view.is_loading() {
                return;
            }
            view.dispatch(SlotAction::Loading);

            let api = api.clone();
            let task_id = view.task_id.clone();
            let limit = view.limit;
            let dispatcher = view.dispatcher();
            wasm_bindgen_futures::spawn_local(async move {
                let result = api
                    .suggest_slots(&task_id, limit)
                    .await
                    .map(|response| response.slots);
                dispatcher.dispatch(SlotAction::Loaded(result));
            });
        })
    };

    let rows = view.slots().iter().map(|slot| {
        let select = props.on_select.clone().map(|on_select| {
            let slot = slot.clone();
            let onclick = Callback::from(move |_: MouseEvent| on_select.emit(slot.clone()));
            html! { <button class="btn btn-small" {onclick}>{ SELECT_LABEL }</button> }
        });

        html! {
            <li class="slot-item">
                <span class="slot-time">{ slot_label(slot) }</span>
                <span class="slot-score">{ format!("Score: {}", score_label(slot)) }</span>
                { for select }
            </li>
        }
    });

    html! {
        <section class="slot-recommendation">
            <h2>{ "Recommended slots" }</h2>
            <button class="btn btn-primary" onclick={on_fetch} disabled={view.is_loading()}>
                { if view.is_loading() { "Loading..." } else { "Get recommended slots" } }
            </button>
            if let Some(placeholder) = view.placeholder() {
                <p class="empty-state">{ placeholder }</p>
            } else {
                <ul class="slot-list">{ for rows }</ul>
            }
        </section>
    }
}
