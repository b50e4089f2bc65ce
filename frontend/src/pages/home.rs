use client::{PageAction, PageState, Tab, TaskFormAction};
use shared::{SlotSuggestion, Task};
use yew::prelude::*;

use crate::components::calendar_manager::CalendarManagerView;
use crate::components::event_manager::EventManager;
use crate::components::google_calendar::GoogleCalendar;
use crate::components::slot_recommendation::SlotRecommendationView;
use crate::components::task_manager::TaskManager;
use crate::components::Store;

#[function_component(Home)]
pub fn home() -> Html {
    let page = use_reducer(Store::<PageState>::default);

    let on_select_task = {
        let page = page.dispatcher();
        Callback::from(move |task: Task| page.dispatch(PageAction::SelectTask(task)))
    };
    let on_task_action = {
        let page = page.dispatcher();
        Callback::from(move |action: TaskFormAction| page.dispatch(PageAction::Task(action)))
    };
    let on_select_slot = {
        let page = page.dispatcher();
        Callback::from(move |slot: SlotSuggestion| page.dispatch(PageAction::SelectSlot(slot)))
    };

    let on_open_slots = {
        let page = page.dispatcher();
        Callback::from(move |_: MouseEvent| page.dispatch(PageAction::Open(Tab::Slots)))
    };

    let tabs = Tab::ALL.into_iter().map(|tab| {
        let onclick = {
            let page = page.dispatcher();
            Callback::from(move |_: MouseEvent| page.dispatch(PageAction::Open(tab)))
        };
        html! {
            <button
                class={classes!("tab", (page.active == tab).then_some("active"))}
                disabled={!page.is_enabled(tab)}
                {onclick}
            >
                { tab.label() }
            </button>
        }
    });

    let selected_task_id = page.selected_task.as_ref().map(|t| AttrValue::from(t.id.clone()));
    let content = match page.active {
        Tab::Tasks => html! {
            <>
                <TaskManager
                    form={page.tasks.clone()}
                    on_action={on_task_action}
                    selected_task_id={selected_task_id.clone()}
                    on_select={on_select_task}
                />
                if page.selected_task.is_some() {
                    <button class="btn" onclick={on_open_slots}>
                        { "Find slots for selected task" }
                    </button>
                }
            </>
        },
        Tab::Slots => match &selected_task_id {
            Some(task_id) => html! {
                <SlotRecommendationView task_id={task_id.clone()} on_select={on_select_slot} />
            },
            None => html! { <p class="empty-state">{ "Select a task first" }</p> },
        },
        Tab::Events => html! {
            <EventManager
                prefill={page.selected_slot.clone()}
                title={page.event_title().map(|t| AttrValue::from(t.to_string()))}
            />
        },
        Tab::Integrations => html! {
            <>
                <GoogleCalendar />
                <CalendarManagerView />
            </>
        },
    };

    html! {
        <div class="container">
            <nav class="tabs">{ for tabs }</nav>
            { content }
        </div>
    }
}
