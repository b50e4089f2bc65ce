use client::forms::task::DEFAULT_PRIORITY;
use client::{TaskForm, TaskFormAction};
use shared::{EnergyTag, Task, TaskStatus};
use yew::prelude::*;

use super::{form_feedback, input_value, select_value};
use crate::services::api::use_api;

/// Task form and list; the state lives with the page so it survives tab changes
#[derive(Properties, PartialEq)]
pub struct TaskManagerProps {
    pub form: TaskForm,
    pub on_action: Callback<TaskFormAction>,
    #[prop_or_default]
    pub selected_task_id: Option<AttrValue>,
    pub on_select: Callback<Task>,
}

#[function_component(TaskManager)]
pub fn task_manager(props: &TaskManagerProps) -> Html {
    let api = use_api();
    let form = &props.form;
    let dispatch = &props.on_action;

    let on_title = dispatch.reform(|e: InputEvent| TaskFormAction::Title(input_value(&e)));
    let on_priority = dispatch.reform(|e: Event| {
        TaskFormAction::Priority(select_value(&e).parse().unwrap_or(DEFAULT_PRIORITY))
    });
    let on_minutes = dispatch
        .reform(|e: InputEvent| TaskFormAction::EstimatedMinutes(input_value(&e).trim().parse().ok()));
    let on_due = dispatch.reform(|e: InputEvent| TaskFormAction::DueAt(input_value(&e)));
    let on_energy = dispatch
        .reform(|e: Event| TaskFormAction::EnergyTag(select_value(&e).parse::<EnergyTag>().ok()));

    let on_submit = {
        let form = form.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if form.is_submitting() {
                return;
            }
            let request = match form.validate() {
                Ok(request) => request,
                Err(messages) => {
                    dispatch.emit(TaskFormAction::Invalid(messages));
                    return;
                }
            };
            dispatch.emit(TaskFormAction::Submitting);

            let api = api.clone();
            let dispatch = dispatch.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = api.create_task(&request).await;
                dispatch.emit(TaskFormAction::Completed(result));
            });
        })
    };

    let task_rows = form.tasks.iter().map(|task| {
        let selected = props.selected_task_id.as_deref() == Some(task.id.as_str());
        let on_select = {
            let on_select = props.on_select.clone();
            let task = task.clone();
            Callback::from(move |_: MouseEvent| on_select.emit(task.clone()))
        };
        let transitions = [TaskStatus::InProgress, TaskStatus::Done]
            .into_iter()
            .filter(|next| task.status.can_transition_to(*next))
            .map(|status| {
                let task_id = task.id.clone();
                let onclick = dispatch.reform(move |_: MouseEvent| TaskFormAction::Advance {
                    task_id: task_id.clone(),
                    status,
                });
                let label = match status {
                    TaskStatus::InProgress => "Start",
                    _ => status.label(),
                };
                html! { <button class="btn btn-small" {onclick}>{ label }</button> }
            });

        html! {
            <li key={task.id.clone()} class={classes!("task-item", selected.then_some("selected"))}>
                <span class="task-title">{ &task.title }</span>
                <span class="task-meta">{ format!("P{} · {}", task.priority, task.status.label()) }</span>
                if let Some(minutes) = task.estimated_minutes {
                    <span class="task-meta">{ format!("{} min", minutes) }</span>
                }
                { for transitions }
                <button class="btn btn-small" onclick={on_select} disabled={selected}>
                    { if selected { "Selected" } else { "Find slots" } }
                </button>
            </li>
        }
    });

    html! {
        <section class="task-manager">
            <h2>{ "Tasks" }</h2>
            <form onsubmit={on_submit}>
                <label>
                    { "Title" }
                    <input type="text" value={form.title.clone()} oninput={on_title} />
                </label>
                <label>
                    { "Priority" }
                    <select onchange={on_priority}>
                        { for (1..=5u8).map(|p| html! {
                            <option value={p.to_string()} selected={form.priority == p}>{ p.to_string() }</option>
                        }) }
                    </select>
                </label>
                <label>
                    { "Estimated minutes" }
                    <input
                        type="number"
                        min="5"
                        max="480"
                        value={form.estimated_minutes.map(|m| m.to_string()).unwrap_or_default()}
                        oninput={on_minutes}
                    />
                </label>
                <label>
                    { "Due" }
                    <input type="datetime-local" value={form.due_at.clone()} oninput={on_due} />
                </label>
                <label>
                    { "Energy" }
                    <select onchange={on_energy}>
                        <option value="" selected={form.energy_tag.is_none()}>{ "Any" }</option>
                        { for EnergyTag::ALL.iter().map(|tag| html! {
                            <option value={tag.as_str()} selected={form.energy_tag == Some(*tag)}>
                                { tag.label() }
                            </option>
                        }) }
                    </select>
                </label>
                <button type="submit" class="btn btn-primary" disabled={form.is_submitting()}>
                    { if form.is_submitting() { "Creating..." } else { "Create task" } }
                </button>
            </form>
            { form_feedback(&form.errors, form.notice) }
            if form.tasks.is_empty() {
                <p class="empty-state">{ "No tasks yet" }</p>
            } else {
                <ul class="task-list">{ for task_rows }</ul>
            }
        </section>
    }
}
