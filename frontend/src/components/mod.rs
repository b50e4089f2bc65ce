pub mod calendar_manager;
pub mod event_manager;
pub mod google_calendar;
pub mod header;
pub mod slot_recommendation;
pub mod task_manager;

use std::ops::Deref;
use std::rc::Rc;

use client::{
    CalendarAction, CalendarManager, EventForm, EventFormAction, IntegrationAction,
    IntegrationPanel, PageAction, PageState, SlotAction, SlotRecommendation,
};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

/// A client view state machine driven by an action enum
pub trait Machine: Clone + PartialEq + 'static {
    type Action;

    fn step(&mut self, action: Self::Action);
}

/// Adapts a [`Machine`] to `use_reducer`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store<M>(pub M);

impl<M: Machine> Reducible for Store<M> {
    type Action = M::Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = self.0.clone();
        next.step(action);
        Rc::new(Store(next))
    }
}

impl<M> Deref for Store<M> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.0
    }
}

macro_rules! machine {
    ($($state:ty => $action:ty),* $(,)?) => {
        $(
            impl Machine for $state {
                type Action = $action;

                fn step(&mut self, action: $action) {
                    self.apply(action);
                }
            }
        )*
    };
}

machine! {
    EventForm => EventFormAction,
    SlotRecommendation => SlotAction,
    IntegrationPanel => IntegrationAction,
    CalendarManager => CalendarAction,
    PageState => PageAction,
}

/// Forwards the steps of a shared client sequence into a reducer
pub fn sink<M: Machine>(dispatcher: UseReducerDispatcher<Store<M>>) -> impl Fn(M::Action) {
    move |action| dispatcher.dispatch(action)
}

pub fn input_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

pub fn textarea_value(e: &InputEvent) -> String {
    e.target_unchecked_into::<HtmlTextAreaElement>().value()
}

pub fn select_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

/// Errors and the outcome notice under a form
pub fn form_feedback(errors: &[String], notice: Option<client::Notice>) -> Html {
    html! {
        <>
            if !errors.is_empty() {
                <ul class="form-errors" role="alert">
                    { for errors.iter().map(|message| html! { <li>{ message }</li> }) }
                </ul>
            }
            if let Some(notice) = notice {
                <p class={classes!("notice", if notice.is_error() { "notice-error" } else { "notice-success" })}>
                    { notice.text() }
                </p>
            }
        </>
    }
}
