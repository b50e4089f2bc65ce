//! Form state machines for task and event creation.
//!
//! Each form is plain data plus an `apply` transition function, so the Yew
//! components can drive them through a reducer and the terminal client can
//! drive them directly through `submit`.

pub mod event;
pub mod task;

use validator::ValidationErrors;

pub use event::{EventForm, EventFormAction};
pub use task::{TaskForm, TaskFormAction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}

/// Outcome message shown under a form after a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Success(&'static str),
    Error(&'static str),
}

impl Notice {
    pub fn text(&self) -> &'static str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Map validator field errors to user messages in a stable order
fn field_messages(errors: &ValidationErrors, table: &[(&str, &'static str)]) -> Vec<String> {
    let fields = errors.field_errors();
    table
        .iter()
        .filter(|(field, _)| fields.contains_key(*field))
        .map(|(_, message)| message.to_string())
        .collect()
}
