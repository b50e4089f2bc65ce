use shared::{CreateEventRequest, Event, EventType, SlotSuggestion};
use validator::Validate;

use super::{field_messages, Notice, Phase};
use crate::api::ApiClient;
use crate::error::ClientError;
use crate::format;
use crate::transport::Transport;

pub const TITLE_REQUIRED: &str = "Event title is required";
pub const TITLE_TOO_LONG: &str = "Event title must be at most 500 characters";
pub const START_REQUIRED: &str = "Start time is required";
pub const END_REQUIRED: &str = "End time is required";
pub const START_INVALID: &str = "Start time is not a valid date";
pub const END_INVALID: &str = "End time is not a valid date";
pub const END_BEFORE_START: &str = "End time must be after start time";
pub const FOCUS_CONFLICT: &str = "This time overlaps a protected focus block";
pub const OVERRIDE_LABEL: &str = "Override focus protection and create";
pub const CANCEL_LABEL: &str = "Cancel";
pub const EVENT_CREATED: &str = "Event created";
pub const EVENT_FAILED: &str = "Failed to create event";

/// Event creation form with the focus-protection recovery flow.
///
/// A `FOCUS_PROTECTED` rejection parks the rejected request in `conflict`
/// instead of showing an error. From there the user either overrides (the
/// parked request is resent with the override flag and a general type) or
/// cancels (the parked request is dropped, nothing is sent).
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub title: String,
    /// Raw `datetime-local` values, read as UTC
    pub start_at: String,
    pub end_at: String,
    pub event_type: EventType,
    pub description: String,
    /// Pre-populated from a selected slot; such forms are kept after success
    pub from_slot: bool,
    pub phase: Phase,
    pub errors: Vec<String>,
    pub notice: Option<Notice>,
    pub in_flight: Option<CreateEventRequest>,
    pub conflict: Option<CreateEventRequest>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventFormAction {
    Title(String),
    StartAt(String),
    EndAt(String),
    Type(EventType),
    Description(String),
    Prefill {
        slot: SlotSuggestion,
        title: Option<String>,
    },
    Invalid(Vec<String>),
    Submitting(CreateEventRequest),
    Completed(Result<Event, ClientError>),
    CancelConflict,
}

impl Default for EventForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            start_at: String::new(),
            end_at: String::new(),
            event_type: EventType::default(),
            description: String::new(),
            from_slot: false,
            phase: Phase::Idle,
            errors: Vec::new(),
            notice: None,
            in_flight: None,
            conflict: None,
        }
    }
}

impl EventForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slot(slot: &SlotSuggestion, title: Option<&str>) -> Self {
        let mut form = Self::default();
        form.apply(EventFormAction::Prefill {
            slot: slot.clone(),
            title: title.map(str::to_string),
        });
        form
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn has_conflict(&self) -> bool {
        self.conflict.is_some()
    }

    pub fn validate(&self) -> Result<CreateEventRequest, Vec<String>> {
        let mut messages = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            messages.push(TITLE_REQUIRED.to_string());
        }
        let start = required_instant(&self.start_at, START_REQUIRED, START_INVALID, &mut messages);
        let end = required_instant(&self.end_at, END_REQUIRED, END_INVALID, &mut messages);
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                messages.push(END_BEFORE_START.to_string());
            }
        }

        let (Some(start_at), Some(end_at)) = (start, end) else {
            return Err(messages);
        };
        if !messages.is_empty() {
            return Err(messages);
        }

        let request = CreateEventRequest {
            title: title.to_string(),
            start_at,
            end_at,
            event_type: Some(self.event_type),
            description: Some(self.description.clone()).filter(|d| !d.trim().is_empty()),
            override_focus_protection: None,
        };
        if let Err(errors) = request.validate() {
            return Err(field_messages(&errors, &[("title", TITLE_TOO_LONG)]));
        }
        Ok(request)
    }

    /// The parked request as it would be resent past focus protection
    pub fn override_request(&self) -> Option<CreateEventRequest> {
        self.conflict.as_ref().map(CreateEventRequest::with_focus_override)
    }

    pub fn apply(&mut self, action: EventFormAction) {
        match action {
            EventFormAction::Title(title) => self.title = title,
            EventFormAction::StartAt(start_at) => self.start_at = start_at,
            EventFormAction::EndAt(end_at) => self.end_at = end_at,
            EventFormAction::Type(event_type) => self.event_type = event_type,
            EventFormAction::Description(description) => self.description = description,
            EventFormAction::Prefill { slot, title } => {
                self.start_at = format::input_value(&slot.start_at);
                self.end_at = format::input_value(&slot.end_at);
                if let Some(title) = title {
                    self.title = title;
                }
                self.event_type = EventType::General;
                self.from_slot = true;
            }
            EventFormAction::Invalid(messages) => {
                self.errors = messages;
                self.notice = None;
                self.phase = Phase::Idle;
            }
            EventFormAction::Submitting(request) => {
                self.errors.clear();
                self.notice = None;
                if !request.is_override() {
                    self.conflict = None;
                }
                self.in_flight = Some(request);
                self.phase = Phase::Submitting;
            }
            EventFormAction::Completed(result) => {
                self.phase = Phase::Idle;
                let request = self.in_flight.take();
                let was_override = request.as_ref().is_some_and(CreateEventRequest::is_override);
                match result {
                    Ok(event) => {
                        tracing::info!(event_id = %event.id, was_override, "event created");
                        self.notice = Some(Notice::Success(EVENT_CREATED));
                        self.conflict = None;
                        if !was_override && !self.from_slot {
                            self.reset_fields();
                        }
                    }
                    Err(e) if e.is_focus_protected() && !was_override => {
                        tracing::info!("event overlaps a protected focus block");
                        self.conflict = request;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, was_override, "event creation failed");
                        self.notice = Some(Notice::Error(EVENT_FAILED));
                    }
                }
            }
            EventFormAction::CancelConflict => {
                self.conflict = None;
            }
        }
    }

    pub async fn submit<T: Transport>(&mut self, api: &ApiClient<T>) -> Option<Event> {
        match self.validate() {
            Ok(request) => self.send(api, request).await,
            Err(messages) => {
                self.apply(EventFormAction::Invalid(messages));
                None
            }
        }
    }

    /// Resend the parked request with the focus override; no-op without a conflict
    pub async fn override_focus<T: Transport>(&mut self, api: &ApiClient<T>) -> Option<Event> {
        let request = self.override_request()?;
        self.send(api, request).await
    }

    pub fn cancel_conflict(&mut self) {
        self.apply(EventFormAction::CancelConflict);
    }

    async fn send<T: Transport>(
        &mut self,
        api: &ApiClient<T>,
        request: CreateEventRequest,
    ) -> Option<Event> {
        self.apply(EventFormAction::Submitting(request.clone()));
        let result = api.create_event(&request).await;
        let created = result.as_ref().ok().cloned();
        self.apply(EventFormAction::Completed(result));
        created
    }

    fn reset_fields(&mut self) {
        self.title.clear();
        self.start_at.clear();
        self.end_at.clear();
        self.event_type = EventType::default();
        self.description.clear();
    }
}

fn required_instant(
    value: &str,
    missing: &str,
    invalid: &str,
    messages: &mut Vec<String>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    if value.trim().is_empty() {
        messages.push(missing.to_string());
        return None;
    }
    let parsed = format::parse_input(value);
    if parsed.is_none() {
        messages.push(invalid.to_string());
    }
    parsed
}
