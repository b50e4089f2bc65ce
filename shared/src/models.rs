use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Draft,
    Scheduled,
    InProgress,
    Done,
    Overdue,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Scheduled => "Scheduled",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
            Self::Overdue => "Overdue",
        }
    }

    /// Human readable label used by the task list
    pub fn label(&self) -> &'static str {
        match self {
            Self::InProgress => "In progress",
            other => other.as_str(),
        }
    }

    /// Whether a task in this status may move to `next`.
    ///
    /// `Done` is terminal. Every other status can fall `Overdue`.
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        use TaskStatus::*;
        matches!(
            (self, next),
            (Draft, Scheduled)
                | (Draft, InProgress)
                | (Draft, Overdue)
                | (Scheduled, InProgress)
                | (Scheduled, Done)
                | (Scheduled, Overdue)
                | (InProgress, Done)
                | (InProgress, Overdue)
                | (Overdue, InProgress)
                | (Overdue, Done)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preferred time-of-day hint for scheduling a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyTag {
    Morning,
    Afternoon,
    Deep,
}

impl EnergyTag {
    pub const ALL: [EnergyTag; 3] = [Self::Morning, Self::Afternoon, Self::Deep];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Deep => "deep",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning person",
            Self::Afternoon => "Afternoon person",
            Self::Deep => "Deep focus",
        }
    }
}

impl FromStr for EnergyTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown energy tag: {}", s))
    }
}

/// Kind of calendar event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    #[default]
    General,
    Meeting,
    Focus,
    Buffer,
}

impl EventType {
    pub const ALL: [EventType; 4] = [Self::General, Self::Meeting, Self::Focus, Self::Buffer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "GENERAL",
            Self::Meeting => "MEETING",
            Self::Focus => "FOCUS",
            Self::Buffer => "BUFFER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Meeting => "Meeting",
            Self::Focus => "Focus work",
            Self::Buffer => "Buffer",
        }
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown event type: {}", s))
    }
}

/// Task as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub priority: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_tag: Option<EnergyTag>,
    pub status: TaskStatus,
    // The create endpoint does not echo timestamps
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "crate::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Calendar event as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(with = "crate::timestamp")]
    pub start_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub end_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Candidate interval for a task, ranked by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSuggestion {
    #[serde(with = "crate::timestamp")]
    pub start_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub end_at: DateTime<Utc>,
    pub score: f64,
}

/// OAuth connection held by the backend for an external provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Integration {
    pub id: String,
    pub provider: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(with = "crate::timestamp")]
    pub connected_at: DateTime<Utc>,
    #[serde(default, with = "crate::timestamp::option")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Calendar known to the backend, local or synced from a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub external_provider: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub access_role: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub selected: bool,
}

impl Calendar {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "(untitled)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn task_from_create_response_without_timestamps() {
        let task: Task = serde_json::from_value(json!({
            "id": "task-123",
            "title": "Write report",
            "dueAt": null,
            "priority": 2,
            "estimatedMinutes": 90,
            "status": "Draft",
            "energyTag": "deep"
        }))
        .unwrap();

        assert_eq!(task.title, "Write report");
        assert_eq!(task.status, TaskStatus::Draft);
        assert_eq!(task.energy_tag, Some(EnergyTag::Deep));
        assert_eq!(task.estimated_minutes, Some(90));
        assert!(task.created_at.is_none());
    }

    #[test]
    fn task_status_in_progress_uses_pascal_case() {
        let value = serde_json::to_value(TaskStatus::InProgress).unwrap();
        assert_eq!(value, json!("InProgress"));
        assert_eq!(TaskStatus::InProgress.label(), "In progress");
    }

    #[test]
    fn event_keeps_type_and_times() {
        let event: Event = serde_json::from_value(json!({
            "id": "event-456",
            "title": "Team Meeting",
            "startAt": "2025-08-13T14:00:00Z",
            "endAt": "2025-08-13T15:00:00Z",
            "type": "MEETING",
            "createdAt": "2025-08-12T10:30:00Z"
        }))
        .unwrap();

        assert_eq!(event.event_type, EventType::Meeting);
        assert_eq!(event.start_at.to_rfc3339(), "2025-08-13T14:00:00+00:00");
        assert!(event.end_at > event.start_at);
        assert_eq!(event.description, None);
    }

    #[test]
    fn offset_less_timestamps_read_as_utc() {
        let event: Event = serde_json::from_value(json!({
            "id": "event-457",
            "title": "Review",
            "startAt": "2025-08-13T14:00:00",
            "endAt": "2025-08-13T15:00:00",
            "type": "GENERAL",
            "createdAt": "2025-08-12T10:30:00.123456"
        }))
        .unwrap();
        assert_eq!(event.start_at.to_rfc3339(), "2025-08-13T14:00:00+00:00");
        assert_eq!(event.created_at.timestamp_subsec_micros(), 123456);

        let task: Task = serde_json::from_value(json!({
            "id": "task-124",
            "title": "Plan sprint",
            "priority": 3,
            "status": "Scheduled",
            "dueAt": "2025-08-20T17:00:00",
            "createdAt": "2025-08-12T09:00:00.5",
            "updatedAt": null
        }))
        .unwrap();
        assert_eq!(
            task.due_at.map(|at| at.to_rfc3339()),
            Some("2025-08-20T17:00:00+00:00".to_string())
        );
        assert!(task.created_at.is_some());
        assert_eq!(task.updated_at, None);

        let integration: Integration = serde_json::from_value(json!({
            "id": "int-2",
            "provider": "google",
            "connected_at": "2025-08-12T10:00:00.5",
            "expires_at": "2025-08-12T11:00:00"
        }))
        .unwrap();
        assert_eq!(integration.connected_at.timestamp_subsec_millis(), 500);
        assert!(integration.expires_at > Some(integration.connected_at));
    }

    #[test]
    fn slot_score_survives_decoding() {
        let slot: SlotSuggestion = serde_json::from_value(json!({
            "startAt": "2025-08-13T09:00:00Z",
            "endAt": "2025-08-13T10:30:00Z",
            "score": 1.85
        }))
        .unwrap();

        assert_eq!(slot.score, 1.85);
        assert_eq!(
            serde_json::to_value(&slot).unwrap()["startAt"],
            json!("2025-08-13T09:00:00Z")
        );
    }

    #[test]
    fn integration_uses_snake_case_fields() {
        let integration: Integration = serde_json::from_value(json!({
            "id": "int-1",
            "provider": "google",
            "scopes": ["calendar"],
            "connected_at": "2025-08-12T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(integration.provider, "google");
        assert_eq!(integration.expires_at, None);
    }

    #[test]
    fn calendar_defaults_missing_flags() {
        let calendar: Calendar = serde_json::from_value(json!({
            "id": "cal-1",
            "name": null,
            "isPrimary": true
        }))
        .unwrap();

        assert!(calendar.is_primary);
        assert!(!calendar.is_default);
        assert_eq!(calendar.display_name(), "(untitled)");
    }

    #[test]
    fn done_is_terminal() {
        for next in [
            TaskStatus::Draft,
            TaskStatus::Scheduled,
            TaskStatus::InProgress,
            TaskStatus::Overdue,
        ] {
            assert!(!TaskStatus::Done.can_transition_to(next));
        }
        assert!(TaskStatus::Draft.can_transition_to(TaskStatus::InProgress));
        assert!(!TaskStatus::Draft.can_transition_to(TaskStatus::Done));
    }

    #[test]
    fn enums_parse_case_insensitively() {
        assert_eq!("meeting".parse::<EventType>(), Ok(EventType::Meeting));
        assert_eq!("DEEP".parse::<EnergyTag>(), Ok(EnergyTag::Deep));
        assert!("lunch".parse::<EventType>().is_err());
    }
}
