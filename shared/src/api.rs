use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Calendar, EnergyTag, EventType, Integration, SlotSuggestion};

/// Error identity the backend uses when an event would overlap a focus block
pub const FOCUS_PROTECTED: &str = "FOCUS_PROTECTED";

// ============================================================================
// Task API Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    #[validate(range(min = 1, max = 5))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,

    #[validate(range(min = 5, max = 480))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_tag: Option<EnergyTag>,
}

// ============================================================================
// Event API Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_focus_protection: Option<bool>,
}

impl CreateEventRequest {
    /// The same request, resubmitted past focus protection as a general event
    pub fn with_focus_override(&self) -> Self {
        Self {
            event_type: Some(EventType::General),
            override_focus_protection: Some(true),
            ..self.clone()
        }
    }

    pub fn is_override(&self) -> bool {
        self.override_focus_protection == Some(true)
    }
}

// ============================================================================
// Slot API Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSuggestionResponse {
    pub task_id: String,
    #[serde(default)]
    pub slots: Vec<SlotSuggestion>,
}

// ============================================================================
// Integration API Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListIntegrationsResponse {
    #[serde(default)]
    pub integrations: Vec<Integration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUrlResponse {
    pub authorization_url: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectRequest {
    pub code: String,
    pub redirect_uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Summary returned by either sync endpoint; each fills only its own fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_calendars: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_events: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendars: Option<Vec<CalendarSummary>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisconnectResponse {
    #[serde(default)]
    pub message: String,
}

// ============================================================================
// Calendar API Types
// ============================================================================

pub type ListCalendarsResponse = Vec<Calendar>;

/// Partial calendar update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCalendarRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

impl UpdateCalendarRequest {
    pub fn selected(selected: bool) -> Self {
        Self {
            selected: Some(selected),
            ..Self::default()
        }
    }

    pub fn make_default() -> Self {
        Self {
            is_default: Some(true),
            ..Self::default()
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Body of every non-2xx response: `{ "detail": { "code", "message", "traceId" } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub detail: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn task_request_omits_unset_optionals() {
        let request = CreateTaskRequest {
            title: "Test Task".into(),
            priority: Some(1),
            estimated_minutes: None,
            due_at: None,
            energy_tag: None,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "title": "Test Task", "priority": 1 })
        );
    }

    #[test]
    fn task_request_ranges_follow_backend() {
        let mut request = CreateTaskRequest {
            title: "Plan".into(),
            priority: Some(6),
            estimated_minutes: Some(3),
            due_at: None,
            energy_tag: Some(EnergyTag::Morning),
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("priority"));
        assert!(fields.contains_key("estimated_minutes"));

        request.priority = Some(3);
        request.estimated_minutes = Some(30);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn focus_override_forces_general_type() {
        let request = CreateEventRequest {
            title: "Standup".into(),
            start_at: "2025-08-13T09:30:00Z".parse().unwrap(),
            end_at: "2025-08-13T10:00:00Z".parse().unwrap(),
            event_type: Some(EventType::Meeting),
            description: None,
            override_focus_protection: None,
        };

        assert_eq!(
            serde_json::to_value(request.with_focus_override()).unwrap(),
            json!({
                "title": "Standup",
                "startAt": "2025-08-13T09:30:00Z",
                "endAt": "2025-08-13T10:00:00Z",
                "type": "GENERAL",
                "overrideFocusProtection": true
            })
        );
    }

    #[test]
    fn calendar_patch_serializes_only_given_field() {
        assert_eq!(
            serde_json::to_value(UpdateCalendarRequest::make_default()).unwrap(),
            json!({ "isDefault": true })
        );
        assert_eq!(
            serde_json::to_value(UpdateCalendarRequest::selected(false)).unwrap(),
            json!({ "selected": false })
        );
    }

    #[test]
    fn error_envelope_with_trace_id() {
        let envelope: ErrorEnvelope = serde_json::from_value(json!({
            "detail": {
                "code": "VALIDATION_ERROR",
                "message": "Title is required",
                "traceId": "trace-123"
            }
        }))
        .unwrap();

        assert_eq!(envelope.detail.code, "VALIDATION_ERROR");
        assert_eq!(envelope.detail.trace_id.as_deref(), Some("trace-123"));
    }

    #[test]
    fn sync_results_fill_their_own_fields() {
        let calendars: SyncResult = serde_json::from_value(json!({
            "syncedCalendars": 2,
            "calendars": [{ "id": "c1", "name": "Work" }, { "id": "c2", "name": "Home" }]
        }))
        .unwrap();
        let events: SyncResult = serde_json::from_value(json!({ "syncedEvents": 14 })).unwrap();

        assert_eq!(calendars.synced_calendars, Some(2));
        assert_eq!(calendars.calendars.map(|c| c.len()), Some(2));
        assert_eq!(events.synced_events, Some(14));
        assert_eq!(events.calendars, None);
    }
}
