//! Recommended time slots for one task.

use shared::SlotSuggestion;

use crate::api::{ApiClient, DEFAULT_SLOT_LIMIT};
use crate::error::ClientError;
use crate::format;
use crate::transport::Transport;

pub const NO_SLOTS: &str = "No available slots";
pub const FETCH_FAILED: &str = "Failed to fetch recommended slots";
pub const SELECT_LABEL: &str = "Select this slot";

#[derive(Debug, Clone, PartialEq)]
pub enum SlotView {
    NotFetched,
    Loading,
    Loaded(Vec<SlotSuggestion>),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotAction {
    Loading,
    Loaded(Result<Vec<SlotSuggestion>, ClientError>),
    /// A different task was picked; previous results no longer apply
    Retarget(String),
}

/// Ranked free slots for `task_id`, in the order the backend returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRecommendation {
    pub task_id: String,
    pub limit: u32,
    pub view: SlotView,
}

impl SlotRecommendation {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self::with_limit(task_id, DEFAULT_SLOT_LIMIT)
    }

    pub fn with_limit(task_id: impl Into<String>, limit: u32) -> Self {
        Self {
            task_id: task_id.into(),
            limit,
            view: SlotView::NotFetched,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.view == SlotView::Loading
    }

    pub fn slots(&self) -> &[SlotSuggestion] {
        match &self.view {
            SlotView::Loaded(slots) => slots,
            _ => &[],
        }
    }

    /// Text shown in place of the list, if any
    pub fn placeholder(&self) -> Option<&'static str> {
        match &self.view {
            SlotView::Loaded(slots) if slots.is_empty() => Some(NO_SLOTS),
            SlotView::Failed => Some(FETCH_FAILED),
            _ => None,
        }
    }

    pub fn apply(&mut self, action: SlotAction) {
        match action {
            SlotAction::Loading => self.view = SlotView::Loading,
            SlotAction::Loaded(Ok(slots)) => {
                tracing::debug!(task_id = %self.task_id, count = slots.len(), "slots loaded");
                self.view = SlotView::Loaded(slots);
            }
            SlotAction::Loaded(Err(e)) => {
                tracing::warn!(task_id = %self.task_id, error = %e, "slot suggestion failed");
                self.view = SlotView::Failed;
            }
            SlotAction::Retarget(task_id) => {
                if task_id != self.task_id {
                    self.task_id = task_id;
                    self.view = SlotView::NotFetched;
                }
            }
        }
    }

    pub async fn fetch<T: Transport>(&mut self, api: &ApiClient<T>) {
        self.apply(SlotAction::Loading);
        let result = api
            .suggest_slots(&self.task_id, self.limit)
            .await
            .map(|response| response.slots);
        self.apply(SlotAction::Loaded(result));
    }
}

/// One list entry's time label: `2025-08-13 09:00 - 10:30`
pub fn slot_label(slot: &SlotSuggestion) -> String {
    format::time_range(&slot.start_at, &slot.end_at)
}

/// Score exactly as the backend ranked it
pub fn score_label(slot: &SlotSuggestion) -> String {
    slot.score.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{api_with, json_response};
    use crate::transport::MockTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn loaded_slots_keep_backend_order() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| req.url == "http://localhost:8000/slots/suggest?taskId=task-123&limit=5")
            .times(1)
            .returning(|_| {
                Ok(json_response(
                    200,
                    json!({
                        "taskId": "task-123",
                        "slots": [
                            { "startAt": "2025-08-13T09:00:00Z", "endAt": "2025-08-13T10:30:00Z", "score": 0.8765 },
                            { "startAt": "2025-08-13T14:00:00Z", "endAt": "2025-08-13T15:30:00Z", "score": 1.2 }
                        ]
                    }),
                ))
            });
        let api = api_with(transport);

        let mut view = SlotRecommendation::new("task-123");
        view.fetch(&api).await;

        let labels: Vec<String> = view.slots().iter().map(slot_label).collect();
        assert_eq!(
            labels,
            vec!["2025-08-13 09:00 - 10:30", "2025-08-13 14:00 - 15:30"]
        );
        assert_eq!(score_label(&view.slots()[0]), "0.8765");
        assert_eq!(view.placeholder(), None);
    }

    #[tokio::test]
    async fn empty_result_shows_empty_state() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Ok(json_response(200, json!({ "taskId": "task-123", "slots": [] }))));
        let api = api_with(transport);

        let mut view = SlotRecommendation::new("task-123");
        view.fetch(&api).await;
        assert_eq!(view.placeholder(), Some(NO_SLOTS));
    }

    #[tokio::test]
    async fn failure_shows_error_state() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Err(ClientError::Network("Network Error".into())));
        let api = api_with(transport);

        let mut view = SlotRecommendation::new("task-123");
        view.fetch(&api).await;
        assert_eq!(view.view, SlotView::Failed);
        assert_eq!(view.placeholder(), Some(FETCH_FAILED));
        assert!(view.slots().is_empty());
    }

    #[tokio::test]
    async fn custom_limit_is_forwarded() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| req.url.ends_with("/slots/suggest?taskId=task-9&limit=3"))
            .times(1)
            .returning(|_| Ok(json_response(200, json!({ "taskId": "task-9", "slots": [] }))));
        let api = api_with(transport);

        let mut view = SlotRecommendation::with_limit("task-9", 3);
        view.fetch(&api).await;
        assert!(!view.is_loading());
    }

    #[test]
    fn retarget_discards_previous_results() {
        let mut view = SlotRecommendation::new("task-1");
        view.apply(SlotAction::Loaded(Ok(Vec::new())));

        view.apply(SlotAction::Retarget("task-1".into()));
        assert_eq!(view.view, SlotView::Loaded(Vec::new()));

        view.apply(SlotAction::Retarget("task-2".into()));
        assert_eq!(view.task_id, "task-2");
        assert_eq!(view.view, SlotView::NotFetched);
    }
}
