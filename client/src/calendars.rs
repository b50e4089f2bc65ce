//! Calendar list with per-calendar inclusion and default selection.

use std::cell::RefCell;

use shared::{Calendar, UpdateCalendarRequest};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::transport::Transport;

pub const LOAD_FAILED: &str = "Failed to load calendars";
pub const UPDATE_FAILED: &str = "Failed to update calendar";
pub const DEFAULT_FAILED: &str = "Failed to set default calendar";

#[derive(Debug, Clone, PartialEq)]
pub enum CalendarAction {
    Loading,
    /// An update for this calendar is outstanding
    Begin(String),
    Loaded(Result<Vec<Calendar>, ClientError>),
    Updated(Result<Calendar, ClientError>),
    DefaultFailed(ClientError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarManager {
    pub calendars: Vec<Calendar>,
    pub loading: bool,
    pub pending: Option<String>,
    pub error: Option<&'static str>,
}

impl CalendarManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, calendar_id: &str) -> Option<&Calendar> {
        self.calendars.iter().find(|c| c.id == calendar_id)
    }

    pub fn default_calendar(&self) -> Option<&Calendar> {
        self.calendars.iter().find(|c| c.is_default)
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_pending(&self, calendar_id: &str) -> bool {
        self.pending.as_deref() == Some(calendar_id)
    }

    pub fn apply(&mut self, action: CalendarAction) {
        match action {
            CalendarAction::Loading => {
                self.loading = true;
                self.error = None;
            }
            CalendarAction::Begin(calendar_id) => {
                self.pending = Some(calendar_id);
                self.error = None;
            }
            CalendarAction::Loaded(Ok(calendars)) => {
                self.loading = false;
                self.pending = None;
                self.calendars = calendars;
            }
            CalendarAction::Loaded(Err(e)) => {
                tracing::warn!(error = %e, "loading calendars failed");
                self.loading = false;
                self.pending = None;
                self.error = Some(LOAD_FAILED);
            }
            CalendarAction::Updated(Ok(calendar)) => {
                self.pending = None;
                self.error = None;
                if let Some(row) = self.calendars.iter_mut().find(|c| c.id == calendar.id) {
                    *row = calendar;
                }
            }
            CalendarAction::Updated(Err(e)) => {
                tracing::warn!(error = %e, "calendar update failed");
                self.pending = None;
                self.error = Some(UPDATE_FAILED);
            }
            CalendarAction::DefaultFailed(e) => {
                tracing::warn!(error = %e, "setting default calendar failed");
                self.pending = None;
                self.error = Some(DEFAULT_FAILED);
            }
        }
    }

    pub async fn load<T: Transport>(&mut self, api: &ApiClient<T>) {
        let manager = RefCell::new(self);
        load(api, &|action| manager.borrow_mut().apply(action)).await;
    }

    /// Include or exclude a calendar; the returned row replaces the local one
    pub async fn set_selected<T: Transport>(
        &mut self,
        api: &ApiClient<T>,
        calendar_id: &str,
        selected: bool,
    ) {
        let manager = RefCell::new(self);
        set_selected(api, calendar_id, selected, &|action| {
            manager.borrow_mut().apply(action)
        })
        .await;
    }

    /// Flip the current inclusion of a listed calendar
    pub async fn toggle_selected<T: Transport>(&mut self, api: &ApiClient<T>, calendar_id: &str) {
        let Some(selected) = self.find(calendar_id).map(|c| c.selected) else {
            tracing::debug!(%calendar_id, "toggle on unknown calendar");
            return;
        };
        self.set_selected(api, calendar_id, !selected).await;
    }

    pub async fn set_default<T: Transport>(&mut self, api: &ApiClient<T>, calendar_id: &str) {
        let manager = RefCell::new(self);
        set_default(api, calendar_id, &|action| manager.borrow_mut().apply(action)).await;
    }
}

pub async fn load<T, D>(api: &ApiClient<T>, dispatch: &D)
where
    T: Transport,
    D: Fn(CalendarAction),
{
    dispatch(CalendarAction::Loading);
    dispatch(CalendarAction::Loaded(api.list_calendars().await));
}

pub async fn set_selected<T, D>(
    api: &ApiClient<T>,
    calendar_id: &str,
    selected: bool,
    dispatch: &D,
) where
    T: Transport,
    D: Fn(CalendarAction),
{
    dispatch(CalendarAction::Begin(calendar_id.to_string()));
    let result = api
        .update_calendar(calendar_id, &UpdateCalendarRequest::selected(selected))
        .await;
    dispatch(CalendarAction::Updated(result));
}

/// Make a calendar the default, then reload since other rows change too
pub async fn set_default<T, D>(api: &ApiClient<T>, calendar_id: &str, dispatch: &D)
where
    T: Transport,
    D: Fn(CalendarAction),
{
    dispatch(CalendarAction::Begin(calendar_id.to_string()));
    match api
        .update_calendar(calendar_id, &UpdateCalendarRequest::make_default())
        .await
    {
        Ok(_) => load(api, dispatch).await,
        Err(e) => dispatch(CalendarAction::DefaultFailed(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{api_with, body_json, json_response};
    use crate::transport::{Method, MockTransport};
    use mockall::Sequence;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn two_calendars() -> serde_json::Value {
        json!([
            { "id": "cal-1", "name": "Work", "isPrimary": true, "isDefault": true, "selected": true },
            { "id": "cal-2", "selected": false }
        ])
    }

    #[tokio::test]
    async fn load_lists_calendars() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(json_response(200, two_calendars())));
        let api = api_with(transport);

        let mut manager = CalendarManager::new();
        manager.load(&api).await;

        let names: Vec<&str> = manager.calendars.iter().map(Calendar::display_name).collect();
        assert_eq!(names, vec!["Work", "(untitled)"]);
        assert_eq!(manager.default_calendar().map(|c| c.id.as_str()), Some("cal-1"));
    }

    #[tokio::test]
    async fn load_failure() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Err(ClientError::Network("Network Error".into())));
        let api = api_with(transport);

        let mut manager = CalendarManager::new();
        manager.load(&api).await;
        assert_eq!(manager.error, Some(LOAD_FAILED));
        assert!(!manager.loading);
    }

    #[tokio::test]
    async fn toggle_replaces_row_with_response() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                req.method == Method::Put
                    && req.url == "http://localhost:8000/calendars/cal-2"
                    && body_json(req) == json!({ "selected": true })
            })
            .times(1)
            .returning(|_| {
                Ok(json_response(
                    200,
                    json!({ "id": "cal-2", "name": "Family", "selected": true }),
                ))
            });
        let api = api_with(transport);

        let mut manager = CalendarManager::new();
        manager.apply(CalendarAction::Loaded(Ok(
            serde_json::from_value(two_calendars()).unwrap()
        )));
        manager.toggle_selected(&api, "cal-2").await;

        let row = manager.find("cal-2").unwrap();
        assert!(row.selected);
        assert_eq!(row.display_name(), "Family");
        assert_eq!(manager.calendars.len(), 2);
    }

    #[tokio::test]
    async fn toggle_failure_keeps_row() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Ok(json_response(404, json!({ "detail": { "code": "NOT_FOUND" } }))));
        let api = api_with(transport);

        let mut manager = CalendarManager::new();
        manager.apply(CalendarAction::Loaded(Ok(
            serde_json::from_value(two_calendars()).unwrap()
        )));
        manager.toggle_selected(&api, "cal-1").await;

        assert_eq!(manager.error, Some(UPDATE_FAILED));
        assert!(manager.find("cal-1").unwrap().selected);
    }

    #[tokio::test]
    async fn set_default_refetches_list() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| req.method == Method::Put && body_json(req) == json!({ "isDefault": true }))
            .times(1)
            .returning(|_| Ok(json_response(200, json!({ "id": "cal-2", "isDefault": true }))));
        transport
            .expect_send()
            .withf(|req| req.method == Method::Get && req.url.ends_with("/calendars"))
            .times(1)
            .returning(|_| {
                Ok(json_response(
                    200,
                    json!([
                        { "id": "cal-1", "name": "Work", "isDefault": false },
                        { "id": "cal-2", "isDefault": true }
                    ]),
                ))
            });
        let api = api_with(transport);

        let mut manager = CalendarManager::new();
        manager.set_default(&api, "cal-2").await;
        assert_eq!(manager.default_calendar().map(|c| c.id.as_str()), Some("cal-2"));
    }

    #[tokio::test]
    async fn set_default_failure() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Err(ClientError::Network("Network Error".into())));
        let api = api_with(transport);

        let mut manager = CalendarManager::new();
        manager.set_default(&api, "cal-2").await;
        assert_eq!(manager.error, Some(DEFAULT_FAILED));
        assert!(!manager.is_busy());
    }

    #[tokio::test]
    async fn update_marks_calendar_pending_until_answered() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(json_response(200, json!({ "id": "cal-2", "selected": true }))));
        let api = api_with(transport);

        let steps = RefCell::new(Vec::new());
        set_selected(&api, "cal-2", true, &|action| steps.borrow_mut().push(action)).await;
        let steps = steps.into_inner();
        assert_eq!(steps[0], CalendarAction::Begin("cal-2".into()));
        assert_eq!(steps.len(), 2);

        let mut manager = CalendarManager::new();
        manager.apply(CalendarAction::Loaded(Ok(
            serde_json::from_value(two_calendars()).unwrap()
        )));
        manager.apply(steps[0].clone());
        assert!(manager.is_pending("cal-2"));
        assert!(!manager.is_pending("cal-1"));

        manager.apply(steps[1].clone());
        assert!(!manager.is_busy());
        assert!(manager.find("cal-2").unwrap().selected);
    }

    #[tokio::test]
    async fn successful_update_clears_earlier_failure() {
        let mut seq = Sequence::new();
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(ClientError::Network("Network Error".into())));
        transport
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(json_response(200, json!({ "id": "cal-1", "selected": false }))));
        let api = api_with(transport);

        let mut manager = CalendarManager::new();
        manager.apply(CalendarAction::Loaded(Ok(
            serde_json::from_value(two_calendars()).unwrap()
        )));
        manager.set_selected(&api, "cal-1", false).await;
        assert_eq!(manager.error, Some(UPDATE_FAILED));

        manager.set_selected(&api, "cal-1", false).await;
        assert_eq!(manager.error, None);
        assert!(!manager.find("cal-1").unwrap().selected);
    }
}
