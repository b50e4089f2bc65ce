//! Google Calendar integration panel: connection status, sync and disconnect.

use std::cell::RefCell;

use shared::{DisconnectResponse, Integration, SyncResult};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::format;
use crate::oauth;
use crate::storage::SessionStore;
use crate::transport::Transport;

pub const GOOGLE_PROVIDER: &str = "google";

pub const LOAD_FAILED: &str = "Failed to load integrations";
pub const SYNC_CALENDARS_FAILED: &str = "Failed to sync calendars";
pub const SYNC_EVENTS_FAILED: &str = "Failed to sync events";
pub const DISCONNECT_FAILED: &str = "Failed to disconnect Google Calendar";

/// Request currently outstanding from the panel's buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOp {
    Connecting,
    SyncingCalendars,
    SyncingEvents,
    Disconnecting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationAction {
    Loading,
    Loaded(Result<Vec<Integration>, ClientError>),
    Begin(PanelOp),
    ConnectFailed(ClientError),
    CalendarsSynced(Result<SyncResult, ClientError>),
    EventsSynced(Result<SyncResult, ClientError>),
    Disconnected(Result<DisconnectResponse, ClientError>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrationPanel {
    pub integrations: Vec<Integration>,
    pub loading: bool,
    pub pending: Option<PanelOp>,
    pub last_sync: Option<SyncResult>,
    pub error: Option<&'static str>,
}

impl IntegrationPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn google(&self) -> Option<&Integration> {
        self.integrations
            .iter()
            .find(|i| i.provider == GOOGLE_PROVIDER)
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn apply(&mut self, action: IntegrationAction) {
        match action {
            IntegrationAction::Loading => {
                self.loading = true;
                self.error = None;
            }
            IntegrationAction::Loaded(Ok(integrations)) => {
                self.loading = false;
                self.integrations = integrations;
            }
            IntegrationAction::Loaded(Err(e)) => {
                tracing::warn!(error = %e, "loading integrations failed");
                self.loading = false;
                self.error = Some(LOAD_FAILED);
            }
            IntegrationAction::Begin(op) => {
                self.error = None;
                self.pending = Some(op);
            }
            IntegrationAction::ConnectFailed(e) => {
                tracing::warn!(error = %e, "starting google connection failed");
                self.pending = None;
                self.error = Some(oauth::CONNECT_START_FAILED);
            }
            IntegrationAction::CalendarsSynced(result) => {
                self.finish_sync(result, SYNC_CALENDARS_FAILED)
            }
            IntegrationAction::EventsSynced(result) => self.finish_sync(result, SYNC_EVENTS_FAILED),
            IntegrationAction::Disconnected(Ok(response)) => {
                tracing::info!(message = %response.message, "google calendar disconnected");
                self.pending = None;
                self.last_sync = None;
            }
            IntegrationAction::Disconnected(Err(e)) => {
                tracing::warn!(error = %e, "disconnect failed");
                self.pending = None;
                self.error = Some(DISCONNECT_FAILED);
            }
        }
    }

    fn finish_sync(&mut self, result: Result<SyncResult, ClientError>, failure: &'static str) {
        self.pending = None;
        match result {
            Ok(sync) => self.last_sync = Some(sync),
            Err(e) => {
                tracing::warn!(error = %e, "{}", failure);
                self.error = Some(failure);
            }
        }
    }

    pub async fn load<T: Transport>(&mut self, api: &ApiClient<T>) {
        let panel = RefCell::new(self);
        load(api, &|action| panel.borrow_mut().apply(action)).await;
    }

    /// Start the consent flow; returns the URL to navigate to on success
    pub async fn connect<T, S>(
        &mut self,
        api: &ApiClient<T>,
        store: &S,
        origin: &str,
    ) -> Option<String>
    where
        T: Transport,
        S: SessionStore + ?Sized,
    {
        let panel = RefCell::new(self);
        connect(api, store, origin, &|action| panel.borrow_mut().apply(action)).await
    }

    pub async fn sync_calendars<T: Transport>(&mut self, api: &ApiClient<T>) {
        let panel = RefCell::new(self);
        sync_calendars(api, &|action| panel.borrow_mut().apply(action)).await;
    }

    pub async fn sync_events<T: Transport>(&mut self, api: &ApiClient<T>) {
        let panel = RefCell::new(self);
        sync_events(api, &|action| panel.borrow_mut().apply(action)).await;
    }

    pub async fn disconnect<T: Transport>(&mut self, api: &ApiClient<T>) {
        let panel = RefCell::new(self);
        disconnect(api, &|action| panel.borrow_mut().apply(action)).await;
    }
}

// Request sequences behind the panel's buttons; each step goes to `dispatch`.

pub async fn load<T, D>(api: &ApiClient<T>, dispatch: &D)
where
    T: Transport,
    D: Fn(IntegrationAction),
{
    dispatch(IntegrationAction::Loading);
    dispatch(IntegrationAction::Loaded(api.list_integrations().await));
}

pub async fn connect<T, S, D>(
    api: &ApiClient<T>,
    store: &S,
    origin: &str,
    dispatch: &D,
) -> Option<String>
where
    T: Transport,
    S: SessionStore + ?Sized,
    D: Fn(IntegrationAction),
{
    dispatch(IntegrationAction::Begin(PanelOp::Connecting));
    match oauth::start_connect(api, store, origin).await {
        Ok(url) => Some(url),
        Err(e) => {
            dispatch(IntegrationAction::ConnectFailed(e));
            None
        }
    }
}

/// Pull the calendar list, then reload the connection status
pub async fn sync_calendars<T, D>(api: &ApiClient<T>, dispatch: &D)
where
    T: Transport,
    D: Fn(IntegrationAction),
{
    dispatch(IntegrationAction::Begin(PanelOp::SyncingCalendars));
    let result = api.sync_calendars().await;
    let synced = result.is_ok();
    dispatch(IntegrationAction::CalendarsSynced(result));
    if synced {
        load(api, dispatch).await;
    }
}

pub async fn sync_events<T, D>(api: &ApiClient<T>, dispatch: &D)
where
    T: Transport,
    D: Fn(IntegrationAction),
{
    dispatch(IntegrationAction::Begin(PanelOp::SyncingEvents));
    dispatch(IntegrationAction::EventsSynced(api.sync_events().await));
}

/// Remove the connection, then reload so the panel offers to connect again
pub async fn disconnect<T, D>(api: &ApiClient<T>, dispatch: &D)
where
    T: Transport,
    D: Fn(IntegrationAction),
{
    dispatch(IntegrationAction::Begin(PanelOp::Disconnecting));
    let result = api.disconnect_google().await;
    let disconnected = result.is_ok();
    dispatch(IntegrationAction::Disconnected(result));
    if disconnected {
        load(api, dispatch).await;
    }
}

/// Human-readable lines describing a sync result
pub fn sync_summary(result: &SyncResult) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(count) = result.synced_calendars {
        lines.push(format!("Synced {} calendars", count));
    }
    if let Some(calendars) = &result.calendars {
        lines.extend(
            calendars
                .iter()
                .map(|c| c.name.clone().unwrap_or_else(|| c.id.clone())),
        );
    }
    if let Some(count) = result.synced_events {
        lines.push(format!("Synced {} events", count));
    }
    lines
}

/// "Connected on 2025-08-13", plus the expiry when the token has one
pub fn connection_label(integration: &Integration) -> String {
    let mut label = format!("Connected on {}", format::date(&integration.connected_at));
    if let Some(expires_at) = &integration.expires_at {
        label.push_str(&format!(" (expires {})", format::date(expires_at)));
    }
    label
}
