//! Google Calendar OAuth: starting the consent flow and finishing it on the
//! callback route.
//!
//! The anti-forgery state returned with the authorization URL is kept in
//! session storage until the callback comes back. It is consumed by the first
//! verification attempt whether or not it matches.

use serde::Deserialize;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::storage::{SessionStore, OAUTH_STATE_KEY};
use crate::transport::Transport;

pub const CALLBACK_PATH: &str = "/oauth/callback";
/// Delay before leaving the callback page after a successful connection
pub const REDIRECT_DELAY_MS: u32 = 2000;

pub const CONNECT_START_FAILED: &str = "Failed to start Google connection";
pub const PROCESSING: &str = "Processing OAuth callback...";
pub const INVALID_STATE: &str = "Invalid state parameter";
pub const NO_CODE: &str = "No authorization code received";
pub const CONNECTED: &str = "Google Calendar connected successfully!";
pub const CONNECT_FAILED: &str = "Failed to connect Google Calendar";
pub const RETURN_LABEL: &str = "Return to Main Page";

/// Callback address for an app served at `origin`
pub fn redirect_uri(origin: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), CALLBACK_PATH)
}

/// Ask the backend for a consent URL and remember its state for the callback.
///
/// Returns the URL the browser should navigate to.
pub async fn start_connect<T, S>(
    api: &ApiClient<T>,
    store: &S,
    origin: &str,
) -> ClientResult<String>
where
    T: Transport,
    S: SessionStore + ?Sized,
{
    let response = api.google_auth_url(&redirect_uri(origin)).await?;
    store.set(OAUTH_STATE_KEY, &response.state)?;
    tracing::info!("redirecting to Google consent screen");
    Ok(response.authorization_url)
}

/// Query parameters Google appends to the callback URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackStatus {
    Processing,
    Success,
    Error(String),
}

impl CallbackStatus {
    pub fn message(&self) -> &str {
        match self {
            Self::Processing => PROCESSING,
            Self::Success => CONNECTED,
            Self::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Verify the callback and exchange the code.
///
/// Google-reported errors stop before the stored state is touched. Otherwise
/// the stored state is removed, and only an exact match proceeds to a single
/// connect call.
pub async fn complete_callback<T, S>(
    api: &ApiClient<T>,
    store: &S,
    origin: &str,
    params: &CallbackParams,
) -> CallbackStatus
where
    T: Transport,
    S: SessionStore + ?Sized,
{
    if let Some(error) = &params.error {
        tracing::warn!(%error, "consent screen returned an error");
        return CallbackStatus::Error(format!("OAuth error: {}", error));
    }

    let stored = store.get(OAUTH_STATE_KEY);
    store.remove(OAUTH_STATE_KEY);
    match (&params.state, &stored) {
        (Some(received), Some(expected)) if received == expected => {}
        _ => {
            tracing::warn!(has_stored = stored.is_some(), "oauth state mismatch");
            return CallbackStatus::Error(INVALID_STATE.to_string());
        }
    }

    let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
        return CallbackStatus::Error(NO_CODE.to_string());
    };

    match api.connect_google(code, &redirect_uri(origin)).await {
        Ok(integration) => {
            tracing::info!(integration_id = %integration.id, "google calendar connected");
            CallbackStatus::Success
        }
        Err(e) => CallbackStatus::Error(e.message().unwrap_or(CONNECT_FAILED).to_string()),
    }
}
