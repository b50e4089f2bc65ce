//! Client-side error type.
//!
//! Every failure a view can see goes through [`ClientError`]. Backend
//! rejections keep the machine-readable code from the error envelope so views
//! can branch on it (focus protection) while everything else collapses into a
//! generic message.

use shared::FOCUS_PROTECTED;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The request never produced a response
    #[error("{0}")]
    Network(String),

    /// Non-2xx response; `code` is the failure identity
    #[error("{code}")]
    Api {
        status: u16,
        code: String,
        message: Option<String>,
        trace_id: Option<String>,
    },

    /// 2xx response whose body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to serialize request: {0}")]
    Encode(String),

    /// Session storage refused a write
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Code synthesized when an error body carries no envelope
    pub fn status_code(status: u16) -> String {
        format!("HTTP_{}", status)
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Backend-provided human message, if the envelope had one
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    pub fn is_focus_protected(&self) -> bool {
        self.code() == Some(FOCUS_PROTECTED)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
