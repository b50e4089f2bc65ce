use client::{ClientError, SessionStore};
use gloo::storage::{SessionStorage, Storage};

/// `window.sessionStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSession;

impl SessionStore for BrowserSession {
    fn get(&self, key: &str) -> Option<String> {
        SessionStorage::get(key).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        SessionStorage::set(key, value).map_err(|e| ClientError::Storage(e.to_string()))
    }

    fn remove(&self, key: &str) {
        SessionStorage::delete(key);
    }
}
