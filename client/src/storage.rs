use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::ClientError;

/// Session key holding the pending OAuth anti-forgery state
pub const OAUTH_STATE_KEY: &str = "oauth_state";

/// Short-lived, session-scoped key/value storage.
///
/// The browser implementation is backed by `sessionStorage`; [`MemoryStore`]
/// serves the terminal client and tests.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
