//! Wire contracts shared by the browser frontend and the terminal client.
//!
//! Everything here mirrors the JSON the scheduling backend produces and
//! accepts. Field names follow the backend: camelCase for tasks, events, slots
//! and calendars, snake_case for integrations.

pub mod api;
pub mod models;
pub mod timestamp;

pub use api::*;
pub use models::*;
