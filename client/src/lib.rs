//! Platform-neutral core of the Schedule Concierge client.
//!
//! Holds the HTTP client over a pluggable [`Transport`], and the view state
//! machines shared by the Yew frontend and the `concierge` terminal client.

pub mod api;
pub mod calendars;
pub mod error;
pub mod format;
pub mod forms;
pub mod integrations;
pub mod oauth;
pub mod page;
pub mod slots;
pub mod storage;
pub mod transport;

pub use api::{ApiClient, DEFAULT_SLOT_LIMIT};
pub use calendars::{CalendarAction, CalendarManager};
pub use error::{ClientError, ClientResult};
pub use forms::{EventForm, EventFormAction, Notice, Phase, TaskForm, TaskFormAction};
pub use integrations::{IntegrationAction, IntegrationPanel, PanelOp};
pub use oauth::{CallbackParams, CallbackStatus};
pub use page::{PageAction, PageState, Tab};
pub use slots::{SlotAction, SlotRecommendation, SlotView};
pub use storage::{MemoryStore, SessionStore};
pub use transport::{HttpRequest, HttpResponse, Method, Transport};

#[cfg(feature = "native")]
pub use transport::ReqwestTransport;
