//! Typed wrapper over the scheduling backend's REST endpoints.

use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    AuthUrlResponse, Calendar, ConnectRequest, CreateEventRequest, CreateTaskRequest,
    DisconnectResponse, ErrorEnvelope, Event, Integration, ListCalendarsResponse,
    ListIntegrationsResponse, SlotSuggestionResponse, SyncResult, Task, UpdateCalendarRequest,
};

use crate::error::{ClientError, ClientResult};
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

/// Default number of slot suggestions requested per fetch
pub const DEFAULT_SLOT_LIMIT: u32 = 5;

/// HTTP client bound to one backend base address.
///
/// Cloning is cheap: the transport is shared.
pub struct ApiClient<T> {
    base_url: Rc<str>,
    transport: Rc<T>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: Rc::clone(&self.base_url),
            transport: Rc::clone(&self.transport),
        }
    }
}

impl<T> PartialEq for ApiClient<T> {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && Rc::ptr_eq(&self.transport, &other.transport)
    }
}

impl<T> fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: impl AsRef<str>, transport: T) -> Self {
        Self {
            base_url: Rc::from(base_url.as_ref().trim_end_matches('/')),
            transport: Rc::new(transport),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> ClientResult<R> {
        self.request(Method::Get, path, None).await
    }

    pub async fn post<B, R>(&self, path: &str, body: Option<&B>) -> ClientResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = body.map(encode).transpose()?;
        self.request(Method::Post, path, body).await
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> ClientResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = encode(body)?;
        self.request(Method::Put, path, Some(body)).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> ClientResult<R> {
        self.request(Method::Delete, path, None).await
    }

    async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> ClientResult<R> {
        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            body,
        };

        tracing::debug!(%method, path, "sending request");
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%method, path, error = %e, "request failed");
                return Err(e);
            }
        };

        if !response.ok() {
            let err = api_error(&response);
            tracing::warn!(%method, path, status = response.status, error = %err, "backend rejected request");
            return Err(err);
        }

        tracing::debug!(%method, path, status = response.status, "request completed");
        let text = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(text).map_err(|e| ClientError::Decode(e.to_string()))
    }

    // ------------------------------------------------------------------------
    // Tasks, events and slots
    // ------------------------------------------------------------------------

    pub async fn create_task(&self, request: &CreateTaskRequest) -> ClientResult<Task> {
        self.post("/tasks", Some(request)).await
    }

    pub async fn create_event(&self, request: &CreateEventRequest) -> ClientResult<Event> {
        self.post("/events", Some(request)).await
    }

    pub async fn suggest_slots(
        &self,
        task_id: &str,
        limit: u32,
    ) -> ClientResult<SlotSuggestionResponse> {
        let path = format!(
            "/slots/suggest?taskId={}&limit={}",
            urlencoding::encode(task_id),
            limit
        );
        self.get(&path).await
    }

    // ------------------------------------------------------------------------
    // Google integration
    // ------------------------------------------------------------------------

    pub async fn list_integrations(&self) -> ClientResult<Vec<Integration>> {
        let response: ListIntegrationsResponse = self.get("/integrations/").await?;
        Ok(response.integrations)
    }

    pub async fn google_auth_url(&self, redirect_uri: &str) -> ClientResult<AuthUrlResponse> {
        let path = format!(
            "/integrations/google/auth-url?redirect_uri={}",
            urlencoding::encode(redirect_uri)
        );
        self.get(&path).await
    }

    pub async fn connect_google(&self, code: &str, redirect_uri: &str) -> ClientResult<Integration> {
        let request = ConnectRequest {
            code: code.to_string(),
            redirect_uri: redirect_uri.to_string(),
        };
        self.post("/integrations/google/connect", Some(&request)).await
    }

    pub async fn sync_calendars(&self) -> ClientResult<SyncResult> {
        self.post::<(), _>("/integrations/google/sync-calendars", None)
            .await
    }

    pub async fn sync_events(&self) -> ClientResult<SyncResult> {
        self.post::<(), _>("/integrations/google/sync-events", None)
            .await
    }

    pub async fn disconnect_google(&self) -> ClientResult<DisconnectResponse> {
        self.delete("/integrations/google/disconnect").await
    }

    // ------------------------------------------------------------------------
    // Calendars
    // ------------------------------------------------------------------------

    pub async fn list_calendars(&self) -> ClientResult<ListCalendarsResponse> {
        self.get("/calendars").await
    }

    pub async fn update_calendar(
        &self,
        calendar_id: &str,
        patch: &UpdateCalendarRequest,
    ) -> ClientResult<Calendar> {
        let path = format!("/calendars/{}", urlencoding::encode(calendar_id));
        self.put(&path, patch).await
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> ClientResult<String> {
    serde_json::to_string(body).map_err(|e| ClientError::Encode(e.to_string()))
}

/// Turn a non-2xx response into an error identified by the envelope's code,
/// falling back to a status-derived code when the body is not an envelope.
fn api_error(response: &HttpResponse) -> ClientError {
    match serde_json::from_str::<ErrorEnvelope>(&response.body) {
        Ok(envelope) => ClientError::Api {
            status: response.status,
            code: envelope.detail.code,
            message: envelope.detail.message,
            trace_id: envelope.detail.trace_id,
        },
        Err(_) => ClientError::Api {
            status: response.status,
            code: ClientError::status_code(response.status),
            message: None,
            trace_id: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{api_with, json_response};
    use crate::transport::MockTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn get_has_no_body_and_joins_base_url() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                req.method == Method::Get
                    && req.url == "http://localhost:8000/calendars"
                    && req.body.is_none()
                    && req.content_type().is_none()
            })
            .times(1)
            .returning(|_| Ok(json_response(200, json!([]))));

        let api = ApiClient::new("http://localhost:8000/", transport);
        let calendars = api.list_calendars().await.unwrap();
        assert!(calendars.is_empty());
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                let body: serde_json::Value =
                    serde_json::from_str(req.body.as_deref().unwrap_or("null")).unwrap();
                req.method == Method::Post
                    && req.url.ends_with("/tasks")
                    && req.content_type() == Some("application/json")
                    && body == json!({ "title": "Test Task", "priority": 1 })
            })
            .times(1)
            .returning(|_| {
                Ok(json_response(
                    201,
                    json!({ "id": "task-123", "title": "Test Task", "priority": 1, "status": "Draft" }),
                ))
            });

        let api = api_with(transport);
        let request = CreateTaskRequest {
            title: "Test Task".into(),
            priority: Some(1),
            estimated_minutes: None,
            due_at: None,
            energy_tag: None,
        };
        let task = api.create_task(&request).await.unwrap();
        assert_eq!(task.id, "task-123");
    }

    #[tokio::test]
    async fn envelope_code_becomes_error_identity() {
        let mut transport = MockTransport::new();
        transport.expect_send().returning(|_| {
            Ok(json_response(
                422,
                json!({ "detail": { "code": "VALIDATION_ERROR", "message": "Title is required", "traceId": "trace-123" } }),
            ))
        });

        let err = api_with(transport).get::<Task>("/tasks/x").await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Api {
                status: 422,
                code: "VALIDATION_ERROR".into(),
                message: Some("Title is required".into()),
                trace_id: Some("trace-123".into()),
            }
        );
    }

    #[tokio::test]
    async fn unparseable_error_body_gets_status_code() {
        let mut transport = MockTransport::new();
        transport.expect_send().returning(|_| {
            Ok(HttpResponse {
                status: 502,
                body: "<html>Bad Gateway</html>".into(),
            })
        });

        let err = api_with(transport).list_calendars().await.unwrap_err();
        assert_eq!(err.code(), Some("HTTP_502"));
    }

    #[tokio::test]
    async fn network_failure_is_propagated_as_is() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Err(ClientError::Network("Network Error".into())));

        let err = api_with(transport).list_calendars().await.unwrap_err();
        assert_eq!(err, ClientError::Network("Network Error".into()));
    }

    #[tokio::test]
    async fn suggest_slots_encodes_query() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| req.url == "http://localhost:8000/slots/suggest?taskId=task%20123&limit=5")
            .returning(|_| Ok(json_response(200, json!({ "taskId": "task 123", "slots": [] }))));

        let response = api_with(transport)
            .suggest_slots("task 123", DEFAULT_SLOT_LIMIT)
            .await
            .unwrap();
        assert!(response.slots.is_empty());
    }

    #[tokio::test]
    async fn empty_success_body_decodes_as_unit() {
        let mut transport = MockTransport::new();
        transport.expect_send().returning(|_| {
            Ok(HttpResponse {
                status: 204,
                body: String::new(),
            })
        });

        api_with(transport).delete::<()>("/events/1").await.unwrap();
    }

    #[tokio::test]
    async fn mismatched_success_body_is_a_decode_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Ok(json_response(200, json!({ "unexpected": true }))));

        let err = api_with(transport).list_calendars().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
