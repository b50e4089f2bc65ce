//! The seam between the API client and whatever actually speaks HTTP.
//!
//! The browser build plugs in a gloo-net transport, the terminal client and
//! integration tests use [`ReqwestTransport`]. Futures are not required to be
//! `Send` since browser fetches never are.

use std::fmt;

use async_trait::async_trait;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved request. A present body is always JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn content_type(&self) -> Option<&'static str> {
        self.body.as_ref().map(|_| "application/json")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait Transport {
    /// Send the request. Only failures to get any response are errors here;
    /// status handling belongs to the caller.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError>;
}

#[cfg(feature = "native")]
pub use self::native::ReqwestTransport;

#[cfg(feature = "native")]
mod native {
    use async_trait::async_trait;
    use reqwest::header::CONTENT_TYPE;

    use super::{HttpRequest, HttpResponse, Method, Transport};
    use crate::error::ClientError;

    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        http: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_client(http: reqwest::Client) -> Self {
            Self { http }
        }
    }

    #[async_trait(?Send)]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
                Method::Put => reqwest::Method::PUT,
                Method::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.http.request(method, &request.url);
            if let (Some(content_type), Some(body)) = (request.content_type(), request.body) {
                builder = builder.header(CONTENT_TYPE, content_type).body(body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;

            Ok(HttpResponse { status, body })
        }
    }
}
