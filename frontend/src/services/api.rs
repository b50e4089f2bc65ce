use async_trait::async_trait;
use client::{ApiClient, ClientError, HttpRequest, HttpResponse, Method, Transport};
use gloo_net::http::{Request, RequestBuilder};
use yew::prelude::*;

use crate::config;

pub type Api = ApiClient<GlooTransport>;

/// Browser `fetch` transport
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let builder: RequestBuilder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };

        let sent = match (request.content_type(), request.body) {
            (Some(content_type), Some(body)) => builder
                .header("Content-Type", content_type)
                .body(body)
                .map_err(|e| ClientError::Encode(e.to_string()))?
                .send()
                .await,
            _ => builder.send().await,
        };
        let response = sent.map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

pub fn client() -> Api {
    ApiClient::new(config::api_base_url(), GlooTransport)
}

/// The app-wide client, or a fresh one outside the provider
#[hook]
pub fn use_api() -> Api {
    use_context::<Api>().unwrap_or_else(client)
}
