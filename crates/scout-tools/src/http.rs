//! HTTP client abstraction for tools.
//!
//! Tools never hold a concrete client: they take an `Arc<dyn HttpClient>`
//! so tests can substitute canned responses without a network.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ToolError;

/// A minimal HTTP response: status plus body text.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, decoded as text.
    pub body: String,
}

/// Minimal async HTTP surface the tools need.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET a URL with optional headers.
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, ToolError>;

    /// POST a JSON body with optional headers.
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> Result<HttpResponse, ToolError>;
}

/// Production [`HttpClient`] backed by `reqwest`.
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Build a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, ToolError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ToolError::Http {
                message: format!("failed to build http client: {e}"),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, ToolError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        Ok(HttpResponse { status, body })
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> Result<HttpResponse, ToolError> {
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        Ok(HttpResponse { status, body })
    }
}

fn transport_error(e: reqwest::Error) -> ToolError {
    ToolError::Http {
        message: e.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
