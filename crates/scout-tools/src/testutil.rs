//! Test doubles shared by this crate's unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::errors::ToolError;
use crate::http::{HttpClient, HttpResponse};
use crate::tool::{ResearchTool, ToolDefinition};

/// HTTP client returning one canned response for every request.
pub struct StaticHttpClient {
    status: u16,
    body: String,
    requests: AtomicUsize,
    last: Mutex<Option<(String, Vec<(String, String)>)>>,
}

impl StaticHttpClient {
    /// Client answering 200 with `body`.
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    /// Client answering `status` with `body`.
    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            requests: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    /// Number of requests observed.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// URL and headers of the most recent request.
    pub fn last_request(&self) -> (String, Vec<(String, String)>) {
        self.last
            .lock()
            .unwrap()
            .clone()
            .expect("no request recorded")
    }

    fn record(&self, url: &str, headers: &[(&str, &str)]) -> HttpResponse {
        let _ = self.requests.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((
            url.to_string(),
            headers
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        ));
        HttpResponse {
            status: self.status,
            body: self.body.clone(),
        }
    }
}

#[async_trait]
impl HttpClient for StaticHttpClient {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, ToolError> {
        Ok(self.record(url, headers))
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        _body: &Value,
    ) -> Result<HttpResponse, ToolError> {
        Ok(self.record(url, headers))
    }
}

/// Tool that echoes its `message` parameter.
pub struct EchoTool {
    name: String,
}

impl EchoTool {
    /// Echo tool registered under `name`.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl ResearchTool for EchoTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: "Echo the message back.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {"message": {"type": "string"}},
                "required": ["message"]
            }),
        }
    }

    async fn execute(&self, params: Value) -> Result<String, ToolError> {
        Ok(params
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}
