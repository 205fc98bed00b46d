//! `web_search` tool — Serper-style search API integration.
//!
//! POSTs `{"q": ..., "num": ...}` to the `/search` endpoint with the API
//! key in the `X-API-KEY` header and formats organic results as a numbered
//! markdown list the model can read.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use scout_settings::SearchToolSettings;

use crate::errors::ToolError;
use crate::http::HttpClient;
use crate::tool::{ResearchTool, ToolDefinition};

const MAX_QUERY_LENGTH: usize = 400;

/// Web search over a Serper-style JSON API.
pub struct WebSearchTool {
    http: Arc<dyn HttpClient>,
    settings: SearchToolSettings,
}

impl WebSearchTool {
    /// Create the tool from its settings and an HTTP client.
    pub fn new(http: Arc<dyn HttpClient>, settings: SearchToolSettings) -> Self {
        Self { http, settings }
    }
}

#[async_trait]
impl ResearchTool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "web_search".to_string(),
            description: "Search the web. Returns a numbered list of results with title, URL, \
                          and snippet. Use specific queries; one focused query beats several \
                          vague ones."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query (max 400 chars)"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, params: Value) -> Result<String, ToolError> {
        let query = params
            .get("query")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| ToolError::InvalidParams("'query' is required".to_string()))?;

        if query.len() > MAX_QUERY_LENGTH {
            return Err(ToolError::InvalidParams(format!(
                "query too long: {} chars (max {MAX_QUERY_LENGTH})",
                query.len()
            )));
        }

        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ToolError::MissingCredential("search api key".to_string()))?;

        let url = format!("{}/search", self.settings.base_url.trim_end_matches('/'));
        let body = json!({"q": query, "num": self.settings.result_count});
        let headers = [("X-API-KEY", api_key), ("Content-Type", "application/json")];

        debug!(query, "web search");
        let response = self.http.post_json(&url, &headers, &body).await?;
        if response.status != 200 {
            return Err(ToolError::Api {
                status: response.status,
                message: scout_core::text::truncate_with_suffix(&response.body, 300, "..."),
            });
        }

        let parsed: Value = serde_json::from_str(&response.body).map_err(|e| ToolError::Api {
            status: response.status,
            message: format!("unparseable search response: {e}"),
        })?;
        Ok(format_organic_results(&parsed))
    }
}

fn format_organic_results(body: &Value) -> String {
    let Some(results) = body.get("organic").and_then(Value::as_array) else {
        return "No results found.".to_string();
    };
    if results.is_empty() {
        return "No results found.".to_string();
    }

    results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let title = result.get("title").and_then(Value::as_str).unwrap_or("");
            let link = result.get("link").and_then(Value::as_str).unwrap_or("");
            let snippet = result.get("snippet").and_then(Value::as_str).unwrap_or("");
            format!("{}. [{}]({})\n   {}", i + 1, title, link, snippet)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
