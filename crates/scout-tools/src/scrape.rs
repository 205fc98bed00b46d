//! `scrape_website` tool — fetch a page and extract readable text.
//!
//! Uses `scraper` for title extraction and `html2text` for the body,
//! capped at a configurable byte budget so one long page cannot flood the
//! model's context.

use std::sync::Arc;

use async_trait::async_trait;
use scraper::{Html, Selector};
use serde_json::{Value, json};
use tracing::debug;

use scout_core::text::truncate_with_suffix;
use scout_settings::ScrapeToolSettings;

use crate::errors::ToolError;
use crate::http::HttpClient;
use crate::tool::{ResearchTool, ToolDefinition};

/// Website scraper producing markdown-ish text.
pub struct ScrapeWebsiteTool {
    http: Arc<dyn HttpClient>,
    settings: ScrapeToolSettings,
}

impl ScrapeWebsiteTool {
    /// Create the tool from its settings and an HTTP client.
    pub fn new(http: Arc<dyn HttpClient>, settings: ScrapeToolSettings) -> Self {
        Self { http, settings }
    }
}

#[async_trait]
impl ResearchTool for ScrapeWebsiteTool {
    fn name(&self) -> &str {
        "scrape_website"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "scrape_website".to_string(),
            description: "Fetch a web page and return its readable text content. Use after \
                          web_search to read a promising result in full."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "Absolute http(s) URL of the page to read"
                    }
                },
                "required": ["url"]
            }),
        }
    }

    async fn execute(&self, params: Value) -> Result<String, ToolError> {
        let url = params
            .get("url")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ToolError::InvalidParams("'url' is required".to_string()))?;

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ToolError::InvalidParams(format!(
                "url must be absolute http(s), got '{url}'"
            )));
        }

        debug!(url, "scraping page");
        let response = self.http.get(url, &[("Accept", "text/html")]).await?;
        if !(200..300).contains(&response.status) {
            return Err(ToolError::Api {
                status: response.status,
                message: format!("fetch failed for {url}"),
            });
        }

        Ok(extract_text(&response.body, self.settings.max_bytes))
    }
}

/// Extract a title line plus readable body text, within `max_bytes`.
fn extract_text(html: &str, max_bytes: usize) -> String {
    let document = Html::parse_document(html);
    let title = extract_title(&document);

    let body = html2text::from_read(html.as_bytes(), 80).unwrap_or_default();
    let body = truncate_with_suffix(body.trim(), max_bytes, "\n[truncated]");

    if title.is_empty() {
        body
    } else {
        format!("# {title}\n\n{body}")
    }
}

fn extract_title(doc: &Html) -> String {
    if let Some(title_el) = Selector::parse("title")
        .ok()
        .and_then(|s| doc.select(&s).next())
    {
        let text = title_el.text().collect::<String>().trim().to_string();
        if !text.is_empty() {
            return text;
        }
    }

    if let Some(h1) = Selector::parse("h1")
        .ok()
        .and_then(|s| doc.select(&s).next())
    {
        return h1.text().collect::<String>().trim().to_string();
    }

    String::new()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::StaticHttpClient;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn extracts_title_and_body() {
        let html = "<html><head><title>Acme Robotics</title></head>\
                    <body><h1>Welcome</h1><p>We build industrial robots.</p></body></html>";
        let http = Arc::new(StaticHttpClient::ok(html));
        let tool = ScrapeWebsiteTool::new(http, ScrapeToolSettings::default());
        let out = tool
            .execute(json!({"url": "https://acme.example"}))
            .await
            .unwrap();
        assert!(out.starts_with("# Acme Robotics"));
        assert!(out.contains("industrial robots"));
    }

    #[tokio::test]
    async fn long_pages_are_truncated_to_budget() {
        let html = format!("<html><body><p>{}</p></body></html>", "word ".repeat(10_000));
        let http = Arc::new(StaticHttpClient::ok(&html));
        let settings = ScrapeToolSettings {
            max_bytes: 512,
            ..Default::default()
        };
        let tool = ScrapeWebsiteTool::new(http, settings);
        let out = tool
            .execute(json!({"url": "https://long.example"}))
            .await
            .unwrap();
        assert!(out.len() < 700);
        assert!(out.ends_with("[truncated]"));
    }

    #[tokio::test]
    async fn relative_url_is_rejected() {
        let http = Arc::new(StaticHttpClient::ok(""));
        let tool = ScrapeWebsiteTool::new(http.clone(), ScrapeToolSettings::default());
        let err = tool.execute(json!({"url": "/about"})).await.unwrap_err();
        assert_matches!(err, ToolError::InvalidParams(_));
        assert_eq!(http.request_count(), 0);
    }

    #[tokio::test]
    async fn http_error_status_surfaces() {
        let http = Arc::new(StaticHttpClient::status(503, "maintenance"));
        let tool = ScrapeWebsiteTool::new(http, ScrapeToolSettings::default());
        let err = tool
            .execute(json!({"url": "https://down.example"}))
            .await
            .unwrap_err();
        assert_matches!(err, ToolError::Api { status: 503, .. });
    }

    #[test]
    fn malformed_html_is_best_effort() {
        let out = extract_text("<div><p>Unclosed<b>Bold</div>", 1024);
        assert!(out.contains("Unclosed") || out.contains("Bold"));
    }
}
