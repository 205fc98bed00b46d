//! # scout-tools
//!
//! Research tools the pipeline's agents can call: web search (Serper-style
//! JSON API) and website scraping. Tools are referenced by name from agent
//! configuration and exposed to the model as chat functions.
//!
//! All HTTP goes through the [`http::HttpClient`] trait so tests can
//! inject canned responses.

#![deny(unsafe_code)]

pub mod errors;
pub mod http;
pub mod scrape;
pub mod search;
pub mod tool;

pub use errors::ToolError;
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use scrape::ScrapeWebsiteTool;
pub use search::WebSearchTool;
pub use tool::{ResearchTool, ToolDefinition, ToolSet};

#[cfg(test)]
pub(crate) mod testutil;
