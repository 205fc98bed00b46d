//! Production pipeline wiring.
//!
//! Turns validated settings into a runnable [`Pipeline`]: one
//! [`AgentCapability`] per task, with the agent's named tools bound from
//! the shared tool set. Wiring happens once at startup; the resulting
//! pipeline is immutable.

use std::sync::Arc;
use std::time::Duration;

use scout_llm::{AgentCapability, CapabilityError, ChatClient};
use scout_settings::{ScoutSettings, SettingsError};
use scout_tokens::UsageTracker;
use scout_tools::{HttpClient, ReqwestClient, ScrapeWebsiteTool, ToolError, ToolSet, WebSearchTool};
use thiserror::Error;
use tracing::info;

use crate::errors::PipelineError;
use crate::executor::Pipeline;
use crate::stage::StageDefinition;

/// Errors raised while wiring the production pipeline.
#[derive(Debug, Error)]
pub enum WiringError {
    /// Settings failed validation.
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    /// The chat client could not be constructed (usually missing creds).
    #[error("capability setup error: {0}")]
    Capability(#[from] CapabilityError),

    /// A tool could not be constructed.
    #[error("tool setup error: {0}")]
    Tool(#[from] ToolError),

    /// The assembled stage list was rejected by the executor.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Build the production pipeline described by `settings`.
pub fn build_pipeline(
    settings: &ScoutSettings,
    tracker: Option<Arc<UsageTracker>>,
) -> Result<Pipeline, WiringError> {
    settings.validate()?;

    let client = Arc::new(ChatClient::new(settings.provider.clone())?);
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new(Duration::from_millis(
        settings.tools.scrape.timeout_ms,
    ))?);

    let mut tools = ToolSet::new();
    tools.register(Arc::new(WebSearchTool::new(
        Arc::clone(&http),
        settings.tools.search.clone(),
    )));
    tools.register(Arc::new(ScrapeWebsiteTool::new(
        http,
        settings.tools.scrape.clone(),
    )));

    let stages = settings
        .tasks
        .iter()
        .map(|task| {
            let agent = settings
                .agents
                .get(&task.agent)
                .expect("agent references validated")
                .clone();
            let capability = AgentCapability::new(
                Arc::clone(&client),
                agent,
                task,
                &tools,
                settings.provider.max_tool_iterations,
            );
            StageDefinition::new(
                task.id.clone(),
                Arc::new(capability),
                task.context.clone(),
                task.output,
            )
        })
        .collect();

    let mut pipeline = Pipeline::new(stages)?;
    if let Some(tracker) = tracker {
        pipeline = pipeline.with_tracker(tracker);
    }
    info!(stages = pipeline.len(), model = %settings.provider.model, "pipeline wired");
    Ok(pipeline)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
