//! Pipeline result types.
//!
//! A [`PipelineResult`] is created fresh per run and holds no cross-run
//! state; the caller extracts, displays, or exports it and lets it drop.

use scout_core::{LeadRecord, TokenUsage};
use serde::{Deserialize, Serialize};

/// One completed stage: what it produced and what it cost.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageOutcome {
    /// Stage id.
    pub stage: String,
    /// Raw textual output, exactly as the capability returned it.
    pub raw_output: String,
    /// Token usage for this stage's invocation.
    pub usage: TokenUsage,
    /// Wall-clock duration of the invocation.
    pub duration_ms: u64,
}

/// The result of one full pipeline run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    /// Per-stage outcomes, in execution order.
    pub stages: Vec<StageOutcome>,
    /// The final stage's schema-validated lead records.
    pub leads: Vec<LeadRecord>,
    /// Aggregated token usage across all stages.
    pub usage: TokenUsage,
}
