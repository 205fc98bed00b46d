//! The pipeline executor — a plain interpreter loop over the stage list.
//!
//! Execution is strictly sequential: a stage's context is assembled only
//! from stages that have already completed, because later prompts
//! semantically depend on earlier textual output. Nothing here is safe to
//! parallelize across stages, and that is the point — deterministic,
//! auditable ordering over throughput.
//!
//! Failure policy: fail fast on empty inputs (before any capability call),
//! halt on the first stage whose output cannot meet its contract, never
//! retry. Completed outcomes ride along on the error.

use std::sync::Arc;
use std::time::Instant;

use metrics::counter;
use scout_core::lead::LeadRecord;
use scout_core::text::{strip_code_fences, truncate_with_suffix};
use scout_core::usage::TokenUsage;
use scout_llm::CapabilityRequest;
use scout_settings::OutputKind;
use scout_tokens::UsageTracker;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::errors::PipelineError;
use crate::result::{PipelineResult, StageOutcome};
use crate::stage::StageDefinition;

/// The two free-text run parameters.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RunParams {
    /// Industry to research.
    pub industry: String,
    /// Country to research.
    pub country: String,
}

/// A configured, immutable pipeline.
///
/// Construct once per configuration; run any number of times. The
/// pipeline itself is stateless between runs — the only shared state is
/// the optional [`UsageTracker`].
#[derive(Debug)]
pub struct Pipeline {
    stages: Vec<StageDefinition>,
    tracker: Option<Arc<UsageTracker>>,
}

impl Pipeline {
    /// Build a pipeline from an ordered stage list.
    ///
    /// Rejects structurally broken lists (the same checks settings
    /// validation runs, re-applied here because stages can also be built
    /// programmatically): empty list, duplicate ids, context references
    /// to anything but an earlier stage, or a final stage that does not
    /// produce lead records.
    pub fn new(stages: Vec<StageDefinition>) -> Result<Self, PipelineError> {
        if stages.is_empty() {
            return Err(PipelineError::Invalid("pipeline has no stages".to_string()));
        }
        let mut seen: Vec<&str> = Vec::with_capacity(stages.len());
        for stage in &stages {
            if seen.contains(&stage.id.as_str()) {
                return Err(PipelineError::Invalid(format!(
                    "duplicate stage id '{}'",
                    stage.id
                )));
            }
            for context_id in &stage.context {
                if !seen.contains(&context_id.as_str()) {
                    return Err(PipelineError::Invalid(format!(
                        "stage '{}' references '{}' which is not an earlier stage",
                        stage.id, context_id
                    )));
                }
            }
            seen.push(&stage.id);
        }
        if stages.last().expect("checked non-empty").output != OutputKind::LeadRecords {
            return Err(PipelineError::Invalid(
                "final stage must produce lead records".to_string(),
            ));
        }
        Ok(Self {
            stages,
            tracker: None,
        })
    }

    /// Attach a shared usage tracker.
    ///
    /// Each stage's usage is tracked as the stage completes, so a run that
    /// fails midway still accounts for the stages that ran.
    #[must_use]
    pub fn with_tracker(mut self, tracker: Arc<UsageTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// Stage count.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages (never true after `new`).
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run the pipeline.
    ///
    /// On success every lead in the result is fully schema-shaped; no raw
    /// untyped value reaches the caller. On failure the error names the
    /// failing stage and carries the completed outcomes.
    #[instrument(skip_all, fields(industry = %params.industry, country = %params.country))]
    pub async fn run(&self, params: &RunParams) -> Result<PipelineResult, PipelineError> {
        let industry = params.industry.trim();
        let country = params.country.trim();
        if industry.is_empty() {
            return Err(PipelineError::MissingInput { name: "industry" });
        }
        if country.is_empty() {
            return Err(PipelineError::MissingInput { name: "country" });
        }

        counter!("scout_runs_started").increment(1);
        let mut outcomes: Vec<StageOutcome> = Vec::with_capacity(self.stages.len());
        let mut total_usage = TokenUsage::default();
        let mut leads: Vec<LeadRecord> = Vec::new();

        for stage in &self.stages {
            let context = stage
                .context
                .iter()
                .map(|id| {
                    outcomes
                        .iter()
                        .find(|outcome| outcome.stage == *id)
                        .map(|outcome| outcome.raw_output.clone())
                        .expect("context ids validated against earlier stages")
                })
                .collect();
            let request = CapabilityRequest {
                industry: industry.to_string(),
                country: country.to_string(),
                context,
            };

            info!(stage = %stage.id, "stage started");
            let started = Instant::now();
            let outcome = match stage.capability.invoke(&request).await {
                Ok(outcome) => outcome,
                Err(source) => {
                    counter!("scout_runs_failed").increment(1);
                    warn!(stage = %stage.id, error = %source, "stage capability failed");
                    return Err(PipelineError::Capability {
                        stage: stage.id.clone(),
                        source,
                        completed: outcomes,
                    });
                }
            };
            let duration_ms = started.elapsed().as_millis() as u64;

            if let Some(tracker) = &self.tracker {
                tracker.track_usage(outcome.usage);
            }
            total_usage.add(outcome.usage);

            if stage.output == OutputKind::LeadRecords {
                leads = match parse_lead_records(&outcome.raw_output) {
                    Ok(leads) => leads,
                    Err(message) => {
                        counter!("scout_runs_failed").increment(1);
                        warn!(stage = %stage.id, %message, "stage output failed validation");
                        return Err(PipelineError::StageOutput {
                            stage: stage.id.clone(),
                            message,
                            completed: outcomes,
                        });
                    }
                };
            }

            info!(
                stage = %stage.id,
                duration_ms,
                input_tokens = outcome.usage.input_tokens,
                output_tokens = outcome.usage.output_tokens,
                "stage completed"
            );
            outcomes.push(StageOutcome {
                stage: stage.id.clone(),
                raw_output: outcome.raw_output,
                usage: outcome.usage,
                duration_ms,
            });
        }

        counter!("scout_runs_completed").increment(1);
        Ok(PipelineResult {
            stages: outcomes,
            leads,
            usage: total_usage,
        })
    }
}

/// Parse a stage's raw output as a sequence of lead records.
///
/// The output must be a JSON array (markdown fences are stripped first).
/// Non-mapping elements are dropped with a warning; mapping elements
/// coerce field-by-field, nulling what fails. Only a structurally
/// unparseable output is an error.
fn parse_lead_records(raw: &str) -> Result<Vec<LeadRecord>, String> {
    let stripped = strip_code_fences(raw);
    let value: Value = serde_json::from_str(stripped).map_err(|e| {
        format!(
            "not valid JSON ({e}): {}",
            truncate_with_suffix(stripped, 200, "...")
        )
    })?;
    let Some(items) = value.as_array() else {
        return Err("expected a JSON sequence of records".to_string());
    };

    let leads = items
        .iter()
        .filter_map(|item| {
            let lead = LeadRecord::from_value(item);
            if lead.is_none() {
                warn!("non-mapping record in stage output dropped");
            }
            lead
        })
        .collect();
    Ok(leads)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
