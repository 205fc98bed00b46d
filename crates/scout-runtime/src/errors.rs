//! Pipeline error types.
//!
//! Fatal errors abort the run and name the failing stage. The outcomes of
//! stages that completed before the failure ride along on the error so the
//! caller can still inspect them — a failed run discards nothing that
//! already happened.

use scout_llm::CapabilityError;
use thiserror::Error;

use crate::result::StageOutcome;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required input parameter was absent or empty. Raised before any
    /// capability is invoked.
    #[error("missing required input '{name}'")]
    MissingInput {
        /// Parameter name.
        name: &'static str,
    },

    /// A stage's raw output could not be parsed into its declared
    /// contract. The pipeline halts at that stage; no retry.
    #[error("stage '{stage}' produced unparseable output: {message}")]
    StageOutput {
        /// Failing stage id.
        stage: String,
        /// What went wrong with the output.
        message: String,
        /// Outcomes of stages that completed before the failure.
        completed: Vec<StageOutcome>,
    },

    /// A stage's capability failed outright (transport, auth, provider).
    #[error("stage '{stage}' failed: {source}")]
    Capability {
        /// Failing stage id.
        stage: String,
        /// Underlying capability error.
        #[source]
        source: CapabilityError,
        /// Outcomes of stages that completed before the failure.
        completed: Vec<StageOutcome>,
    },

    /// Stage list is structurally unusable (bad context reference,
    /// duplicate id, wrong final contract).
    #[error("invalid pipeline: {0}")]
    Invalid(String),
}

impl PipelineError {
    /// Outcomes of the stages that completed before the failure.
    pub fn completed_stages(&self) -> &[StageOutcome] {
        match self {
            Self::StageOutput { completed, .. } | Self::Capability { completed, .. } => completed,
            Self::MissingInput { .. } | Self::Invalid(_) => &[],
        }
    }

    /// Id of the failing stage, when the failure is stage-scoped.
    pub fn stage(&self) -> Option<&str> {
        match self {
            Self::StageOutput { stage, .. } | Self::Capability { stage, .. } => Some(stage),
            Self::MissingInput { .. } | Self::Invalid(_) => None,
        }
    }
}
