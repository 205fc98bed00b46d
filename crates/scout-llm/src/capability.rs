//! The opaque capability interface a pipeline stage invokes.
//!
//! A capability receives the run parameters and the upstream context and
//! returns raw text plus token usage. What happens inside — prompting,
//! tool calls, remote latency — is entirely its own business; the
//! executor never looks past this boundary.

use async_trait::async_trait;
use scout_core::TokenUsage;

use crate::errors::CapabilityError;

/// Inputs to one capability invocation.
#[derive(Clone, Debug)]
pub struct CapabilityRequest {
    /// Industry under research.
    pub industry: String,
    /// Country under research.
    pub country: String,
    /// Raw outputs of the declared upstream stages, in declared order.
    pub context: Vec<String>,
}

/// Result of one capability invocation.
#[derive(Clone, Debug)]
pub struct CapabilityOutcome {
    /// Raw textual output, before any schema validation.
    pub raw_output: String,
    /// Token usage for the whole invocation (all round trips included).
    pub usage: TokenUsage,
}

/// An opaque external executor bound to one stage.
#[async_trait]
pub trait Capability: Send + Sync {
    /// Execute against the given request.
    ///
    /// May block for minutes and may fail; the caller treats both as
    /// facts of life. Retrying is this layer's prerogative — the pipeline
    /// above never retries.
    async fn invoke(&self, request: &CapabilityRequest) -> Result<CapabilityOutcome, CapabilityError>;
}
