//! Stage definitions.
//!
//! A stage is a plain tagged value: id, opaque capability reference,
//! upstream context ids, output contract. The executor interprets the
//! list — there is no agent class hierarchy and no per-stage behavior
//! beyond what these four fields declare.

use std::sync::Arc;

use scout_llm::Capability;
use scout_settings::OutputKind;

/// One step of the sequential pipeline.
#[derive(Clone)]
pub struct StageDefinition {
    /// Stage identifier, unique within the pipeline.
    pub id: String,
    /// The opaque external executor this stage invokes.
    pub capability: Arc<dyn Capability>,
    /// Ids of earlier stages whose raw outputs are injected as context,
    /// in declared order.
    pub context: Vec<String>,
    /// Declared output contract.
    pub output: OutputKind,
}

impl StageDefinition {
    /// Build a stage definition.
    pub fn new(
        id: impl Into<String>,
        capability: Arc<dyn Capability>,
        context: Vec<String>,
        output: OutputKind,
    ) -> Self {
        Self {
            id: id.into(),
            capability,
            context,
            output,
        }
    }
}

impl std::fmt::Debug for StageDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageDefinition")
            .field("id", &self.id)
            .field("context", &self.context)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}
