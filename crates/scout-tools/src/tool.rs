//! The research-tool trait and named tool sets.
//!
//! Agents bind tools by name in configuration; the capability layer looks
//! them up here and exposes their definitions to the model as chat
//! functions.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::errors::ToolError;

/// Function-call definition for one tool, as sent to the model.
#[derive(Clone, Debug, Serialize)]
pub struct ToolDefinition {
    /// Tool name (the function name the model calls).
    pub name: String,
    /// Natural-language description of what the tool does.
    pub description: String,
    /// JSON Schema for the parameters object.
    pub parameters: Value,
}

/// One research tool callable by an agent.
#[async_trait]
pub trait ResearchTool: Send + Sync {
    /// Tool name, matching the `tools` entries in agent settings.
    fn name(&self) -> &str;

    /// Function-call definition sent to the model.
    fn definition(&self) -> ToolDefinition;

    /// Execute with model-supplied parameters, returning text for the
    /// model to read.
    async fn execute(&self, params: Value) -> Result<String, ToolError>;
}

/// A named collection of tools.
#[derive(Clone, Default)]
pub struct ToolSet {
    tools: BTreeMap<String, Arc<dyn ResearchTool>>,
}

impl ToolSet {
    /// Empty tool set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name. Replaces any previous tool
    /// with the same name.
    pub fn register(&mut self, tool: Arc<dyn ResearchTool>) {
        let _ = self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ResearchTool>> {
        self.tools.get(name)
    }

    /// The subset of this set named by `names`, preserving name order.
    ///
    /// Unknown names are skipped with a warning — a persona asking for a
    /// tool that is not registered should not take the pipeline down.
    pub fn subset(&self, names: &[String]) -> Self {
        let mut subset = Self::new();
        for name in names {
            match self.tools.get(name) {
                Some(tool) => subset.register(Arc::clone(tool)),
                None => tracing::warn!(tool = %name, "unknown tool in agent binding, skipped"),
            }
        }
        subset
    }

    /// Definitions for every tool in the set.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|tool| tool.definition()).collect()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Number of tools in the set.
    pub fn len(&self) -> usize {
        self.tools.len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
