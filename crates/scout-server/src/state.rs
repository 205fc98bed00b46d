//! Shared application state.

use parking_lot::Mutex;
use scout_runtime::{Pipeline, PipelineResult};
use scout_settings::ScoutSettings;
use scout_tokens::UsageTracker;
use std::sync::Arc;

/// Everything the handlers share, passed by reference into the router.
pub struct AppState {
    /// Immutable settings snapshot taken at startup.
    pub settings: Arc<ScoutSettings>,
    /// The wired pipeline. Stateless between runs.
    pub pipeline: Arc<Pipeline>,
    /// Session-wide usage accountant, shared across concurrent runs.
    pub tracker: Arc<UsageTracker>,
    /// Most recent run's result, for `/api/runs/last` and `/api/report`.
    pub last_run: Mutex<Option<PipelineResult>>,
}

impl AppState {
    /// Assemble state from its parts.
    pub fn new(
        settings: Arc<ScoutSettings>,
        pipeline: Arc<Pipeline>,
        tracker: Arc<UsageTracker>,
    ) -> Self {
        Self {
            settings,
            pipeline,
            tracker,
            last_run: Mutex::new(None),
        }
    }
}
