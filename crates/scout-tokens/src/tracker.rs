//! Session-wide usage accumulation.
//!
//! One [`UsageTracker`] lives for the whole process and is shared (via
//! `Arc`) across pipeline runs. Counters sit behind a mutex so concurrent
//! runs — e.g. multiple HTTP sessions in a hosted deployment — never lose
//! updates. The tracker accumulates until [`UsageTracker::reset`].

use parking_lot::Mutex;
use scout_core::TokenUsage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metrics_text::parse_usage_text;
use crate::pricing::calculate_cost;

/// Accumulated usage plus the cost estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    /// Total input tokens tracked since the last reset.
    pub input_tokens: u64,
    /// Total output tokens tracked since the last reset.
    pub output_tokens: u64,
    /// Estimated cost in USD under the tracker's model rates.
    pub total_cost: f64,
    /// True when the estimate is known to be incomplete: the model had no
    /// pricing entry, or some usage text could not be parsed.
    pub estimated: bool,
}

#[derive(Debug, Default)]
struct TrackerState {
    usage: TokenUsage,
    parse_failures: u64,
}

/// Process-wide token/cost accumulator.
#[derive(Debug)]
pub struct UsageTracker {
    model: String,
    state: Mutex<TrackerState>,
}

impl UsageTracker {
    /// Create a tracker pricing against `model`'s static rates.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            state: Mutex::new(TrackerState::default()),
        }
    }

    /// Accumulate one invocation's token counts.
    pub fn track(&self, input_tokens: u64, output_tokens: u64) {
        self.track_usage(TokenUsage::new(input_tokens, output_tokens));
    }

    /// Accumulate a [`TokenUsage`] record.
    pub fn track_usage(&self, usage: TokenUsage) {
        let mut state = self.state.lock();
        state.usage.add(usage);
        debug!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "usage tracked"
        );
    }

    /// Ingest a loosely structured usage text (`key=value` pairs).
    ///
    /// Unparseable text tracks zero and marks the summary partial; it
    /// never fails the caller.
    pub fn ingest_text(&self, text: &str) {
        let metrics = parse_usage_text(text);
        let parse_failed = !text.trim().is_empty() && !metrics.has_token_counts();
        let mut state = self.state.lock();
        state
            .usage
            .add(TokenUsage::new(metrics.prompt_tokens(), metrics.completion_tokens()));
        if parse_failed {
            state.parse_failures += 1;
        }
    }

    /// Current accumulated summary.
    pub fn summary(&self) -> UsageSummary {
        let state = self.state.lock();
        let cost = calculate_cost(&self.model, &state.usage);
        UsageSummary {
            input_tokens: state.usage.input_tokens,
            output_tokens: state.usage.output_tokens,
            total_cost: cost.unwrap_or(0.0),
            estimated: cost.is_none() || state.parse_failures > 0,
        }
    }

    /// Zero all counters.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        *state = TrackerState::default();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
