//! Best-effort parsing of usage-metrics text.
//!
//! The upstream framework exposes aggregate usage as a loosely structured
//! value whose textual form encodes `key=value` pairs separated by
//! whitespace, e.g.:
//!
//! ```text
//! prompt_tokens=120 completion_tokens=45 total_tokens=165 model=gpt-4
//! ```
//!
//! This is an external, unversioned format. The parser here is a heuristic
//! over it and must never throw: tokens without `=` are skipped, values
//! that fail integer coercion are kept as raw text, unknown keys are
//! preserved but not interpreted. Malformed input yields zero counters —
//! the accountant under-reports, it never fails.

use std::collections::BTreeMap;

use tracing::warn;

/// One parsed metric value: integer-coerced when possible, raw otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetricValue {
    /// Value coerced to a non-negative integer.
    Int(u64),
    /// Coercion failed; raw text preserved.
    Text(String),
}

impl MetricValue {
    /// The integer value, or 0 for text values.
    pub fn as_count(&self) -> u64 {
        match self {
            Self::Int(n) => *n,
            Self::Text(_) => 0,
        }
    }
}

/// All `key=value` pairs recovered from one usage text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedMetrics {
    /// Every recovered pair, in key order.
    pub values: BTreeMap<String, MetricValue>,
}

impl ParsedMetrics {
    /// Integer value for `key`, or 0 when absent or non-numeric.
    pub fn counter(&self, key: &str) -> u64 {
        self.values.get(key).map_or(0, MetricValue::as_count)
    }

    /// Prompt-side token count.
    pub fn prompt_tokens(&self) -> u64 {
        self.counter("prompt_tokens")
    }

    /// Completion-side token count.
    pub fn completion_tokens(&self) -> u64 {
        self.counter("completion_tokens")
    }

    /// Combined token count as reported (not derived).
    pub fn total_tokens(&self) -> u64 {
        self.counter("total_tokens")
    }

    /// Whether any recognized token counter was recovered.
    ///
    /// False means the text was unparseable or carried no counts; callers
    /// should treat downstream cost figures as partial.
    pub fn has_token_counts(&self) -> bool {
        ["prompt_tokens", "completion_tokens", "total_tokens"]
            .iter()
            .any(|key| matches!(self.values.get(*key), Some(MetricValue::Int(_))))
    }
}

/// Parse usage-metrics text into [`ParsedMetrics`].
///
/// Splits on whitespace, splits each token at the first `=`, attempts
/// integer coercion, and keeps the raw text value when coercion fails.
/// Never errors; malformed input yields an empty result (and a warning,
/// since cost reporting will under-count).
pub fn parse_usage_text(text: &str) -> ParsedMetrics {
    let mut values = BTreeMap::new();
    for token in text.split_whitespace() {
        let Some((key, value)) = token.split_once('=') else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        let parsed = value
            .parse::<u64>()
            .map_or_else(|_| MetricValue::Text(value.to_string()), MetricValue::Int);
        let _ = values.insert(key.to_string(), parsed);
    }

    let metrics = ParsedMetrics { values };
    if !text.trim().is_empty() && !metrics.has_token_counts() {
        warn!(
            text = scout_core::text::truncate_str(text, 200),
            "usage text carried no token counts; cost summary will be partial"
        );
    }
    metrics
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
