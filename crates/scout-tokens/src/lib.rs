//! # scout-tokens
//!
//! Usage accounting for the Scout pipeline.
//!
//! Cost estimation here is advisory: it degrades silently (to zero) rather
//! than ever failing the caller's primary result.
//!
//! - [`pricing`] — static per-model rate table and cost calculation
//! - [`metrics_text`] — best-effort `key=value` usage-text ingestion
//! - [`tracker`] — session-wide accumulation with an explicit reset
//!
//! # Usage
//!
//! ```text
//! let tracker = UsageTracker::new("gpt-4o-mini");
//! tracker.track(1000, 500);
//! let summary = tracker.summary();
//! ```

#![deny(unsafe_code)]

pub mod metrics_text;
pub mod pricing;
pub mod tracker;

pub use metrics_text::{MetricValue, ParsedMetrics, parse_usage_text};
pub use pricing::calculate_cost;
pub use tracker::{UsageSummary, UsageTracker};
