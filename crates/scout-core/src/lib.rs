//! # scout-core
//!
//! Foundation types for the Scout lead-prospecting pipeline.
//!
//! This crate provides the shared vocabulary that all other Scout crates
//! depend on:
//!
//! - **Lead schema**: [`lead::LeadRecord`] and its lenient field coercion
//! - **Token usage**: [`usage::TokenUsage`] per-invocation counters
//! - **Reports**: [`report`] markdown/JSON export of a finished lead set
//! - **Text**: [`text`] code-fence stripping and UTF-8–safe truncation
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other scout crates.

#![deny(unsafe_code)]

pub mod lead;
pub mod report;
pub mod text;
pub mod usage;

pub use lead::{DecisionMaker, LeadRecord, Location, sort_by_score_desc};
pub use usage::TokenUsage;
