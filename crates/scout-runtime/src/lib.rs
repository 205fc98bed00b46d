//! # scout-runtime
//!
//! The sequential pipeline executor.
//!
//! A pipeline is a list of [`stage::StageDefinition`]s interpreted in
//! declared order — no dependency inference, no parallel fan-out, no
//! virtual dispatch. Each stage invokes its opaque capability with the run
//! parameters plus the concatenated raw outputs of its declared upstream
//! stages, then validates the raw output against its declared contract.
//!
//! - **Stage**: id, capability reference, upstream context ids, contract
//! - **Executor**: fail-fast input check, interpreter loop, per-stage
//!   validation, partial-outcome carriage on failure
//! - **Wiring**: builds the production pipeline from settings
//!
//! ## Crate Position
//!
//! Aggregation layer. Depends on: scout-core, scout-settings, scout-llm,
//! scout-tools, scout-tokens. Depended on by: scout-server.

#![deny(unsafe_code)]

pub mod errors;
pub mod executor;
pub mod result;
pub mod stage;
pub mod wiring;

pub use errors::PipelineError;
pub use executor::{Pipeline, RunParams};
pub use result::{PipelineResult, StageOutcome};
pub use stage::StageDefinition;
pub use wiring::{WiringError, build_pipeline};
