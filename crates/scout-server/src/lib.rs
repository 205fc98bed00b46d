//! # scout-server
//!
//! The HTTP surface over the Scout pipeline. The core exposes plain data
//! (`run()` results, usage summaries, rendered reports); this crate is the
//! caller — input collection, status codes, and serialization live here
//! and nowhere deeper.
//!
//! Application state is explicit: one [`state::AppState`] holds the
//! settings snapshot, the wired pipeline, the shared usage tracker, and
//! the last run. No ambient globals.

#![deny(unsafe_code)]

pub mod errors;
pub mod metrics;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
