//! # scout-llm
//!
//! The capability layer: everything between a pipeline stage and the model.
//!
//! - [`capability::Capability`] — the opaque executor interface a stage
//!   invokes; the pipeline never looks inside
//! - [`chat`] — OpenAI-compatible chat-completions client (JSON, no
//!   streaming)
//! - [`agent::AgentCapability`] — the production capability: persona +
//!   task prompt assembly and a bounded tool-call loop
//!
//! ## Crate Position
//!
//! Depends on scout-core, scout-settings, scout-tools.
//! Depended on by scout-runtime (through the `Capability` trait only).

#![deny(unsafe_code)]

pub mod agent;
pub mod capability;
pub mod chat;
pub mod errors;

pub use agent::AgentCapability;
pub use capability::{Capability, CapabilityOutcome, CapabilityRequest};
pub use chat::{ChatClient, ChatMessage};
pub use errors::CapabilityError;
