//! Tool error types.

use thiserror::Error;

/// Errors raised by research tool execution.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("http error: {message}")]
    Http {
        /// Error description.
        message: String,
    },

    /// The remote API answered with a non-success status.
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },

    /// The model supplied unusable parameters.
    #[error("invalid tool parameters: {0}")]
    InvalidParams(String),

    /// Tool requires credentials that are not configured.
    #[error("missing credential: {0}")]
    MissingCredential(String),
}
