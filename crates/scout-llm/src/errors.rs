//! Capability error types.

use thiserror::Error;

/// Errors raised while invoking a capability.
///
/// Retryability is classified for the caller's benefit, but the pipeline
/// itself never retries — a failed stage fails the run.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// HTTP request failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// No credentials configured for the provider.
    #[error("auth error: {message}")]
    Auth {
        /// Error description.
        message: String,
    },

    /// Provider returned an API error.
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },

    /// The model produced no usable output.
    #[error("empty completion: {message}")]
    EmptyCompletion {
        /// Error description.
        message: String,
    },
}

impl CapabilityError {
    /// Whether a retry at some outer layer could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::Json(_) | Self::Auth { .. } | Self::EmptyCompletion { .. } => false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
