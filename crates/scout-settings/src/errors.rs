//! Settings error types.

use thiserror::Error;

/// Result alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON, or does not match the schema.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// Pipeline wiring is structurally invalid.
    #[error("invalid pipeline configuration: {0}")]
    Invalid(String),
}
