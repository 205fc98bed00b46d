//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scout_runtime::PipelineError;
use serde_json::json;

/// Errors a handler can answer with.
#[derive(Debug)]
pub enum ApiError {
    /// A pipeline run failed.
    Pipeline(PipelineError),
    /// The requested resource does not exist yet.
    NotFound(&'static str),
    /// Rendering or serialization failed server-side.
    Internal(String),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self::Pipeline(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Pipeline(err) => pipeline_error_response(&err),
            Self::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("{what} not found") })),
            )
                .into_response(),
            Self::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}

/// Map a pipeline failure to a status and a body that names the failing
/// stage and carries the completed stage outcomes for inspection.
fn pipeline_error_response(err: &PipelineError) -> Response {
    let status = match err {
        PipelineError::MissingInput { .. } => StatusCode::BAD_REQUEST,
        PipelineError::StageOutput { .. } | PipelineError::Capability { .. } => {
            StatusCode::BAD_GATEWAY
        }
        PipelineError::Invalid(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = json!({
        "error": err.to_string(),
        "stage": err.stage(),
        "completedStages": err.completed_stages(),
    });
    (status, Json(body)).into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
