//! Route handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use scout_core::{report, sort_by_score_desc};
use scout_runtime::{PipelineResult, RunParams};
use scout_tokens::UsageSummary;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::errors::ApiError;
use crate::state::AppState;

/// Build the application router.
///
/// `metrics_handle` is optional so tests can skip installing the global
/// Prometheus recorder.
pub fn build_router(state: Arc<AppState>, metrics_handle: Option<PrometheusHandle>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/api/runs", post(create_run))
        .route("/api/runs/last", get(last_run))
        .route("/api/report", get(last_report))
        .route("/api/usage", get(usage_summary))
        .route("/api/usage/reset", post(reset_usage));

    if let Some(handle) = metrics_handle {
        router = router.route(
            "/metrics",
            get(move || {
                let handle = handle.clone();
                async move { crate::metrics::render(&handle) }
            }),
        );
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "name": state.settings.name,
        "model": state.settings.provider.model,
    }))
}

/// Run the pipeline with the supplied parameters.
///
/// Blocks until the run finishes — invocations are minutes-scale remote
/// calls and the client asked for the result. Leads come back sorted by
/// score, highest first (stable for ties).
async fn create_run(
    State(state): State<Arc<AppState>>,
    Json(params): Json<RunParams>,
) -> Result<Json<PipelineResult>, ApiError> {
    info!(industry = %params.industry, country = %params.country, "run requested");
    let mut result = state.pipeline.run(&params).await?;
    sort_by_score_desc(&mut result.leads);
    *state.last_run.lock() = Some(result.clone());
    Ok(Json(result))
}

async fn last_run(State(state): State<Arc<AppState>>) -> Result<Json<PipelineResult>, ApiError> {
    state
        .last_run
        .lock()
        .clone()
        .map(Json)
        .ok_or(ApiError::NotFound("run"))
}

/// Markdown report for the most recent run.
async fn last_report(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let leads = {
        let guard = state.last_run.lock();
        guard.as_ref().map(|result| result.leads.clone())
    }
    .ok_or(ApiError::NotFound("run"))?;

    let markdown =
        report::render_markdown(&leads).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok((
        [(CONTENT_TYPE, "text/markdown; charset=utf-8")],
        markdown,
    )
        .into_response())
}

async fn usage_summary(State(state): State<Arc<AppState>>) -> Json<UsageSummary> {
    Json(state.tracker.summary())
}

async fn reset_usage(State(state): State<Arc<AppState>>) -> Json<UsageSummary> {
    state.tracker.reset();
    info!("usage tracker reset");
    Json(state.tracker.summary())
}
