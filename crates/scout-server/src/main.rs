//! Scout server binary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use scout_server::{AppState, build_router};
use scout_tokens::UsageTracker;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Lead-prospecting pipeline server.
#[derive(Parser)]
#[command(name = "scout-server", version)]
struct Cli {
    /// Path to a settings JSON file (defaults compiled in when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind address override, e.g. `0.0.0.0:8090`.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Arc::new(scout_settings::load_settings(cli.config.as_deref())?);
    let tracker = Arc::new(UsageTracker::new(settings.provider.model.clone()));
    let pipeline = Arc::new(scout_runtime::build_pipeline(
        &settings,
        Some(Arc::clone(&tracker)),
    )?);

    let metrics_handle = scout_server::metrics::install_recorder();
    let state = Arc::new(AppState::new(
        Arc::clone(&settings),
        pipeline,
        Arc::clone(&tracker),
    ));
    let app = build_router(state, Some(metrics_handle));

    let bind = cli
        .bind
        .unwrap_or_else(|| format!("{}:{}", settings.server.bind, settings.server.port));
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(%bind, model = %settings.provider.model, "scout server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("scout server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
