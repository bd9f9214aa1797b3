use models::Settings;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::{router::create_router, state::AppState};

pub const DEFAULT_LOG_FILTER: &str = "backend_api=debug,ledger_engine=debug,tower_http=debug";

/// Log filter precedence: `RUST_LOG`, then the configured filter, then the built-in default.
pub fn log_filter(settings: &Settings) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        settings
            .log_filter
            .as_deref()
            .unwrap_or(DEFAULT_LOG_FILTER)
            .into()
    })
}

/// Run the API server
pub async fn run_server(
    state: AppState,
    settings: &Settings,
    static_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(settings))
        .init();

    let app = create_router(state, static_dir);

    let addr = format!("{}:{}", settings.server.host, settings.server.port).parse::<SocketAddr>()?;
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
