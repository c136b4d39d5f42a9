use std::sync::Arc;

use anyhow::{self, Error as AnyhowError};
use helpdesk::{HelpdeskConfig, HelpdeskError, initialize};
use server::{AppState, routes};
use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use utils::logging::init_tracing;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Helpdesk(#[from] HelpdeskError),
    #[error(transparent)]
    Config(#[from] helpdesk::ConfigError),
    #[error("Invalid log filter: {0}")]
    Logging(#[from] ParseError),
    #[error(transparent)]
    Other(#[from] AnyhowError),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // Load environment variables from `.env` if present so local development picks up API keys
    dotenv::dotenv().ok();
    init_tracing()?;

    let config = HelpdeskConfig::load()?;
    let orchestrator = Arc::new(initialize(&config).await?);
    for warning in orchestrator.load_warnings(helpdesk::language::CANONICAL_LANGUAGE) {
        tracing::warn!("{}: {}", warning.message, warning.detail.unwrap_or_default());
    }

    let app_router = routes::router(AppState::new(orchestrator.clone()));

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.trim().parse::<u16>().ok())
        .unwrap_or_else(|| {
            tracing::info!("No PORT environment variable set, using {}", DEFAULT_PORT);
            DEFAULT_PORT
        });
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    let actual_port = listener.local_addr()?.port();

    tracing::info!("Server running on http://{host}:{actual_port}");

    axum::serve(listener, app_router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Keep translations fetched since the last turn-level flush
    orchestrator
        .translations()
        .flush()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to persist translation cache on shutdown: {}", e))?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
