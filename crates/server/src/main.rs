use std::sync::Arc;

use anyhow::Context;
use node_files_core::FileManager;
use node_files_server::session::MemorySessionStore;
use node_files_server::{AppState, ServerConfig, create_app};
use node_proxy::DaemonClient;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "panel.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("PANEL_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    info!("starting node file manager");
    info!(path = %config_path, "loading server config");
    let config = ServerConfig::from_file(&config_path)
        .with_context(|| format!("failed to load server config from {config_path}"))?;

    let client = DaemonClient::from_config(&config.proxy())
        .context("failed to initialize daemon client")?;
    let sessions = MemorySessionStore::from_config(&config.sessions)
        .context("failed to load configured sessions")?;

    let session_count = sessions.len().await;
    if session_count == 0 {
        warn!("no sessions configured, every request will be rejected");
    } else {
        info!(count = session_count, "sessions loaded");
    }

    let files = FileManager::new(Arc::new(client), config.editable());
    let state = Arc::new(AppState::new(files, Arc::new(sessions)));
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(addr = %config.bind, "server is ready, press Ctrl+C to shut down");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, stopping server");
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
