use anyhow::Result;
use std::sync::Arc;
use tally_server::app;
use tally_server::config::ServerConfig;
use tally_server::state::AppState;
use tally_storage::MemStorage;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tally=info".parse()?))
        .init();

    let config_path = std::env::args().nth(1);
    let config = ServerConfig::load_or_default(config_path.as_deref(), "config/server.toml")?;

    tracing::info!(address = %config.address, "tally-server starting");

    let listener = tokio::net::TcpListener::bind(&config.address).await?;
    let state = AppState::new(Arc::new(MemStorage::new()));

    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        tracing::info!("Shutting down gracefully");
        on_signal.cancel();
    });

    app::serve(listener, state, shutdown).await
}
