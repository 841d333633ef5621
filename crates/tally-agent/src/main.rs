use anyhow::Result;
use tally_agent::config::AgentConfig;
use tally_agent::Agent;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tally=info".parse()?))
        .init();

    let config_path = std::env::args().nth(1);
    let config = AgentConfig::load_or_default(config_path.as_deref(), "config/agent.toml")?;

    tracing::info!(
        server = %config.server_url(),
        poll_interval_secs = config.poll_interval_secs,
        report_interval_secs = config.report_interval_secs,
        "tally-agent starting"
    );

    let agent = Agent::from_config(&config, tally_collector::default_collectors())?;

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

    agent.run(shutdown).await
}
