use crate::state::AppState;
use crate::{api, logging};
use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub fn build_http_app(state: AppState) -> Router {
    api::routes()
        .with_state(state)
        .layer(middleware::from_fn(logging::request_logging))
}

/// Serves the HTTP app on `listener` until `shutdown` is cancelled, then
/// drains in-flight requests and returns.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    let app = build_http_app(state);

    tracing::info!(http = %addr, "Server started");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;
    tracing::info!("Server stopped");

    Ok(())
}
