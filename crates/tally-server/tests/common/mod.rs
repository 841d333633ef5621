#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use std::sync::Arc;
use tally_server::app;
use tally_server::state::AppState;
use tally_storage::MemStorage;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower::util::ServiceExt;

pub struct TestContext {
    pub store: Arc<MemStorage>,
    pub state: AppState,
    pub app: axum::Router,
}

pub fn build_test_context() -> TestContext {
    let store = Arc::new(MemStorage::new());
    let state = AppState::new(store.clone());
    let app = app::build_http_app(state.clone());

    TestContext { store, state, app }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

pub async fn request(app: &axum::Router, method: &str, uri: &str) -> TestResponse {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");

    let resp = app
        .clone()
        .oneshot(req)
        .await
        .expect("router should respond");

    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");

    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).to_string(),
    }
}

/// A server bound to an ephemeral loopback port.
pub struct RunningServer {
    pub store: Arc<MemStorage>,
    pub base_url: String,
    pub shutdown: CancellationToken,
    pub handle: JoinHandle<anyhow::Result<()>>,
}

impl RunningServer {
    pub async fn stop(self) {
        self.shutdown.cancel();
        self.handle
            .await
            .expect("server task should not panic")
            .expect("server should shut down cleanly");
    }
}

pub async fn spawn_server() -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener
        .local_addr()
        .expect("listener should have an address");

    let store = Arc::new(MemStorage::new());
    let state = AppState::new(store.clone());
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(app::serve(listener, state, shutdown.clone()));

    RunningServer {
        store,
        base_url: format!("http://{addr}"),
        shutdown,
        handle,
    }
}
