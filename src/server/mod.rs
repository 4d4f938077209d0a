//! HTTP server exposing a finished graph.
//!
//! - `GET /analyze`: the `{nodesList, edgesList}` JSON document
//! - `GET /graph`: the embedded graph viewer page
//! - `GET /`: redirects to `/graph`

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect};
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::analyze::AnalysisResult;

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 3000;

const VIEWER_HTML: &str = include_str!("../../public/index.html");

#[derive(Clone)]
struct ServerState {
    analysis_json: Arc<String>,
}

/// Builds the router serving `result`.
pub fn router(result: &AnalysisResult) -> serde_json::Result<Router> {
    let state = ServerState {
        analysis_json: Arc::new(serde_json::to_string(result)?),
    };

    Ok(Router::new()
        .route("/", get(|| async { Redirect::temporary("/graph") }))
        .route("/analyze", get(analysis))
        .route("/graph", get(viewer))
        .layer(CorsLayer::permissive())
        .with_state(state))
}

/// Serves `result` on `127.0.0.1:port` until Ctrl-C.
pub async fn serve(result: &AnalysisResult, port: u16) -> std::io::Result<()> {
    let app = router(result)?;

    let addr: SocketAddr = ([127, 0, 0, 1], port).into();
    let listener = TcpListener::bind(addr).await?;

    info!("Try http://localhost:{}/graph on your browser.", addr.port());
    info!("Press Ctrl+C to quit.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

async fn analysis(State(state): State<ServerState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        state.analysis_json.as_ref().clone(),
    )
}

async fn viewer() -> Html<&'static str> {
    Html(VIEWER_HTML)
}
