//! HTTP service exposing the converter.
//!
//! Routes:
//!   POST /convert  `{"markdown": "..."}` → `.docx` attachment
//!   GET  /health   liveness probe
//!
//! The [`RequestGovernor`] is constructed once per process and shared with
//! every handler through the router state.

pub mod config;
pub mod error;
pub mod governor;
pub mod handler;

pub use config::ServerConfig;
pub use error::ApiError;
pub use governor::{Decision, RateLimitEntry, RequestGovernor};

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// State shared by all routes.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
    pub governor: Arc<RequestGovernor>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let governor = Arc::new(RequestGovernor::new(config.rate_limit, config.rate_window));
        Self { config, governor }
    }
}

/// Build the router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.body_limit();
    Router::new()
        .route("/convert", post(handler::convert))
        .route("/health", get(handler::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = %detail, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": error::INTERNAL_MESSAGE })),
    )
        .into_response()
}

/// Bind, start the sweeper and serve until the process exits.
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(config));
    let sweeper = state.governor.spawn_sweeper(state.config.sweep_interval);

    let addr = state.config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        addr = %addr,
        max_chars = state.config.max_chars,
        rate_limit = state.config.rate_limit,
        window_secs = state.config.rate_window.as_secs(),
        "HTTP API listening"
    );

    let app = build_router(state);
    let result = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await;

    sweeper.abort();
    result
}
