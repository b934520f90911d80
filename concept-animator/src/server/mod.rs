//! HTTP service exposing content selection.
//!
//! Routes:
//! - `POST /generate-educational-video`: select a video for a concept
//! - `GET /health`: liveness and version

mod error;
mod handlers;

pub use error::{ApiError, ApiResult};
pub use handlers::HealthResponse;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::HeaderName;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::errors::AnimatorError;
use crate::library::ContentSelector;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Selection function.
    pub selector: Arc<ContentSelector>,
}

/// Builds the service router with CORS and request tracing.
pub fn router(selector: Arc<ContentSelector>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ]);

    Router::new()
        .route("/generate-educational-video", post(handlers::generate_video))
        .route("/health", get(handlers::health_check))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(AppState { selector })
}

/// Binds `config.host:config.port` and serves until the process stops.
pub async fn serve(config: &ServerConfig, selector: Arc<ContentSelector>) -> Result<(), AnimatorError> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| AnimatorError::Internal(format!("Invalid bind address: {e}")))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "selection service listening");

    axum::serve(listener, router(selector)).await?;
    Ok(())
}
