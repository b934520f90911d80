use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::remote::{GenerateVideoRequest, GenerateVideoResponse};

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /generate-educational-video
///
/// The body is parsed by hand so a malformed body answers with the service's
/// own 500 payload instead of axum's rejection.
pub async fn generate_video(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<GenerateVideoResponse>> {
    let request: GenerateVideoRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::Internal(e.to_string()))?;
    let (id, title, level) = request.required_fields().ok_or(ApiError::MissingFields)?;

    info!(request_id = %id, title, level, "generating educational video");

    let selection = state
        .selector
        .select(title, request.description.as_deref(), level)
        .map_err(|_| ApiError::MissingFields)?;

    Ok(Json(GenerateVideoResponse::generated(selection.video_url)))
}
