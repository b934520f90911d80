use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::remote::{ErrorPayload, MSG_INTERNAL, MSG_MISSING_FIELDS};

/// Errors returned by the selection service handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// `id`, `title` or `education_level` was missing or empty.
    #[error("Missing required fields")]
    MissingFields,

    /// Anything else, including an unparsable body.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, payload) = match self {
            ApiError::MissingFields => (
                StatusCode::BAD_REQUEST,
                ErrorPayload {
                    error: MSG_MISSING_FIELDS.to_string(),
                    details: None,
                },
            ),
            ApiError::Internal(details) => {
                tracing::error!(error = %details, "selection request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorPayload {
                        error: MSG_INTERNAL.to_string(),
                        details: Some(details),
                    },
                )
            }
        };

        (status, axum::Json(payload)).into_response()
    }
}
