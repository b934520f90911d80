//! Error types for the concept animator.
//!
//! Each failure class of the generation pipeline has its own error type so
//! callers can tell a rejected form apart from a store outage or a failed
//! remote selection call. [`AnimatorError`] ties them together.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::core::RequestStatus;

/// The main error type for concept animator operations.
#[derive(Debug, Error)]
pub enum AnimatorError {
    /// Input was rejected before any side effect.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The request store rejected or failed a read or write.
    #[error("{0}")]
    Persistence(#[from] PersistenceError),

    /// The remote content generation call failed.
    #[error("{0}")]
    RemoteCall(#[from] RemoteCallError),

    /// The video library failed validation.
    #[error("{0}")]
    Library(#[from] LibraryError),

    /// Configuration could not be loaded.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// A generation run is already in flight on this runner.
    #[error("A generation run is already in progress")]
    RunInProgress,

    /// A generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnimatorError {
    /// Returns a short machine-readable code for the error class.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
            Self::RemoteCall(_) => "REMOTE_CALL_ERROR",
            Self::Library(_) => "LIBRARY_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::RunInProgress => "RUN_IN_PROGRESS",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("code".to_string(), serde_json::json!(self.code()));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

/// Error raised when user input or a selection request is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Validation failed for '{field}': {message}")]
pub struct ValidationError {
    /// The offending field.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an error for a required field that is missing or blank.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("'{field}' is required");
        Self { field, message }
    }
}

/// Errors raised by a request store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// No record exists for the id.
    #[error("Animation request not found: {id}")]
    NotFound {
        /// The missing record id.
        id: Uuid,
    },

    /// The requested status change would move a record backwards or out of a
    /// terminal state.
    #[error("Invalid status transition for {id}: {from} -> {to}")]
    InvalidTransition {
        /// The record id.
        id: Uuid,
        /// The current status.
        from: RequestStatus,
        /// The rejected target status.
        to: RequestStatus,
    },

    /// A completion was written without a video reference.
    #[error("Completed request {id} requires a video reference")]
    MissingVideoUrl {
        /// The record id.
        id: Uuid,
    },

    /// A record with the same id already exists.
    #[error("Animation request already exists: {id}")]
    Duplicate {
        /// The duplicated id.
        id: Uuid,
    },

    /// The backing store could not be reached or refused the write.
    #[error("Request store unavailable: {0}")]
    Unavailable(String),

    /// Serialization of the stored records failed.
    #[error("Request store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying IO failure.
    #[error("Request store IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PersistenceError {
    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}

/// Errors raised by the remote content generation call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteCallError {
    /// The call never produced a response.
    #[error("Content generation call failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Content generation rejected ({status}): {error}")]
    Rejected {
        /// HTTP-equivalent status code.
        status: u16,
        /// The error message from the service.
        error: String,
        /// Optional extra details.
        details: Option<String>,
    },

    /// The service answered without a usable video reference.
    #[error("Content generation returned no video reference")]
    MissingVideoUrl,

    /// The response body could not be decoded.
    #[error("Invalid content generation response: {0}")]
    InvalidResponse(String),
}

impl RemoteCallError {
    /// Creates a rejection error.
    #[must_use]
    pub fn rejected(status: u16, error: impl Into<String>, details: Option<String>) -> Self {
        Self::Rejected {
            status,
            error: error.into(),
            details,
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        match self {
            Self::Transport(reason) => {
                map.insert("type".to_string(), serde_json::json!("Transport"));
                map.insert("reason".to_string(), serde_json::json!(reason));
            }
            Self::Rejected {
                status,
                error,
                details,
            } => {
                map.insert("type".to_string(), serde_json::json!("Rejected"));
                map.insert("status".to_string(), serde_json::json!(status));
                map.insert("error".to_string(), serde_json::json!(error));
                if let Some(details) = details {
                    map.insert("details".to_string(), serde_json::json!(details));
                }
            }
            Self::MissingVideoUrl => {
                map.insert("type".to_string(), serde_json::json!("MissingVideoUrl"));
            }
            Self::InvalidResponse(reason) => {
                map.insert("type".to_string(), serde_json::json!("InvalidResponse"));
                map.insert("reason".to_string(), serde_json::json!(reason));
            }
        }

        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

/// Error raised when a video library is incomplete or inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// A level has no shelf at all.
    #[error("Video library has no entries for level '{level}'")]
    MissingLevel {
        /// The missing level.
        level: String,
    },

    /// A level shelf has no categories.
    #[error("Video library level '{level}' has no categories")]
    EmptyLevel {
        /// The empty level.
        level: String,
    },

    /// A category has no references to pick from.
    #[error("Video library category '{level}/{category}' has no references")]
    EmptyCategory {
        /// The level.
        level: String,
        /// The empty category.
        category: String,
    },

    /// A category appears twice within a level.
    #[error("Video library category '{level}/{category}' is listed twice")]
    DuplicateCategory {
        /// The level.
        level: String,
        /// The duplicated category.
        category: String,
    },
}

/// Error raised while loading configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A value could not be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    Invalid {
        /// The environment key.
        key: String,
        /// The raw value.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_missing() {
        let err = ValidationError::missing("title");
        assert_eq!(err.field, "title");
        assert!(err.to_string().contains("'title' is required"));
    }

    #[test]
    fn test_animator_error_codes() {
        let err: AnimatorError = ValidationError::missing("title").into();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let err: AnimatorError = PersistenceError::unavailable("down").into();
        assert_eq!(err.code(), "PERSISTENCE_ERROR");
        assert!(err.to_string().contains("down"));

        assert_eq!(AnimatorError::RunInProgress.code(), "RUN_IN_PROGRESS");
    }

    #[test]
    fn test_invalid_transition_message() {
        let id = Uuid::nil();
        let err = PersistenceError::InvalidTransition {
            id,
            from: RequestStatus::Completed,
            to: RequestStatus::Processing,
        };
        assert!(err.to_string().contains("completed -> processing"));
    }

    #[test]
    fn test_remote_call_error_to_dict() {
        let err = RemoteCallError::rejected(400, "Missing required fields", None);
        let dict = err.to_dict();

        assert_eq!(dict.get("type").unwrap(), "Rejected");
        assert_eq!(dict.get("status").unwrap(), 400);
        assert!(dict.get("details").is_none());
    }

    #[test]
    fn test_animator_error_to_dict() {
        let err = AnimatorError::Internal("boom".to_string());
        let dict = err.to_dict();
        assert_eq!(dict.get("code").unwrap(), "INTERNAL_ERROR");
        assert_eq!(dict.get("message").unwrap(), "Internal error: boom");
    }
}
