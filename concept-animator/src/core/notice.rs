//! User-facing notifications.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown when the title is blank.
pub const MSG_TITLE_REQUIRED: &str = "Please enter a concept title";
/// Shown when the request record could not be created.
pub const MSG_SAVE_FAILED: &str = "Failed to save animation request";
/// Shown when a second run is started while one is in flight.
pub const MSG_RUN_IN_PROGRESS: &str = "An animation is already being generated";
/// Shown when the selection call failed or returned nothing usable.
pub const MSG_GENERATION_FAILED: &str = "Failed to generate animation";
/// Shown when the run failed for any other reason.
pub const MSG_UNEXPECTED_FAILURE: &str = "An error occurred while generating the animation";
/// Shown when the video is ready.
pub const MSG_READY: &str = "Your educational animation is ready!";

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Something finished well.
    Success,
    /// Something went wrong.
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A short human-readable notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Message text.
    pub message: String,
}

impl Notice {
    /// Creates a success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Creates an error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_levels_on_the_wire() {
        let json = serde_json::to_value(Notice::error(MSG_SAVE_FAILED)).unwrap();
        assert_eq!(json["level"], "error");
        assert_eq!(json["message"], MSG_SAVE_FAILED);

        assert_eq!(Notice::success(MSG_READY).level.to_string(), "success");
        assert!(serde_json::from_str::<NoticeLevel>(r#""info""#).is_err());
    }
}
