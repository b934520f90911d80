//! The persisted animation request record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::form::FormData;
use super::status::{EducationLevel, RequestStatus};
use crate::errors::PersistenceError;

/// One generation attempt as stored in a [`RequestStore`](crate::store::RequestStore).
///
/// `video_url` is set if and only if `status` is [`RequestStatus::Completed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationRequest {
    /// Unique identifier, immutable.
    pub id: Uuid,
    /// Concept title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Audience tier.
    pub education_level: EducationLevel,
    /// Narration language tag.
    pub language: String,
    /// Lifecycle status.
    pub status: RequestStatus,
    /// Selected video reference once completed.
    pub video_url: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time, never decreasing.
    pub updated_at: DateTime<Utc>,
}

impl AnimationRequest {
    /// Builds a fresh pending record from submitted form data.
    #[must_use]
    pub fn from_form(form: &FormData) -> Self {
        let now = crate::utils::now_utc();
        Self {
            id: crate::utils::generate_uuid(),
            title: form.title.clone(),
            description: form.normalized_description().map(str::to_string),
            education_level: form.education_level,
            language: form.language.clone(),
            status: RequestStatus::Pending,
            video_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update, enforcing the forward-only status order and
    /// the completed/video reference pairing.
    pub fn apply(&mut self, patch: &RequestPatch) -> Result<(), PersistenceError> {
        if !self.status.can_transition_to(patch.status) {
            return Err(PersistenceError::InvalidTransition {
                id: self.id,
                from: self.status,
                to: patch.status,
            });
        }

        let video_url = match patch.status {
            RequestStatus::Completed => match patch.video_url.as_deref() {
                Some(url) if !url.trim().is_empty() => Some(url.to_string()),
                _ => return Err(PersistenceError::MissingVideoUrl { id: self.id }),
            },
            _ => None,
        };

        self.status = patch.status;
        self.video_url = video_url;
        self.updated_at = self.updated_at.max(patch.at);
        Ok(())
    }
}

/// A partial update to an [`AnimationRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPatch {
    /// Target status.
    pub status: RequestStatus,
    /// Video reference, required when completing.
    pub video_url: Option<String>,
    /// When the change was made.
    pub at: DateTime<Utc>,
}

impl RequestPatch {
    /// Moves the record to `processing`.
    #[must_use]
    pub fn processing() -> Self {
        Self::status(RequestStatus::Processing)
    }

    /// Moves the record to `failed`.
    #[must_use]
    pub fn failed() -> Self {
        Self::status(RequestStatus::Failed)
    }

    /// Moves the record to `completed` with the selected video.
    #[must_use]
    pub fn completed(video_url: impl Into<String>) -> Self {
        Self {
            status: RequestStatus::Completed,
            video_url: Some(video_url.into()),
            at: crate::utils::now_utc(),
        }
    }

    /// A bare status change.
    #[must_use]
    pub fn status(status: RequestStatus) -> Self {
        Self {
            status,
            video_url: None,
            at: crate::utils::now_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn pending() -> AnimationRequest {
        AnimationRequest::from_form(&FormData::new("Cell Biology"))
    }

    #[test]
    fn test_from_form_defaults() {
        let record = pending();
        assert_eq!(record.status, RequestStatus::Pending);
        assert_eq!(record.education_level, EducationLevel::Middle);
        assert_eq!(record.language, "english");
        assert!(record.description.is_none());
        assert!(record.video_url.is_none());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_apply_full_lifecycle() {
        let mut record = pending();
        record.apply(&RequestPatch::processing()).unwrap();
        assert_eq!(record.status, RequestStatus::Processing);

        record
            .apply(&RequestPatch::completed("https://player.vimeo.com/video/1"))
            .unwrap();
        assert_eq!(record.status, RequestStatus::Completed);
        assert_eq!(record.video_url.as_deref(), Some("https://player.vimeo.com/video/1"));
    }

    #[test]
    fn test_apply_rejects_backward_transition() {
        let mut record = pending();
        record.apply(&RequestPatch::failed()).unwrap();

        let err = record.apply(&RequestPatch::processing()).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidTransition { .. }));
        assert_eq!(record.status, RequestStatus::Failed);
    }

    #[test]
    fn test_apply_completed_requires_video() {
        let mut record = pending();
        let err = record
            .apply(&RequestPatch::status(RequestStatus::Completed))
            .unwrap_err();
        assert!(matches!(err, PersistenceError::MissingVideoUrl { .. }));

        let err = record.apply(&RequestPatch::completed("  ")).unwrap_err();
        assert!(matches!(err, PersistenceError::MissingVideoUrl { .. }));
        assert_eq!(record.status, RequestStatus::Pending);
    }

    #[test]
    fn test_updated_at_never_decreases() {
        let mut record = pending();
        let before = record.updated_at;

        let mut patch = RequestPatch::processing();
        patch.at = before - Duration::seconds(30);
        record.apply(&patch).unwrap();

        assert_eq!(record.updated_at, before);
    }

    #[test]
    fn test_record_serializes_snake_case() {
        let record = pending();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["education_level"], "middle");
        assert_eq!(json["status"], "pending");
        assert!(json["video_url"].is_null());
    }
}
