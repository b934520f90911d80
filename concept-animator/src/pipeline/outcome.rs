//! Results of a generation run.

use serde::Serialize;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::errors::AnimatorError;
use crate::library::VideoRef;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// A video was selected.
    Completed {
        /// Record id.
        request_id: Uuid,
        /// Selected video.
        video_url: VideoRef,
        /// Whether the completed status reached the store.
        persisted: bool,
    },
    /// The run failed.
    Failed {
        /// Record id.
        request_id: Uuid,
        /// What went wrong.
        reason: String,
        /// Whether the failed status reached the store.
        persisted: bool,
    },
}

impl RunOutcome {
    /// Record id of the run.
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        match self {
            Self::Completed { request_id, .. } | Self::Failed { request_id, .. } => *request_id,
        }
    }

    /// Whether a video was selected.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Whether the final status write succeeded.
    #[must_use]
    pub fn persisted(&self) -> bool {
        match self {
            Self::Completed { persisted, .. } | Self::Failed { persisted, .. } => *persisted,
        }
    }

    /// The selected video, if any.
    #[must_use]
    pub fn video_url(&self) -> Option<&str> {
        match self {
            Self::Completed { video_url, .. } => Some(video_url),
            Self::Failed { .. } => None,
        }
    }
}

/// Handle to a spawned run.
#[derive(Debug)]
pub struct RunHandle {
    request_id: Uuid,
    task: JoinHandle<RunOutcome>,
}

impl RunHandle {
    pub(crate) fn new(request_id: Uuid, task: JoinHandle<RunOutcome>) -> Self {
        Self { request_id, task }
    }

    /// Record id of the run.
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Waits for the run to finish.
    pub async fn outcome(self) -> Result<RunOutcome, AnimatorError> {
        self.task
            .await
            .map_err(|e| AnimatorError::Internal(format!("Run task join error: {e}")))
    }
}
