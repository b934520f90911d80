//! Observable run state.

use serde::Serialize;
use uuid::Uuid;

use crate::core::{initial_steps, Notice, StepStatus, StoryboardStep};
use crate::library::VideoRef;

/// Snapshot of a runner, published on every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineState {
    /// Record of the current or last run.
    pub request_id: Option<Uuid>,
    /// Whether a run is in flight.
    pub is_generating: bool,
    /// 0-based index of the stage last marked active.
    pub current_step: usize,
    /// The five storyboard steps.
    pub steps: Vec<StoryboardStep>,
    /// Whether a video is ready.
    pub is_ready: bool,
    /// The ready video.
    pub video_url: Option<VideoRef>,
    /// Most recent notice.
    pub last_notice: Option<Notice>,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            request_id: None,
            is_generating: false,
            current_step: 0,
            steps: initial_steps(),
            is_ready: false,
            video_url: None,
            last_notice: None,
        }
    }
}

impl PipelineState {
    /// Clears the previous run and marks a new one as generating.
    pub(crate) fn begin_run(&mut self) {
        *self = Self {
            is_generating: true,
            ..Self::default()
        };
    }

    /// Returns the step currently marked active, if any.
    #[must_use]
    pub fn active_step(&self) -> Option<&StoryboardStep> {
        self.steps.iter().find(|s| s.status == StepStatus::Active)
    }

    /// Number of completed steps.
    #[must_use]
    pub fn completed_steps(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status == StepStatus::Complete)
            .count()
    }

    /// Checks step ordering: complete steps, then at most one active step,
    /// then pending steps.
    #[must_use]
    pub fn steps_in_order(&self) -> bool {
        let rank = |s: &StoryboardStep| match s.status {
            StepStatus::Complete => 0,
            StepStatus::Active => 1,
            StepStatus::Pending => 2,
        };
        let active = self
            .steps
            .iter()
            .filter(|s| s.status == StepStatus::Active)
            .count();
        active <= 1 && self.steps.windows(2).all(|w| rank(&w[0]) <= rank(&w[1]))
    }
}
