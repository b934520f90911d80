//! Core domain model types for the concept animator.
//!
//! This module contains the fundamental types used throughout the crate:
//! - Request, step and level status enums
//! - The persisted request record and its partial updates
//! - Submitted form data, storyboard steps, notices and pipeline events

mod event;
mod form;
mod notice;
mod request;
mod status;
mod step;

pub use event::PipelineEvent;
pub use form::{FormData, DEFAULT_LANGUAGE};
pub use notice::{
    Notice, NoticeLevel, MSG_GENERATION_FAILED, MSG_READY, MSG_RUN_IN_PROGRESS,
    MSG_SAVE_FAILED, MSG_TITLE_REQUIRED, MSG_UNEXPECTED_FAILURE,
};
pub use request::{AnimationRequest, RequestPatch};
pub use status::{EducationLevel, RequestStatus, StepStatus};
pub use step::{initial_steps, StageDefinition, StoryboardStep, STAGES, STAGE_COUNT};
