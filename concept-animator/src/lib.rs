//! # Concept Animator
//!
//! Turns an educational concept (title, description, audience level and
//! narration language) into an animated video reference, tracked through a
//! five-stage pipeline.
//!
//! The crate provides:
//!
//! - **Pipeline runner**: a five-stage state machine with observable state,
//!   injectable stage delays and best-effort persistence side effects
//! - **Content selection**: keyword classification and a deterministic
//!   title-hash pick from a validated video library
//! - **Request storage**: in-memory and JSON-file record stores
//! - **Remote generation**: an HTTP client for the selection service and an
//!   in-process equivalent
//! - **Selection service**: an axum router exposing selection over HTTP
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use concept_animator::prelude::*;
//!
//! let selector = Arc::new(ContentSelector::standard()?);
//! let runner = PipelineRunner::new(
//!     Arc::new(InMemoryRequestStore::new()),
//!     Arc::new(LocalVideoGenerator::new(selector)),
//! );
//!
//! let handle = runner.start(FormData::new("Cell Biology")).await?;
//! let outcome = handle.outcome().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod library;
pub mod observability;
pub mod pipeline;
pub mod remote;
pub mod store;
pub mod testing;
pub mod utils;

#[cfg(feature = "server")]
pub mod server;

/// Prelude module for convenient imports
pub mod prelude {
    pub use std::sync::Arc;

    pub use crate::config::AnimatorConfig;
    pub use crate::core::{
        AnimationRequest, EducationLevel, FormData, Notice, NoticeLevel, RequestStatus,
        StepStatus, StoryboardStep,
    };
    pub use crate::errors::{
        AnimatorError, LibraryError, PersistenceError, RemoteCallError, ValidationError,
    };
    pub use crate::events::{EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::library::{ContentSelector, Selection, VideoLibrary, VideoRef};
    pub use crate::pipeline::{
        FixedDelay, PipelineRunner, PipelineState, RandomDelay, RunHandle, RunOutcome,
        StageDelay,
    };
    #[cfg(feature = "http")]
    pub use crate::remote::HttpVideoGenerator;
    pub use crate::remote::{LocalVideoGenerator, VideoGenerator};
    pub use crate::store::{InMemoryRequestStore, JsonFileRequestStore, RequestStore};
    pub use crate::utils::{generate_uuid, iso_timestamp, Timestamp};
}
