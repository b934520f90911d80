//! The generation pipeline.
//!
//! This module provides:
//! - [`PipelineRunner`], the five-stage state machine
//! - [`StageDelay`] and its random and fixed implementations
//! - The pure per-stage [`visual_description`] function
//! - [`PipelineState`] snapshots and [`RunOutcome`] results

mod delay;
mod descriptions;
mod outcome;
mod runner;
mod state;

pub use delay::{FixedDelay, RandomDelay, StageDelay};
pub use descriptions::visual_description;
pub use outcome::{RunHandle, RunOutcome};
pub use runner::PipelineRunner;
pub use state::PipelineState;
