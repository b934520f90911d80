//! Testing utilities for the generation pipeline.
//!
//! This module provides:
//! - Stage delays that never sleep or that advance on demand
//! - Video generators with fixed results
//! - A request store with injectable failures
//! - Form fixtures and a pre-wired runner

mod fixtures;
mod mocks;

pub use fixtures::{
    blank_title_form, photosynthesis_form, spanish_history_form, RunnerFixture,
    FIXTURE_VIDEO_URL,
};
pub use mocks::{
    FailingRequestStore, FailingVideoGenerator, GatedDelay, NoDelay, StaticVideoGenerator,
};
