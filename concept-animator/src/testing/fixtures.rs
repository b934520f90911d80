//! Ready-made forms and runner wiring for tests.

use std::sync::Arc;

use crate::core::{EducationLevel, FormData};
use crate::events::CollectingEventSink;
use crate::pipeline::{PipelineRunner, StageDelay};
use crate::remote::VideoGenerator;
use crate::store::{InMemoryRequestStore, RequestStore};

use super::mocks::{NoDelay, StaticVideoGenerator};

/// Video returned by [`RunnerFixture::new`].
pub const FIXTURE_VIDEO_URL: &str = "https://player.vimeo.com/video/562237744";

/// The elementary photosynthesis form.
#[must_use]
pub fn photosynthesis_form() -> FormData {
    FormData::new("Introduction to Photosynthesis")
        .with_description("How plants turn light into energy")
        .with_level(EducationLevel::Elementary)
}

/// A high school form narrated in Spanish.
#[must_use]
pub fn spanish_history_form() -> FormData {
    FormData::new("World War II")
        .with_level(EducationLevel::High)
        .with_language("spanish")
}

/// A form whose title is only whitespace.
#[must_use]
pub fn blank_title_form() -> FormData {
    FormData::new("   ").with_description("no title")
}

/// A runner wired to in-memory collaborators, with handles to inspect them.
pub struct RunnerFixture {
    /// The runner under test.
    pub runner: PipelineRunner,
    /// Store the runner writes to.
    pub store: Arc<dyn RequestStore>,
    /// Events the runner emitted.
    pub events: Arc<CollectingEventSink>,
}

impl RunnerFixture {
    /// In-memory store, zero delay, a static generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(
            Arc::new(InMemoryRequestStore::new()),
            Arc::new(StaticVideoGenerator::new(FIXTURE_VIDEO_URL)),
            Arc::new(NoDelay),
        )
    }

    /// Wires a runner from explicit parts.
    #[must_use]
    pub fn with_parts(
        store: Arc<dyn RequestStore>,
        generator: Arc<dyn VideoGenerator>,
        delay: Arc<dyn StageDelay>,
    ) -> Self {
        let events = Arc::new(CollectingEventSink::new());
        let runner = PipelineRunner::new(Arc::clone(&store), generator)
            .with_delay(delay)
            .with_sink(events.clone());
        Self {
            runner,
            store,
            events,
        }
    }
}

impl Default for RunnerFixture {
    fn default() -> Self {
        Self::new()
    }
}
