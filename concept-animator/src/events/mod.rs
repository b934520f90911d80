//! Event sink system for observability.
//!
//! The pipeline runner reports every lifecycle step as a
//! [`PipelineEvent`](crate::core::PipelineEvent) through an [`EventSink`].
//! Sinks are for logging and analytics; they never influence a run.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};
