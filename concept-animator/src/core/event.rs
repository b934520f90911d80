//! Pipeline event type for lifecycle observability.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::status::RequestStatus;

/// An event emitted by the pipeline runner during a run.
///
/// Events are consumed by [`EventSink`](crate::events::EventSink)s for
/// logging or analytics; they never drive control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEvent {
    /// The event type (e.g., "stage.started").
    #[serde(rename = "type")]
    pub event_type: String,

    /// When the event occurred (ISO 8601).
    pub timestamp: String,

    /// The event payload data.
    #[serde(default)]
    pub data: HashMap<String, serde_json::Value>,
}

impl PipelineEvent {
    /// Creates a new event.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            timestamp: crate::utils::iso_timestamp(),
            data: HashMap::new(),
        }
    }

    /// Adds a data field to the event.
    #[must_use]
    pub fn add_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Returns the payload as a JSON object.
    #[must_use]
    pub fn payload(&self) -> serde_json::Value {
        let mut map: serde_json::Map<String, serde_json::Value> =
            self.data.clone().into_iter().collect();
        map.insert("timestamp".to_string(), serde_json::json!(self.timestamp));
        serde_json::Value::Object(map)
    }

    /// Creates a "pipeline.started" event.
    #[must_use]
    pub fn started(request_id: Uuid, title: &str) -> Self {
        Self::new("pipeline.started")
            .add_data("request_id", serde_json::json!(request_id))
            .add_data("title", serde_json::json!(title))
    }

    /// Creates a "stage.started" event.
    #[must_use]
    pub fn stage_started(request_id: Uuid, stage_index: usize, title: &str) -> Self {
        Self::new("stage.started")
            .add_data("request_id", serde_json::json!(request_id))
            .add_data("stage", serde_json::json!(stage_index))
            .add_data("title", serde_json::json!(title))
    }

    /// Creates a "stage.completed" event.
    #[must_use]
    pub fn stage_completed(
        request_id: Uuid,
        stage_index: usize,
        visual_description: &str,
        duration_ms: f64,
    ) -> Self {
        Self::new("stage.completed")
            .add_data("request_id", serde_json::json!(request_id))
            .add_data("stage", serde_json::json!(stage_index))
            .add_data("visual_description", serde_json::json!(visual_description))
            .add_data("duration_ms", serde_json::json!(duration_ms))
    }

    /// Creates a "request.status_update_failed" event.
    #[must_use]
    pub fn status_update_failed(request_id: Uuid, status: RequestStatus, error: &str) -> Self {
        Self::new("request.status_update_failed")
            .add_data("request_id", serde_json::json!(request_id))
            .add_data("status", serde_json::json!(status))
            .add_data("error", serde_json::json!(error))
    }

    /// Creates a "pipeline.completed" event.
    #[must_use]
    pub fn completed(request_id: Uuid, video_url: &str, persisted: bool) -> Self {
        Self::new("pipeline.completed")
            .add_data("request_id", serde_json::json!(request_id))
            .add_data("video_url", serde_json::json!(video_url))
            .add_data("persisted", serde_json::json!(persisted))
    }

    /// Creates a "pipeline.failed" event.
    #[must_use]
    pub fn failed(request_id: Uuid, error: &str, persisted: bool) -> Self {
        Self::new("pipeline.failed")
            .add_data("request_id", serde_json::json!(request_id))
            .add_data("error", serde_json::json!(error))
            .add_data("persisted", serde_json::json!(persisted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = PipelineEvent::new("test.event");
        assert_eq!(event.event_type, "test.event");
        assert!(event.data.is_empty());
    }

    #[test]
    fn test_stage_started() {
        let id = Uuid::nil();
        let event = PipelineEvent::stage_started(id, 2, "Visual Storyboarding");
        assert_eq!(event.event_type, "stage.started");
        assert_eq!(event.data.get("stage"), Some(&serde_json::json!(2)));
    }

    #[test]
    fn test_status_update_failed() {
        let event =
            PipelineEvent::status_update_failed(Uuid::nil(), RequestStatus::Processing, "down");
        assert_eq!(event.data.get("status"), Some(&serde_json::json!("processing")));
    }

    #[test]
    fn test_payload_includes_timestamp() {
        let event = PipelineEvent::completed(Uuid::nil(), "https://v/1", true);
        let payload = event.payload();
        assert_eq!(payload["video_url"], "https://v/1");
        assert_eq!(payload["persisted"], true);
        assert!(payload["timestamp"].is_string());
    }

    #[test]
    fn test_event_serialization() {
        let event = PipelineEvent::new("test").add_data("x", serde_json::json!(1));
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: PipelineEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event.event_type, deserialized.event_type);
    }
}
