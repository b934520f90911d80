//! Wire types of the content generation call.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::core::EducationLevel;

/// Message returned with a successful generation.
pub const MSG_GENERATED: &str = "Animation generated successfully";
/// Error returned when a required field is missing.
pub const MSG_MISSING_FIELDS: &str = "Missing required fields";
/// Error returned for anything unexpected.
pub const MSG_INTERNAL: &str = "Internal server error";

/// Request body. All fields are optional on the wire so the service can
/// answer a missing field with its own rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateVideoRequest {
    /// Request record id. Any JSON value is accepted; only falsy ids are
    /// rejected.
    #[serde(default)]
    pub id: Option<Value>,
    /// Concept title.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Requested level, free-form.
    #[serde(default)]
    pub education_level: Option<String>,
}

impl GenerateVideoRequest {
    /// Builds a complete request.
    #[must_use]
    pub fn new(
        id: Uuid,
        title: impl Into<String>,
        description: Option<&str>,
        level: EducationLevel,
    ) -> Self {
        Self {
            id: Some(Value::String(id.to_string())),
            title: Some(title.into()),
            description: description.map(str::to_string),
            education_level: Some(level.as_str().to_string()),
        }
    }

    /// Returns `(id, title, level)` when the id is truthy and title and level
    /// are present and non-empty.
    #[must_use]
    pub fn required_fields(&self) -> Option<(&Value, &str, &str)> {
        fn present(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.is_empty())
        }

        let id = self.id.as_ref().filter(|id| is_truthy(id))?;
        Some((id, present(&self.title)?, present(&self.education_level)?))
    }
}

/// `null`, `false`, zero, NaN and the empty string are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateVideoResponse {
    /// Whether generation succeeded.
    pub success: bool,
    /// Human-readable status message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The selected video.
    #[serde(rename = "videoUrl", default)]
    pub video_url: Option<String>,
}

impl GenerateVideoResponse {
    /// A successful response for `video_url`.
    #[must_use]
    pub fn generated(video_url: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(MSG_GENERATED.to_string()),
            video_url: Some(video_url.into()),
        }
    }

    /// Returns the video reference when the response is usable.
    #[must_use]
    pub fn usable_video_url(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.video_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Short error message.
    pub error: String,
    /// Optional details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = GenerateVideoRequest::new(Uuid::nil(), "Atoms", None, EducationLevel::High);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["title"], "Atoms");
        assert_eq!(json["education_level"], "high");
        assert!(json["description"].is_null());
    }

    #[test]
    fn test_required_fields() {
        let request: GenerateVideoRequest =
            serde_json::from_str(r#"{"id": "1", "title": "Atoms", "education_level": "high"}"#)
                .unwrap();
        assert_eq!(
            request.required_fields(),
            Some((&Value::from("1"), "Atoms", "high"))
        );

        let request: GenerateVideoRequest =
            serde_json::from_str(r#"{"id": "1", "title": "", "education_level": "high"}"#).unwrap();
        assert_eq!(request.required_fields(), None);

        let request: GenerateVideoRequest =
            serde_json::from_str(r#"{"title": "Atoms", "education_level": "high"}"#).unwrap();
        assert_eq!(request.required_fields(), None);
    }

    #[test]
    fn test_numeric_id_accepted() {
        let request: GenerateVideoRequest =
            serde_json::from_str(r#"{"id": 42, "title": "Atoms", "education_level": "high"}"#)
                .unwrap();
        assert_eq!(
            request.required_fields(),
            Some((&Value::from(42), "Atoms", "high"))
        );

        for falsy in ["0", "false", "null", r#""""#] {
            let body = format!(r#"{{"id": {falsy}, "title": "Atoms", "education_level": "high"}}"#);
            let request: GenerateVideoRequest = serde_json::from_str(&body).unwrap();
            assert_eq!(request.required_fields(), None, "id {falsy} should be rejected");
        }
    }

    #[test]
    fn test_response_uses_camel_case_video_url() {
        let json = serde_json::to_value(GenerateVideoResponse::generated("https://v/1")).unwrap();
        assert_eq!(json["videoUrl"], "https://v/1");
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], MSG_GENERATED);
    }

    #[test]
    fn test_usable_video_url() {
        let ok: GenerateVideoResponse =
            serde_json::from_str(r#"{"success": true, "videoUrl": "https://v/1"}"#).unwrap();
        assert_eq!(ok.usable_video_url(), Some("https://v/1"));

        let blank: GenerateVideoResponse =
            serde_json::from_str(r#"{"success": true, "videoUrl": ""}"#).unwrap();
        assert_eq!(blank.usable_video_url(), None);

        let failed: GenerateVideoResponse =
            serde_json::from_str(r#"{"success": false, "videoUrl": "https://v/1"}"#).unwrap();
        assert_eq!(failed.usable_video_url(), None);
    }
}
