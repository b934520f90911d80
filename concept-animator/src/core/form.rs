//! Submitted form data.

use serde::{Deserialize, Serialize};

use super::notice::MSG_TITLE_REQUIRED;
use super::status::EducationLevel;
use crate::errors::ValidationError;

/// Default narration language.
pub const DEFAULT_LANGUAGE: &str = "english";

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    /// Concept title, required.
    pub title: String,
    /// Optional description; empty means none.
    #[serde(default)]
    pub description: String,
    /// Audience tier.
    #[serde(default)]
    pub education_level: EducationLevel,
    /// Narration language.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            education_level: EducationLevel::default(),
            language: default_language(),
        }
    }
}

impl FormData {
    /// Creates form data with the given title and defaults elsewhere.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the education level.
    #[must_use]
    pub fn with_level(mut self, level: EducationLevel) -> Self {
        self.education_level = level;
        self
    }

    /// Sets the narration language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Returns the description, or `None` when it is blank.
    #[must_use]
    pub fn normalized_description(&self) -> Option<&str> {
        if self.description.trim().is_empty() {
            None
        } else {
            Some(self.description.as_str())
        }
    }

    /// Rejects a title that is empty after trimming.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::new("title", MSG_TITLE_REQUIRED));
        }
        Ok(())
    }
}
