//! Deterministic video selection.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::catalog::{VideoLibrary, VideoRef};
use super::hash::pick_index;
use super::keywords::{classify, Category};
use crate::core::EducationLevel;
use crate::errors::{LibraryError, ValidationError};

/// The outcome of a selection, with the intermediate decisions kept for
/// logging and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Category produced by keyword classification.
    pub classified: Category,
    /// Level the request resolved to.
    pub level: EducationLevel,
    /// Category actually used on the level's shelf.
    pub category: Category,
    /// Index picked within the category.
    pub index: usize,
    /// The selected reference.
    pub video_url: VideoRef,
}

/// Picks a representative video for a concept.
///
/// Selection is a pure function of `(title, description, level)` and the
/// library: the same inputs always give the same reference.
#[derive(Debug, Clone)]
pub struct ContentSelector {
    library: VideoLibrary,
}

impl ContentSelector {
    /// Creates a selector over a validated library.
    #[must_use]
    pub fn new(library: VideoLibrary) -> Self {
        Self { library }
    }

    /// Creates a selector over the built-in library.
    pub fn standard() -> Result<Self, LibraryError> {
        Ok(Self::new(VideoLibrary::standard()?))
    }

    /// Returns the underlying library.
    #[must_use]
    pub fn library(&self) -> &VideoLibrary {
        &self.library
    }

    /// Selects a video for the concept.
    ///
    /// `level` is matched case-insensitively; unknown levels use `middle`.
    /// A blank title or level is rejected before classification.
    pub fn select(
        &self,
        title: &str,
        description: Option<&str>,
        level: &str,
    ) -> Result<Selection, ValidationError> {
        if title.is_empty() {
            return Err(ValidationError::missing("title"));
        }
        if level.is_empty() {
            return Err(ValidationError::missing("education_level"));
        }

        let text = format!("{title} {}", description.unwrap_or_default());
        let classified = classify(&text);
        let resolved_level = EducationLevel::resolve(level);

        let entry = self.library.shelf(resolved_level).resolve(classified);
        let index = pick_index(title, entry.videos.len());
        let video_url = entry.videos[index].clone();

        info!(
            title,
            classified = %classified,
            level = %resolved_level,
            category = %entry.category,
            index,
            video_url = %video_url,
            "selected video"
        );

        Ok(Selection {
            classified,
            level: resolved_level,
            category: entry.category,
            index,
            video_url,
        })
    }
}
