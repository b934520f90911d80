//! Keyword classification of concept text into library categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A subject category of the video library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Natural sciences.
    Science,
    /// Mathematics.
    Math,
    /// Language arts.
    English,
    /// Programming and software.
    Coding,
    /// History.
    History,
    /// Business and economics.
    Business,
    /// Workplace skills.
    Professional,
    /// Health and wellness.
    Health,
    /// Technology trends.
    Technology,
    /// Computer science. Only reachable as a shelf listing; no keyword set
    /// classifies into it.
    Computer,
}

impl Category {
    /// Returns the wire name of the category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Science => "science",
            Self::Math => "math",
            Self::English => "english",
            Self::Coding => "coding",
            Self::History => "history",
            Self::Business => "business",
            Self::Professional => "professional",
            Self::Health => "health",
            Self::Technology => "technology",
            Self::Computer => "computer",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword sets in priority order. The first set with any substring hit wins.
pub const KEYWORD_SETS: [(Category, &[&str]); 9] = [
    (
        Category::Science,
        &[
            "science", "biology", "chemistry", "physics", "nature", "animal", "plant", "cell",
            "atom", "energy", "earth", "space", "planet",
        ],
    ),
    (
        Category::Math,
        &[
            "math", "algebra", "geometry", "calculus", "number", "equation", "statistic",
            "probability", "formula", "theorem",
        ],
    ),
    (
        Category::English,
        &[
            "english", "language", "grammar", "vocabulary", "writing", "reading", "literature",
            "alphabet", "word",
        ],
    ),
    (
        Category::Coding,
        &[
            "code", "programming", "algorithm", "computer", "software", "development", "web",
            "app", "javascript", "python",
        ],
    ),
    (
        Category::History,
        &[
            "history", "ancient", "modern", "war", "civilization", "revolution", "period",
            "century", "era",
        ],
    ),
    (
        Category::Business,
        &[
            "business", "economics", "finance", "market", "company", "strategy", "management",
            "entrepreneur", "investment",
        ],
    ),
    (
        Category::Professional,
        &[
            "professional", "career", "leadership", "communication", "project", "management",
            "team", "skill", "workplace",
        ],
    ),
    (
        Category::Health,
        &[
            "health", "fitness", "nutrition", "exercise", "diet", "mental", "wellness",
            "lifestyle", "medical",
        ],
    ),
    (
        Category::Technology,
        &[
            "technology", "digital", "device", "innovation", "internet", "mobile", "future",
            "smart", "blockchain", "ai", "artificial intelligence",
        ],
    ),
];

/// Category used when no keyword matches.
pub const DEFAULT_CATEGORY: Category = Category::Technology;

/// Classifies free text by plain substring matching on its lower-cased form.
///
/// Matching is not word-bounded: "explain" hits the technology keyword "ai".
#[must_use]
pub fn classify(text: &str) -> Category {
    let lower = text.to_lowercase();
    KEYWORD_SETS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(DEFAULT_CATEGORY, |(category, _)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_set() {
        assert_eq!(classify("Cell Biology"), Category::Science);
        assert_eq!(classify("Algebra basics"), Category::Math);
        assert_eq!(classify("Grammar for beginners"), Category::English);
        assert_eq!(classify("Learn Python Programming"), Category::Coding);
        assert_eq!(classify("World War II"), Category::History);
        assert_eq!(classify("Stock Market basics"), Category::Business);
        assert_eq!(classify("Team leadership"), Category::Professional);
        assert_eq!(classify("Mental health tips"), Category::Health);
        assert_eq!(classify("Blockchain"), Category::Technology);
    }

    #[test]
    fn test_science_beats_math() {
        assert_eq!(classify("Physics of numbers"), Category::Science);
    }

    #[test]
    fn test_no_match_defaults_to_technology() {
        assert_eq!(classify("Introduction to Photosynthesis"), Category::Technology);
        assert_eq!(classify("Quick tips"), Category::Technology);
        assert_eq!(classify(""), Category::Technology);
    }

    #[test]
    fn test_substring_match_is_not_word_bounded() {
        // "explain" contains "ai"
        assert_eq!(classify("explain"), Category::Technology);
        // "earthquake" contains "earth"
        assert_eq!(classify("Earthquakes"), Category::Science);
    }

    #[test]
    fn test_computer_is_never_classified() {
        assert!(KEYWORD_SETS.iter().all(|(c, _)| *c != Category::Computer));
        // "computer" is a coding keyword
        assert_eq!(classify("computer"), Category::Coding);
    }
}
