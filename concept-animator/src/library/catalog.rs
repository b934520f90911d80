//! The static, strongly-typed video library.

use std::collections::HashSet;

use super::keywords::Category;
use crate::core::EducationLevel;
use crate::errors::LibraryError;

/// An opaque reference to a playable video.
pub type VideoRef = String;

/// The built-in library: level → categories in lookup order → references.
pub const STANDARD_LIBRARY: [(EducationLevel, &[(Category, &[&str])]); 5] = [
    (
        EducationLevel::Elementary,
        &[
            (
                Category::Science,
                &[
                    "https://player.vimeo.com/video/562237744",
                    "https://player.vimeo.com/video/248066718",
                    "https://player.vimeo.com/video/219643392",
                ],
            ),
            (
                Category::Math,
                &[
                    "https://player.vimeo.com/video/98790810",
                    "https://player.vimeo.com/video/237371036",
                    "https://player.vimeo.com/video/54598147",
                ],
            ),
            (
                Category::English,
                &[
                    "https://player.vimeo.com/video/194925200",
                    "https://player.vimeo.com/video/185687754",
                    "https://player.vimeo.com/video/155506386",
                ],
            ),
        ],
    ),
    (
        EducationLevel::Middle,
        &[
            (
                Category::Science,
                &[
                    "https://player.vimeo.com/video/171924917",
                    "https://player.vimeo.com/video/137920644",
                    "https://player.vimeo.com/video/133620428",
                ],
            ),
            (
                Category::Math,
                &[
                    "https://player.vimeo.com/video/230261243",
                    "https://player.vimeo.com/video/88250499",
                    "https://player.vimeo.com/video/235760689",
                ],
            ),
            (
                Category::Coding,
                &[
                    "https://player.vimeo.com/video/382005258",
                    "https://player.vimeo.com/video/250221485",
                    "https://player.vimeo.com/video/251358662",
                ],
            ),
        ],
    ),
    (
        EducationLevel::High,
        &[
            (
                Category::Science,
                &[
                    "https://player.vimeo.com/video/217834643",
                    "https://player.vimeo.com/video/159617705",
                    "https://player.vimeo.com/video/87936931",
                ],
            ),
            (
                Category::Math,
                &[
                    "https://player.vimeo.com/video/208217742",
                    "https://player.vimeo.com/video/188416798",
                    "https://player.vimeo.com/video/228955915",
                ],
            ),
            (
                Category::History,
                &[
                    "https://player.vimeo.com/video/159873750",
                    "https://player.vimeo.com/video/151271165",
                    "https://player.vimeo.com/video/145881489",
                ],
            ),
        ],
    ),
    (
        EducationLevel::College,
        &[
            (
                Category::Science,
                &[
                    "https://player.vimeo.com/video/253651230",
                    "https://player.vimeo.com/video/243966429",
                    "https://player.vimeo.com/video/740639158",
                ],
            ),
            (
                Category::Computer,
                &[
                    "https://player.vimeo.com/video/763228765",
                    "https://player.vimeo.com/video/602379994",
                    "https://player.vimeo.com/video/616382244",
                ],
            ),
            (
                Category::Business,
                &[
                    "https://player.vimeo.com/video/369783288",
                    "https://player.vimeo.com/video/332273837",
                    "https://player.vimeo.com/video/359490794",
                ],
            ),
        ],
    ),
    (
        EducationLevel::Adult,
        &[
            (
                Category::Professional,
                &[
                    "https://player.vimeo.com/video/497957400",
                    "https://player.vimeo.com/video/488055461",
                    "https://player.vimeo.com/video/470184675",
                ],
            ),
            (
                Category::Health,
                &[
                    "https://player.vimeo.com/video/354697675",
                    "https://player.vimeo.com/video/435127897",
                    "https://player.vimeo.com/video/401463904",
                ],
            ),
            (
                Category::Technology,
                &[
                    "https://player.vimeo.com/video/726385493",
                    "https://player.vimeo.com/video/578920599",
                    "https://player.vimeo.com/video/541954891",
                ],
            ),
        ],
    ),
];

/// One category's ordered references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfEntry {
    /// The category.
    pub category: Category,
    /// References in pick order. Never empty.
    pub videos: Vec<VideoRef>,
}

/// All categories of one level, in lookup order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shelf {
    level: EducationLevel,
    entries: Vec<ShelfEntry>,
}

impl Shelf {
    /// The level this shelf serves.
    #[must_use]
    pub fn level(&self) -> EducationLevel {
        self.level
    }

    /// Categories in lookup order.
    #[must_use]
    pub fn entries(&self) -> &[ShelfEntry] {
        &self.entries
    }

    /// The category used when the requested one is not on this shelf.
    #[must_use]
    pub fn first(&self) -> &ShelfEntry {
        &self.entries[0]
    }

    /// Looks up `category`, falling back to the first listed category.
    #[must_use]
    pub fn resolve(&self, category: Category) -> &ShelfEntry {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .unwrap_or_else(|| self.first())
    }

    /// Returns true if the shelf lists `category`.
    #[must_use]
    pub fn contains(&self, category: Category) -> bool {
        self.entries.iter().any(|e| e.category == category)
    }
}

/// A validated mapping from `(level, category)` to ordered video references.
///
/// Every level has a shelf, every shelf has at least one category and every
/// category at least one reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoLibrary {
    shelves: Vec<Shelf>,
}

impl VideoLibrary {
    /// Builds and validates a library.
    pub fn new<I>(shelves: I) -> Result<Self, LibraryError>
    where
        I: IntoIterator<Item = (EducationLevel, Vec<ShelfEntry>)>,
    {
        let mut built: Vec<Shelf> = Vec::new();

        for (level, entries) in shelves {
            if entries.is_empty() {
                return Err(LibraryError::EmptyLevel {
                    level: level.to_string(),
                });
            }

            let mut seen = HashSet::new();
            for entry in &entries {
                if !seen.insert(entry.category) {
                    return Err(LibraryError::DuplicateCategory {
                        level: level.to_string(),
                        category: entry.category.to_string(),
                    });
                }
                if entry.videos.is_empty() {
                    return Err(LibraryError::EmptyCategory {
                        level: level.to_string(),
                        category: entry.category.to_string(),
                    });
                }
            }

            // Later definitions of a level replace earlier ones.
            built.retain(|s| s.level != level);
            built.push(Shelf { level, entries });
        }

        for level in EducationLevel::ALL {
            if !built.iter().any(|s| s.level == level) {
                return Err(LibraryError::MissingLevel {
                    level: level.to_string(),
                });
            }
        }

        built.sort_by_key(|s| s.level);
        Ok(Self { shelves: built })
    }

    /// Builds the built-in library.
    pub fn standard() -> Result<Self, LibraryError> {
        Self::new(STANDARD_LIBRARY.iter().map(|(level, categories)| {
            let entries = categories
                .iter()
                .map(|(category, videos)| ShelfEntry {
                    category: *category,
                    videos: videos.iter().map(|v| (*v).to_string()).collect(),
                })
                .collect();
            (*level, entries)
        }))
    }

    /// Returns the shelf for `level`.
    #[must_use]
    pub fn shelf(&self, level: EducationLevel) -> &Shelf {
        // Sorted and complete, so shelves line up with `EducationLevel::ALL`.
        &self.shelves[level.ordinal()]
    }

    /// Total number of references across all shelves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shelves
            .iter()
            .flat_map(|s| s.entries.iter())
            .map(|e| e.videos.len())
            .sum()
    }

    /// Always false for a validated library.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: Category, videos: &[&str]) -> ShelfEntry {
        ShelfEntry {
            category,
            videos: videos.iter().map(|v| (*v).to_string()).collect(),
        }
    }

    fn complete_with(
        level: EducationLevel,
        entries: Vec<ShelfEntry>,
    ) -> Vec<(EducationLevel, Vec<ShelfEntry>)> {
        EducationLevel::ALL
            .iter()
            .map(|l| {
                if *l == level {
                    (*l, entries.clone())
                } else {
                    (*l, vec![entry(Category::Science, &["v"])])
                }
            })
            .collect()
    }

    #[test]
    fn test_standard_library_is_valid() {
        let library = VideoLibrary::standard().unwrap();
        assert_eq!(library.len(), 45);
        assert!(!library.is_empty());

        for level in EducationLevel::ALL {
            let shelf = library.shelf(level);
            assert_eq!(shelf.level(), level);
            assert_eq!(shelf.entries().len(), 3);
        }
    }

    #[test]
    fn test_first_categories_follow_listing_order() {
        let library = VideoLibrary::standard().unwrap();
        assert_eq!(library.shelf(EducationLevel::Elementary).first().category, Category::Science);
        assert_eq!(library.shelf(EducationLevel::Adult).first().category, Category::Professional);
    }

    #[test]
    fn test_resolve_falls_back_to_first() {
        let library = VideoLibrary::standard().unwrap();
        let shelf = library.shelf(EducationLevel::Elementary);
        assert!(!shelf.contains(Category::History));
        assert_eq!(shelf.resolve(Category::History).category, Category::Science);
        assert_eq!(shelf.resolve(Category::English).category, Category::English);
    }

    #[test]
    fn test_missing_level_rejected() {
        let shelves = vec![(EducationLevel::Elementary, vec![entry(Category::Math, &["v"])])];
        let err = VideoLibrary::new(shelves).unwrap_err();
        assert_eq!(
            err,
            LibraryError::MissingLevel {
                level: "middle".to_string()
            }
        );
    }

    #[test]
    fn test_empty_level_rejected() {
        let err = VideoLibrary::new(complete_with(EducationLevel::High, vec![])).unwrap_err();
        assert!(matches!(err, LibraryError::EmptyLevel { .. }));
    }

    #[test]
    fn test_empty_category_rejected() {
        let err = VideoLibrary::new(complete_with(
            EducationLevel::College,
            vec![entry(Category::Business, &[])],
        ))
        .unwrap_err();
        assert!(matches!(err, LibraryError::EmptyCategory { .. }));
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let err = VideoLibrary::new(complete_with(
            EducationLevel::Adult,
            vec![entry(Category::Health, &["a"]), entry(Category::Health, &["b"])],
        ))
        .unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateCategory { .. }));
    }
}
