//! Video library and content selection.
//!
//! This module provides:
//! - Keyword classification of concept text into categories
//! - The validated `(level, category)` video library
//! - The deterministic title hash used to pick within a category
//! - [`ContentSelector`], which ties the three together

mod catalog;
mod hash;
mod keywords;
mod selector;

pub use catalog::{Shelf, ShelfEntry, VideoLibrary, VideoRef, STANDARD_LIBRARY};
pub use hash::{pick_index, title_hash};
pub use keywords::{classify, Category, DEFAULT_CATEGORY, KEYWORD_SETS};
pub use selector::{ContentSelector, Selection};
