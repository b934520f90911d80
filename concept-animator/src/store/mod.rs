//! Persistence of animation request records.
//!
//! The pipeline talks to storage only through [`RequestStore`]. Every
//! implementation enforces the record invariants through
//! [`AnimationRequest::apply`], so a store never accepts a backward status
//! change or a completion without a video reference.

mod json_file;
mod memory;

pub use json_file::JsonFileRequestStore;
pub use memory::InMemoryRequestStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::{AnimationRequest, RequestPatch};
use crate::errors::PersistenceError;

/// Record store for animation requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Inserts a new record. Fails with [`PersistenceError::Duplicate`] if the
    /// id is taken.
    async fn create(&self, request: AnimationRequest) -> Result<AnimationRequest, PersistenceError>;

    /// Reads a record by id.
    async fn get(&self, id: Uuid) -> Result<Option<AnimationRequest>, PersistenceError>;

    /// Applies a partial update and returns the updated record.
    async fn update(&self, id: Uuid, patch: RequestPatch)
        -> Result<AnimationRequest, PersistenceError>;

    /// Lists all records, newest first.
    async fn list(&self) -> Result<Vec<AnimationRequest>, PersistenceError>;
}

/// Sorts records newest first, breaking ties by id for a stable order.
pub(crate) fn sort_newest_first(records: &mut [AnimationRequest]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
}
