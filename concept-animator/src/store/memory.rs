//! In-memory request store.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::{sort_newest_first, RequestStore};
use crate::core::{AnimationRequest, RequestPatch};
use crate::errors::PersistenceError;

/// Request store backed by a concurrent map. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct InMemoryRequestStore {
    records: DashMap<Uuid, AnimationRequest>,
}

impl InMemoryRequestStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn create(&self, request: AnimationRequest) -> Result<AnimationRequest, PersistenceError> {
        match self.records.entry(request.id) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(PersistenceError::Duplicate { id: request.id })
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(request.clone());
                Ok(request)
            }
        }
    }

    async fn get(&self, id: Uuid) -> Result<Option<AnimationRequest>, PersistenceError> {
        Ok(self.records.get(&id).map(|r| r.clone()))
    }

    async fn update(
        &self,
        id: Uuid,
        patch: RequestPatch,
    ) -> Result<AnimationRequest, PersistenceError> {
        let mut record = self
            .records
            .get_mut(&id)
            .ok_or(PersistenceError::NotFound { id })?;
        record.apply(&patch)?;
        Ok(record.clone())
    }

    async fn list(&self) -> Result<Vec<AnimationRequest>, PersistenceError> {
        let mut records: Vec<AnimationRequest> =
            self.records.iter().map(|r| r.value().clone()).collect();
        sort_newest_first(&mut records);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FormData, RequestStatus};
    use chrono::Duration;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_create_and_get() {
        let store = InMemoryRequestStore::new();
        let record = AnimationRequest::from_form(&FormData::new("Atoms"));
        let id = record.id;

        assert_ok!(store.create(record.clone()).await);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).await.unwrap(), Some(record));
        assert_eq!(store.get(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_create_rejected() {
        let store = InMemoryRequestStore::new();
        let record = AnimationRequest::from_form(&FormData::new("Atoms"));

        assert_ok!(store.create(record.clone()).await);
        let err = assert_err!(store.create(record).await);
        assert!(matches!(err, PersistenceError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_update_lifecycle() {
        let store = InMemoryRequestStore::new();
        let record = store
            .create(AnimationRequest::from_form(&FormData::new("Atoms")))
            .await
            .unwrap();

        let updated = store.update(record.id, RequestPatch::processing()).await.unwrap();
        assert_eq!(updated.status, RequestStatus::Processing);

        let updated = store
            .update(record.id, RequestPatch::completed("https://v/1"))
            .await
            .unwrap();
        assert_eq!(updated.status, RequestStatus::Completed);
        assert!(updated.updated_at >= record.updated_at);

        let err = assert_err!(store.update(record.id, RequestPatch::failed()).await);
        assert!(matches!(err, PersistenceError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let store = InMemoryRequestStore::new();
        let err = assert_err!(store.update(Uuid::new_v4(), RequestPatch::failed()).await);
        assert!(matches!(err, PersistenceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = InMemoryRequestStore::new();
        let mut older = AnimationRequest::from_form(&FormData::new("Older"));
        older.created_at -= Duration::minutes(5);
        let newer = AnimationRequest::from_form(&FormData::new("Newer"));

        store.create(older).await.unwrap();
        store.create(newer).await.unwrap();

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["Newer", "Older"]);
    }
}
