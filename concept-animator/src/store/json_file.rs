//! Request store persisted to a JSON file.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::{sort_newest_first, RequestStore};
use crate::core::{AnimationRequest, RequestPatch};
use crate::errors::PersistenceError;

/// Request store that keeps records in memory and rewrites a JSON array file
/// after every successful mutation.
///
/// A mutation is only kept in memory once the file write succeeded.
#[derive(Debug)]
pub struct JsonFileRequestStore {
    path: PathBuf,
    records: Mutex<Vec<AnimationRequest>>,
}

impl JsonFileRequestStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let records = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), count = records.len(), "opened request store");

        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the next snapshot is written to before it replaces the
    /// store file.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Replaces the store file atomically: an interrupted write leaves the
    /// previous snapshot in place.
    async fn write(&self, records: &[AnimationRequest]) -> Result<(), PersistenceError> {
        let json = serde_json::to_vec_pretty(records)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, json).await?;
        if let Err(e) = tokio::fs::rename(&staging, &self.path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl RequestStore for JsonFileRequestStore {
    async fn create(&self, request: AnimationRequest) -> Result<AnimationRequest, PersistenceError> {
        let mut records = self.records.lock().await;
        if records.iter().any(|r| r.id == request.id) {
            return Err(PersistenceError::Duplicate { id: request.id });
        }

        let mut next = records.clone();
        next.push(request.clone());
        self.write(&next).await?;
        *records = next;
        Ok(request)
    }

    async fn get(&self, id: Uuid) -> Result<Option<AnimationRequest>, PersistenceError> {
        let records = self.records.lock().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: RequestPatch,
    ) -> Result<AnimationRequest, PersistenceError> {
        let mut records = self.records.lock().await;
        let mut next = records.clone();
        let record = next
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(PersistenceError::NotFound { id })?;
        record.apply(&patch)?;
        let updated = record.clone();

        self.write(&next).await?;
        *records = next;
        Ok(updated)
    }

    async fn list(&self) -> Result<Vec<AnimationRequest>, PersistenceError> {
        let mut records = self.records.lock().await.clone();
        sort_newest_first(&mut records);
        Ok(records)
    }
}
