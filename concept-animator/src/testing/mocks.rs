//! Test doubles for the runner's collaborators.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::core::{AnimationRequest, RequestPatch, RequestStatus};
use crate::errors::{PersistenceError, RemoteCallError};
use crate::library::VideoRef;
use crate::pipeline::StageDelay;
use crate::remote::{GenerateVideoRequest, VideoGenerator};
use crate::store::{InMemoryRequestStore, RequestStore};

/// A stage delay that returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl StageDelay for NoDelay {
    async fn wait(&self, _stage_index: usize) {
        tokio::task::yield_now().await;
    }
}

/// A stage delay that blocks until the test releases it.
///
/// Each stage consumes one permit, so `release(1)` advances the run by
/// exactly one stage.
#[derive(Debug)]
pub struct GatedDelay {
    gate: Semaphore,
    entered: AtomicUsize,
}

impl GatedDelay {
    /// Creates a closed gate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
            entered: AtomicUsize::new(0),
        }
    }

    /// Lets `stages` more stages finish.
    pub fn release(&self, stages: usize) {
        self.gate.add_permits(stages);
    }

    /// Number of stages that have started waiting.
    #[must_use]
    pub fn entered(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }
}

impl Default for GatedDelay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StageDelay for GatedDelay {
    async fn wait(&self, _stage_index: usize) {
        self.entered.fetch_add(1, Ordering::SeqCst);
        if let Ok(permit) = self.gate.acquire().await {
            permit.forget();
        }
    }
}

/// A generator that always returns the same video and records requests.
#[derive(Debug)]
pub struct StaticVideoGenerator {
    video_url: VideoRef,
    requests: Mutex<Vec<GenerateVideoRequest>>,
}

impl StaticVideoGenerator {
    /// Creates a generator returning `video_url`.
    #[must_use]
    pub fn new(video_url: impl Into<VideoRef>) -> Self {
        Self {
            video_url: video_url.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<GenerateVideoRequest> {
        self.requests.lock().clone()
    }

    /// Returns the number of calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl VideoGenerator for StaticVideoGenerator {
    async fn generate(&self, request: &GenerateVideoRequest) -> Result<VideoRef, RemoteCallError> {
        self.requests.lock().push(request.clone());
        Ok(self.video_url.clone())
    }
}

/// A generator that always fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingVideoGenerator {
    error: RemoteCallError,
}

impl FailingVideoGenerator {
    /// Fails with `error`.
    #[must_use]
    pub fn new(error: RemoteCallError) -> Self {
        Self { error }
    }

    /// Fails as if the service was unreachable.
    #[must_use]
    pub fn unreachable() -> Self {
        Self::new(RemoteCallError::Transport("connection refused".to_string()))
    }

    /// Fails as if the service answered without a video.
    #[must_use]
    pub fn without_video() -> Self {
        Self::new(RemoteCallError::MissingVideoUrl)
    }
}

#[async_trait]
impl VideoGenerator for FailingVideoGenerator {
    async fn generate(&self, _request: &GenerateVideoRequest) -> Result<VideoRef, RemoteCallError> {
        Err(self.error.clone())
    }
}

/// An in-memory store that fails selected operations.
#[derive(Debug, Default)]
pub struct FailingRequestStore {
    inner: InMemoryRequestStore,
    fail_create: bool,
    fail_statuses: HashSet<RequestStatus>,
}

impl FailingRequestStore {
    /// Creates a store that fails nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails every `create`.
    #[must_use]
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Fails every update to `status`.
    #[must_use]
    pub fn failing_update_to(mut self, status: RequestStatus) -> Self {
        self.fail_statuses.insert(status);
        self
    }
}

#[async_trait]
impl RequestStore for FailingRequestStore {
    async fn create(&self, request: AnimationRequest) -> Result<AnimationRequest, PersistenceError> {
        if self.fail_create {
            return Err(PersistenceError::unavailable("create disabled"));
        }
        self.inner.create(request).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<AnimationRequest>, PersistenceError> {
        self.inner.get(id).await
    }

    async fn update(
        &self,
        id: Uuid,
        patch: RequestPatch,
    ) -> Result<AnimationRequest, PersistenceError> {
        if self.fail_statuses.contains(&patch.status) {
            return Err(PersistenceError::unavailable(format!(
                "update to {} disabled",
                patch.status
            )));
        }
        self.inner.update(id, patch).await
    }

    async fn list(&self) -> Result<Vec<AnimationRequest>, PersistenceError> {
        self.inner.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FormData;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_gated_delay_waits_for_release() {
        let delay = Arc::new(GatedDelay::new());
        let waiter = {
            let delay = Arc::clone(&delay);
            tokio::spawn(async move { delay.wait(0).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(delay.entered(), 1);
        assert!(!waiter.is_finished());

        delay.release(1);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_failing_store_selective() {
        let store = FailingRequestStore::new().failing_update_to(RequestStatus::Processing);
        let record = store
            .create(AnimationRequest::from_form(&FormData::new("Atoms")))
            .await
            .unwrap();

        assert!(store
            .update(record.id, RequestPatch::processing())
            .await
            .is_err());
        assert!(store.update(record.id, RequestPatch::failed()).await.is_ok());
    }

    #[tokio::test]
    async fn test_static_generator_records_requests() {
        let generator = StaticVideoGenerator::new("https://v/1");
        let request = GenerateVideoRequest::default();
        assert_eq!(generator.generate(&request).await.unwrap(), "https://v/1");
        assert_eq!(generator.call_count(), 1);
    }
}
