//! The five-stage generation runner.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::delay::{RandomDelay, StageDelay};
use super::descriptions::visual_description;
use super::outcome::{RunHandle, RunOutcome};
use super::state::PipelineState;
use crate::core::{
    AnimationRequest, FormData, Notice, PipelineEvent, RequestPatch, RequestStatus, StepStatus,
    MSG_GENERATION_FAILED, MSG_READY, MSG_RUN_IN_PROGRESS, MSG_SAVE_FAILED,
    MSG_UNEXPECTED_FAILURE, STAGES,
};
use crate::errors::{AnimatorError, PersistenceError};
use crate::events::{EventSink, NoOpEventSink};
use crate::library::VideoRef;
use crate::remote::{GenerateVideoRequest, VideoGenerator};
use crate::store::RequestStore;

/// Drives one generation run at a time through the five stages.
///
/// The runner is cheap to clone; clones share state, store and the in-flight
/// guard. Observers follow progress through [`PipelineRunner::subscribe`].
#[derive(Clone)]
pub struct PipelineRunner {
    store: Arc<dyn RequestStore>,
    generator: Arc<dyn VideoGenerator>,
    delay: Arc<dyn StageDelay>,
    sink: Arc<dyn EventSink>,
    state: Arc<watch::Sender<PipelineState>>,
    in_flight: Arc<AtomicBool>,
}

impl std::fmt::Debug for PipelineRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineRunner")
            .field("state", &*self.state.borrow())
            .field("in_flight", &self.in_flight.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

/// Releases the in-flight flag when the run ends, however it ends.
///
/// On the normal paths the guard is dropped inside the final state update, so
/// an observer that sees the terminal state can start the next run.
struct RunGuard(Arc<AtomicBool>);

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl PipelineRunner {
    /// Creates a runner with the default random stage delay and no event sink.
    pub fn new(store: Arc<dyn RequestStore>, generator: Arc<dyn VideoGenerator>) -> Self {
        let (state, _) = watch::channel(PipelineState::default());
        Self {
            store,
            generator,
            delay: Arc::new(RandomDelay::default()),
            sink: Arc::new(NoOpEventSink),
            state: Arc::new(state),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replaces the stage delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Arc<dyn StageDelay>) -> Self {
        self.delay = delay;
        self
    }

    /// Replaces the event sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Subscribes to state snapshots.
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    /// Returns the current state snapshot.
    pub fn state(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    /// Whether a run is in flight.
    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Reads a request record.
    pub async fn poll_status(&self, id: Uuid) -> Result<Option<AnimationRequest>, PersistenceError> {
        self.store.get(id).await
    }

    /// Lists request records, newest first.
    pub async fn history(&self) -> Result<Vec<AnimationRequest>, PersistenceError> {
        self.store.list().await
    }

    /// Validates `form`, creates its record and spawns the stage loop.
    ///
    /// Returns once the record exists; the run continues in the background.
    /// Fails without side effects on a blank title or while another run is
    /// in flight, and aborts before any stage if the record cannot be created.
    pub async fn start(&self, form: FormData) -> Result<RunHandle, AnimatorError> {
        if let Err(e) = form.validate() {
            self.notify(Notice::error(e.message.clone()));
            return Err(e.into());
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(title = %form.title, "rejected start while a run is in flight");
            self.notify(Notice::error(MSG_RUN_IN_PROGRESS));
            return Err(AnimatorError::RunInProgress);
        }
        let guard = RunGuard(Arc::clone(&self.in_flight));

        self.state.send_modify(PipelineState::begin_run);

        let record = match self.store.create(AnimationRequest::from_form(&form)).await {
            Ok(record) => record,
            Err(e) => {
                error!(error = %e, title = %form.title, "failed to create request record");
                self.state.send_modify(move |s| {
                    s.is_generating = false;
                    s.last_notice = Some(Notice::error(MSG_SAVE_FAILED));
                    drop(guard);
                });
                return Err(e.into());
            }
        };
        let request_id = record.id;

        self.state.send_modify(|s| s.request_id = Some(request_id));
        info!(%request_id, title = %form.title, level = %form.education_level, "generation run started");
        self.sink.publish(&PipelineEvent::started(request_id, &form.title));

        let runner = self.clone();
        let task = tokio::spawn(async move { runner.run(request_id, &form, guard).await });

        Ok(RunHandle::new(request_id, task))
    }

    async fn run(&self, request_id: Uuid, form: &FormData, guard: RunGuard) -> RunOutcome {
        let result = AssertUnwindSafe(self.run_stages(request_id, form))
            .catch_unwind()
            .await;

        match result {
            Ok(Ok(video_url)) => self.finish_completed(request_id, video_url, guard).await,
            Ok(Err(AnimatorError::RemoteCall(e))) => {
                self.finish_failed(request_id, e.to_string(), MSG_GENERATION_FAILED, guard)
                    .await
            }
            Ok(Err(e)) => {
                self.finish_failed(request_id, e.to_string(), MSG_UNEXPECTED_FAILURE, guard)
                    .await
            }
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "run panicked".to_string());
                self.finish_failed(request_id, reason, MSG_UNEXPECTED_FAILURE, guard)
                    .await
            }
        }
    }

    async fn run_stages(&self, request_id: Uuid, form: &FormData) -> Result<VideoRef, AnimatorError> {
        for (index, stage) in STAGES.iter().enumerate() {
            self.state.send_modify(|s| {
                s.current_step = index;
                s.steps[index].status = StepStatus::Active;
            });
            debug!(%request_id, stage = index, title = stage.title, "stage started");
            self.sink
                .publish(&PipelineEvent::stage_started(request_id, index, stage.title));

            if index == 0 {
                self.mark_processing(request_id).await;
            }

            let started = Instant::now();
            self.delay.wait(index).await;
            let description = visual_description(index, form);

            self.state.send_modify(|s| {
                let step = &mut s.steps[index];
                step.status = StepStatus::Complete;
                step.visual_description.clone_from(&description);
            });
            debug!(%request_id, stage = index, "stage completed");
            self.sink.publish(&PipelineEvent::stage_completed(
                request_id,
                index,
                &description,
                started.elapsed().as_secs_f64() * 1000.0,
            ));
        }

        let request = GenerateVideoRequest::new(
            request_id,
            form.title.clone(),
            form.normalized_description(),
            form.education_level,
        );
        Ok(self.generator.generate(&request).await?)
    }

    /// Best-effort: a lost write is logged and the run continues.
    async fn mark_processing(&self, request_id: Uuid) {
        if let Err(e) = self.store.update(request_id, RequestPatch::processing()).await {
            warn!(%request_id, error = %e, "failed to mark request as processing");
            self.sink.publish(&PipelineEvent::status_update_failed(
                request_id,
                RequestStatus::Processing,
                &e.to_string(),
            ));
        }
    }

    async fn finish_completed(
        &self,
        request_id: Uuid,
        video_url: VideoRef,
        guard: RunGuard,
    ) -> RunOutcome {
        let persisted = match self
            .store
            .update(request_id, RequestPatch::completed(video_url.clone()))
            .await
        {
            Ok(_) => true,
            Err(e) => {
                error!(%request_id, error = %e, "failed to persist completed status");
                self.sink.publish(&PipelineEvent::status_update_failed(
                    request_id,
                    RequestStatus::Completed,
                    &e.to_string(),
                ));
                false
            }
        };

        let ready_url = video_url.clone();
        self.state.send_modify(move |s| {
            s.is_generating = false;
            s.is_ready = true;
            s.video_url = Some(ready_url);
            s.last_notice = Some(Notice::success(MSG_READY));
            drop(guard);
        });
        info!(%request_id, %video_url, persisted, "generation run completed");
        self.sink
            .publish(&PipelineEvent::completed(request_id, &video_url, persisted));

        RunOutcome::Completed {
            request_id,
            video_url,
            persisted,
        }
    }

    async fn finish_failed(
        &self,
        request_id: Uuid,
        reason: String,
        message: &str,
        guard: RunGuard,
    ) -> RunOutcome {
        let persisted = match self.store.update(request_id, RequestPatch::failed()).await {
            Ok(_) => true,
            Err(e) => {
                warn!(%request_id, error = %e, "failed to persist failed status");
                self.sink.publish(&PipelineEvent::status_update_failed(
                    request_id,
                    RequestStatus::Failed,
                    &e.to_string(),
                ));
                false
            }
        };

        self.state.send_modify(move |s| {
            s.is_generating = false;
            s.last_notice = Some(Notice::error(message));
            drop(guard);
        });
        error!(%request_id, %reason, persisted, "generation run failed");
        self.sink
            .publish(&PipelineEvent::failed(request_id, &reason, persisted));

        RunOutcome::Failed {
            request_id,
            reason,
            persisted,
        }
    }

    fn notify(&self, notice: Notice) {
        self.state.send_modify(|s| s.last_notice = Some(notice));
    }
}
