//! Handles to jobs running on worker threads.

use super::events::{ProgressEvent, ProgressSink};
use super::job::Job;
use super::orchestrator::Orchestrator;
use super::outcome::JobOutcome;
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// The caller's side of a submitted job.
///
/// Progress arrives on an unbounded channel that closes when the worker is
/// done. The outcome is a single-assignment value: it can be received once,
/// and a worker that dies without sending one yields an
/// [`UnexpectedFailure`](super::FailureKind::UnexpectedFailure).
#[derive(Debug)]
pub struct JobHandle {
    id: Uuid,
    cancel: CancellationToken,
    progress: mpsc::UnboundedReceiver<ProgressEvent>,
    outcome: oneshot::Receiver<JobOutcome>,
    worker: Option<JoinHandle<()>>,
}

impl JobHandle {
    pub(crate) fn spawn(orchestrator: Arc<Orchestrator>, mut job: Job) -> Self {
        let id = job.id;
        let cancel = CancellationToken::new();
        let (progress_tx, progress_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = oneshot::channel();

        let worker_cancel = cancel.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("hushcut-job-{}", id))
            .spawn(move || {
                let mut sink = ProgressSink::channel(job.id, progress_tx);
                let outcome = orchestrator.run(&mut job, &mut sink, &worker_cancel);
                // Close the progress stream before the outcome lands.
                drop(sink);
                let _ = outcome_tx.send(outcome);
            });

        let worker = match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::error!("Failed to spawn worker for job {}: {}", id, e);
                None
            }
        };

        Self {
            id,
            cancel,
            progress: progress_rx,
            outcome: outcome_rx,
            worker,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Ask the job to stop before its next stage. Does not interrupt the
    /// stage in flight.
    pub fn cancel(&self) {
        tracing::info!("Cancellation requested for job {}", self.id);
        self.cancel.cancel();
    }

    /// A token that cancels this job, for use from another task.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Next progress event, or `None` once the worker is finished.
    pub async fn next_progress(&mut self) -> Option<ProgressEvent> {
        self.progress.recv().await
    }

    /// Blocking variant of [`next_progress`](Self::next_progress).
    ///
    /// # Panics
    ///
    /// Panics if called from within an async runtime.
    pub fn blocking_next_progress(&mut self) -> Option<ProgressEvent> {
        self.progress.blocking_recv()
    }

    /// Wait for the terminal outcome.
    pub async fn outcome(self) -> JobOutcome {
        self.outcome.await.unwrap_or_else(|_| JobOutcome::worker_lost())
    }

    /// Block until the terminal outcome, then join the worker.
    ///
    /// # Panics
    ///
    /// Panics if called from within an async runtime.
    pub fn wait(mut self) -> JobOutcome {
        let outcome = self
            .outcome
            .blocking_recv()
            .unwrap_or_else(|_| JobOutcome::worker_lost());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        outcome
    }
}
