//! Progress reporting.

use super::job::Stage;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// A progress checkpoint for one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub job_id: Uuid,
    pub stage: Stage,
    pub percent: u8,
}

/// Where a job's progress goes.
///
/// Reports that would move the percentage backwards are dropped, so whatever
/// sits behind the sink sees a non-decreasing sequence.
pub struct ProgressSink {
    job_id: Uuid,
    last: Option<u8>,
    callback: Box<dyn FnMut(ProgressEvent) + Send>,
}

impl ProgressSink {
    /// Create a new sink from the given callback.
    pub fn new(job_id: Uuid, callback: impl FnMut(ProgressEvent) + Send + 'static) -> Self {
        Self {
            job_id,
            last: None,
            callback: Box::new(callback),
        }
    }

    /// Forward events into an unbounded channel. A closed receiver is not an
    /// error; the job keeps running without an audience.
    pub fn channel(job_id: Uuid, tx: UnboundedSender<ProgressEvent>) -> Self {
        Self::new(job_id, move |event| {
            let _ = tx.send(event);
        })
    }

    /// Create a no-op sink that discards all progress reports.
    pub fn noop(job_id: Uuid) -> Self {
        Self::new(job_id, |_| {})
    }

    /// Report progress. Returns `false` if the report was dropped.
    pub fn report(&mut self, stage: Stage, percent: u8) -> bool {
        let percent = percent.min(100);
        if self.last.is_some_and(|last| percent < last) {
            tracing::warn!(
                "Dropping out-of-order progress {}% for {} (last {:?}%)",
                percent,
                stage,
                self.last
            );
            return false;
        }
        self.last = Some(percent);

        tracing::info!("[{}%] {}", percent, stage);
        (self.callback)(ProgressEvent {
            job_id: self.job_id,
            stage,
            percent,
        });
        true
    }

    /// Highest percentage reported so far.
    pub fn last_percent(&self) -> Option<u8> {
        self.last
    }
}

impl std::fmt::Debug for ProgressSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressSink")
            .field("job_id", &self.job_id)
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}
