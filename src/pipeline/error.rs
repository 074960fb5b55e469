//! Stage-level errors and how they map onto [`FailureKind`].

use super::job::Stage;
use super::outcome::{FailureKind, JobFailure};

/// An error raised inside one pipeline stage.
///
/// These never leave the orchestrator; each is turned into exactly one
/// [`JobFailure`] at the stage boundary.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// Media tooling failed: a missing or failing ffmpeg/ffprobe, or the
    /// plumbing around it (files, workspace).
    #[error(transparent)]
    Tool(#[from] hushcut_av::Error),

    /// Model initialization, or decoding its input, failed.
    #[error("{0}")]
    ModelLoad(#[source] hushcut_enhance::Error),

    /// Inference raised or produced nothing.
    #[error("{0}")]
    Inference(#[source] hushcut_enhance::Error),

    /// Writing the enhanced audio failed.
    #[error("{0}")]
    Persist(#[source] hushcut_enhance::Error),

    /// A stage panicked.
    #[error("panic: {0}")]
    Panic(String),
}

impl StageError {
    pub fn kind(&self) -> FailureKind {
        match self {
            StageError::Tool(e) if e.is_tool_error() => FailureKind::ExternalToolFailure,
            StageError::Tool(_) => FailureKind::UnexpectedFailure,
            StageError::ModelLoad(_) => FailureKind::ModelLoadFailure,
            StageError::Inference(_) => FailureKind::ModelInferenceFailure,
            StageError::Persist(_) => FailureKind::PersistFailure,
            StageError::Panic(_) => FailureKind::UnexpectedFailure,
        }
    }

    pub fn into_failure(self, stage: Stage) -> JobFailure {
        JobFailure::new(self.kind(), Some(stage), self.to_string())
    }

    /// Best-effort text from a `catch_unwind` payload.
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        StageError::Panic(message)
    }
}
