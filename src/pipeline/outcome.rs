//! Terminal results of a job.

use super::job::Stage;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Message shown when the input has nothing to denoise.
pub const NO_AUDIO_MESSAGE: &str = "Input video has no audio track; nothing to denoise.";

/// What went wrong, coarse-grained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// ffmpeg/ffprobe exited non-zero or could not be found.
    ExternalToolFailure,
    /// The input has no audio stream. Informational, not a crash.
    NoAudioTrack,
    ModelLoadFailure,
    ModelInferenceFailure,
    PersistFailure,
    /// Anything else, including panics inside a stage.
    UnexpectedFailure,
}

impl FailureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::ExternalToolFailure => "External tool failed",
            FailureKind::NoAudioTrack => "No audio track",
            FailureKind::ModelLoadFailure => "Failed to load enhancement model",
            FailureKind::ModelInferenceFailure => "Enhancement failed",
            FailureKind::PersistFailure => "Failed to save enhanced audio",
            FailureKind::UnexpectedFailure => "Unexpected error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A failed job: the kind, where it happened and the most specific
/// diagnostic available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobFailure {
    pub kind: FailureKind,
    /// `None` when the job failed before its first stage.
    pub stage: Option<Stage>,
    pub detail: String,
}

impl JobFailure {
    pub fn new(kind: FailureKind, stage: Option<Stage>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            stage,
            detail: detail.into(),
        }
    }

    pub fn no_audio_track() -> Self {
        Self::new(
            FailureKind::NoAudioTrack,
            Some(Stage::ExtractingAudio),
            NO_AUDIO_MESSAGE,
        )
    }

    /// True for outcomes that should be shown as a notice rather than an
    /// error.
    pub fn is_informational(&self) -> bool {
        self.kind == FailureKind::NoAudioTrack
    }

    /// The single human-readable message for this failure.
    pub fn message(&self) -> String {
        if self.is_informational() {
            return self.detail.clone();
        }
        match self.stage {
            Some(stage) => format!(
                "{} while {}: {}",
                self.kind,
                stage.name().to_lowercase(),
                self.detail
            ),
            None => format!("{}: {}", self.kind, self.detail),
        }
    }
}

impl fmt::Display for JobFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Exactly one of these is delivered per job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum JobOutcome {
    Completed { output_path: PathBuf, message: String },
    Failed(JobFailure),
    Cancelled,
}

impl JobOutcome {
    pub fn completed(output_path: PathBuf) -> Self {
        let message = format!(
            "Successfully denoised and saved to:\n{}",
            output_path.display()
        );
        Self::Completed {
            output_path,
            message,
        }
    }

    pub fn failed(failure: JobFailure) -> Self {
        Self::Failed(failure)
    }

    /// Outcome for a worker that went away without reporting.
    pub fn worker_lost() -> Self {
        Self::Failed(JobFailure::new(
            FailureKind::UnexpectedFailure,
            None,
            "job worker exited without reporting an outcome",
        ))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn message(&self) -> String {
        match self {
            Self::Completed { message, .. } => message.clone(),
            Self::Failed(failure) => failure.message(),
            Self::Cancelled => "Denoising cancelled.".to_string(),
        }
    }
}
