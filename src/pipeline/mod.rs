//! The denoise pipeline: sanitize, extract, enhance, persist, remux.
//!
//! [`Orchestrator::run`] drives a [`Job`] through every [`Stage`] on the
//! calling thread; [`Orchestrator::submit`] does the same on a dedicated
//! worker and hands back a [`JobHandle`].

mod error;
mod events;
mod handle;
mod job;
mod orchestrator;
mod outcome;
mod toolkit;

pub use error::StageError;
pub use events::{ProgressEvent, ProgressSink};
pub use handle::JobHandle;
pub use job::{Job, JobState, Stage, MODEL_LOADED_PERCENT};
pub use orchestrator::Orchestrator;
pub use outcome::{FailureKind, JobFailure, JobOutcome, NO_AUDIO_MESSAGE};
pub use toolkit::{FfmpegToolkit, MediaToolkit, ENHANCED_AUDIO_FILE};
