//! Drives one job through every stage.

use super::error::StageError;
use super::events::ProgressSink;
use super::handle::JobHandle;
use super::job::{Job, JobState, Stage, MODEL_LOADED_PERCENT};
use super::outcome::{FailureKind, JobFailure, JobOutcome};
use super::toolkit::{FfmpegToolkit, MediaToolkit, ENHANCED_AUDIO_FILE};
use crate::config::Config;
use hushcut_av::actions::Extraction;
use hushcut_av::{Workspace, WorkspaceOptions};
use hushcut_enhance::{persist, Enhancer};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Why a run stopped before producing output.
enum Halt {
    Cancelled(Stage),
    Failed(JobFailure),
}

impl Halt {
    fn stage(stage: Stage, err: StageError) -> Self {
        Halt::Failed(err.into_failure(stage))
    }
}

/// Runs denoise jobs.
///
/// Cancellation is checked only between stages (and once between model load
/// and inference). A running ffmpeg process or inference call is never
/// interrupted.
pub struct Orchestrator {
    toolkit: Arc<dyn MediaToolkit>,
    enhancer: Enhancer,
    workspace: WorkspaceOptions,
}

impl Orchestrator {
    pub fn new(
        toolkit: Arc<dyn MediaToolkit>,
        enhancer: Enhancer,
        workspace: WorkspaceOptions,
    ) -> Self {
        Self {
            toolkit,
            enhancer,
            workspace,
        }
    }

    /// ffmpeg toolkit and RNNoise model as configured.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(FfmpegToolkit::new(config.tools(), config.audio_encoding())),
            Enhancer::new(Arc::new(config.model_loader())),
            config.workspace_options(),
        )
    }

    /// Run `job` to a terminal outcome on the current thread.
    ///
    /// Never panics and never returns early without tearing the workspace
    /// down.
    pub fn run(
        &self,
        job: &mut Job,
        progress: &mut ProgressSink,
        cancel: &CancellationToken,
    ) -> JobOutcome {
        tracing::info!(
            "Job {}: denoising {:?} -> {:?}",
            job.id,
            job.input_path,
            job.output_path
        );

        let mut workspace = match Workspace::acquire(&self.workspace) {
            Ok(ws) => ws,
            Err(e) => {
                tracing::error!("Job {}: {}", job.id, e);
                job.state = JobState::Failed;
                return JobOutcome::failed(JobFailure::new(
                    FailureKind::UnexpectedFailure,
                    None,
                    e.to_string(),
                ));
            }
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_stages(job, &mut workspace, progress, cancel)
        }));

        let report = workspace.release();
        if !report.is_clean() {
            tracing::warn!(
                "Job {}: {} temp file(s) could not be removed from {:?}",
                job.id,
                report.errors.len(),
                report.dir
            );
        }

        let outcome = match result {
            Ok(Ok(output)) => {
                job.state = JobState::Completed;
                JobOutcome::completed(output)
            }
            Ok(Err(Halt::Cancelled(stage))) => {
                tracing::info!("Job {}: cancelled before {}", job.id, stage);
                job.state = JobState::Cancelled;
                JobOutcome::Cancelled
            }
            Ok(Err(Halt::Failed(failure))) => {
                job.state = JobState::Failed;
                JobOutcome::failed(failure)
            }
            Err(payload) => {
                let stage = match job.state {
                    JobState::Running(stage) => stage,
                    _ => Stage::Sanitizing,
                };
                job.state = JobState::Failed;
                JobOutcome::failed(StageError::from_panic(payload).into_failure(stage))
            }
        };

        match &outcome {
            JobOutcome::Failed(f) if f.is_informational() => {
                tracing::info!("Job {}: {}", job.id, f.message())
            }
            JobOutcome::Failed(f) => tracing::error!("Job {}: {}", job.id, f.message()),
            JobOutcome::Completed { output_path, .. } => {
                tracing::info!("Job {}: wrote {:?}", job.id, output_path)
            }
            JobOutcome::Cancelled => {}
        }

        outcome
    }

    /// Run `job` on its own worker thread.
    pub fn submit(self: Arc<Self>, job: Job) -> JobHandle {
        JobHandle::spawn(self, job)
    }

    fn enter(
        &self,
        stage: Stage,
        job: &mut Job,
        cancel: &CancellationToken,
    ) -> Result<(), Halt> {
        if cancel.is_cancelled() {
            return Err(Halt::Cancelled(stage));
        }
        tracing::debug!("Job {}: {}", job.id, stage);
        job.state = JobState::Running(stage);
        Ok(())
    }

    fn run_stages(
        &self,
        job: &mut Job,
        workspace: &mut Workspace,
        progress: &mut ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, Halt> {
        let stage = Stage::Sanitizing;
        self.enter(stage, job, cancel)?;
        let sanitized = self
            .toolkit
            .sanitize(&job.input_path, workspace)
            .map_err(|e| Halt::stage(stage, e.into()))?;
        progress.report(stage, stage.checkpoint());

        let stage = Stage::ExtractingAudio;
        self.enter(stage, job, cancel)?;
        let raw_audio = match self.toolkit.extract_audio(&sanitized, workspace) {
            Ok(Extraction::Audio(path)) => path,
            Ok(Extraction::NoAudioTrack) => {
                return Err(Halt::Failed(JobFailure::no_audio_track()));
            }
            Err(e) => return Err(Halt::stage(stage, e.into())),
        };
        progress.report(stage, stage.checkpoint());

        let stage = Stage::Enhancing;
        self.enter(stage, job, cancel)?;
        let prepared = self
            .enhancer
            .prepare(&raw_audio)
            .map_err(|e| Halt::stage(stage, StageError::ModelLoad(e)))?;
        progress.report(stage, MODEL_LOADED_PERCENT);

        if cancel.is_cancelled() {
            return Err(Halt::Cancelled(stage));
        }
        let enhanced = prepared
            .enhance(job.attenuation_limit)
            .map_err(|e| Halt::stage(stage, StageError::Inference(e)))?;
        progress.report(stage, stage.checkpoint());

        let stage = Stage::PersistingAudio;
        self.enter(stage, job, cancel)?;
        let enhanced_path = workspace.file(ENHANCED_AUDIO_FILE);
        persist(&enhanced, &enhanced_path)
            .map_err(|e| Halt::stage(stage, StageError::Persist(e)))?;
        drop(enhanced);
        progress.report(stage, stage.checkpoint());

        let stage = Stage::Remuxing;
        self.enter(stage, job, cancel)?;
        self.toolkit
            .remux_back(&sanitized, &enhanced_path, &job.output_path)
            .map_err(|e| Halt::stage(stage, e.into()))?;
        progress.report(stage, stage.checkpoint());

        Ok(job.output_path.clone())
    }
}
