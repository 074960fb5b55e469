//! Shared fixtures for pipeline tests: a scriptable media toolkit, a
//! recording model loader and WAV helpers. Nothing here needs ffmpeg.

#![allow(dead_code)]

use hushcut::pipeline::{MediaToolkit, Orchestrator};
use hushcut_av::actions::{Extraction, EXTRACTED_AUDIO_FILE};
use hushcut_av::{Workspace, WorkspaceOptions};
use hushcut_enhance::{
    persist, AttenuationLimit, AudioBuffer, EnhancementModel, Enhancer, ModelLoader,
};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// How a fake stage behaves.
#[derive(Debug, Clone, Default)]
pub enum Step {
    #[default]
    Succeed,
    /// Fail like a tool that printed this to stderr.
    Fail(String),
    Panic,
}

/// A [`MediaToolkit`] that writes small stand-in files and records calls.
#[derive(Default)]
pub struct FakeToolkit {
    pub sanitize: Step,
    pub extract: Step,
    pub remux: Step,
    /// Report no audio stream from extraction.
    pub no_audio: bool,
    /// Sample rate of the extracted WAV.
    pub audio_rate: Option<u32>,
    /// Cancelled while sanitizing, to model a request arriving mid-stage.
    pub cancel_during_sanitize: Option<CancellationToken>,
    /// Sanitizing blocks until this yields.
    pub sanitize_gate: Mutex<Option<mpsc::Receiver<()>>>,
    pub calls: Mutex<Vec<&'static str>>,
    pub workspaces: Mutex<Vec<PathBuf>>,
}

impl FakeToolkit {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn workspaces(&self) -> Vec<PathBuf> {
        self.workspaces.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn outcome(step: &Step) -> hushcut_av::Result<()> {
        match step {
            Step::Succeed => Ok(()),
            Step::Fail(stderr) => Err(hushcut_av::Error::tool_failed("ffmpeg", stderr.clone())),
            Step::Panic => panic!("fake tool crashed"),
        }
    }
}

impl MediaToolkit for FakeToolkit {
    fn sanitize(&self, source: &Path, workspace: &mut Workspace) -> hushcut_av::Result<PathBuf> {
        self.record("sanitize");
        self.workspaces
            .lock()
            .unwrap()
            .push(workspace.path().to_path_buf());

        if let Some(gate) = self.sanitize_gate.lock().unwrap().take() {
            let _ = gate.recv();
        }
        if let Some(token) = &self.cancel_during_sanitize {
            token.cancel();
        }

        let name = format!(
            "sanitized_{}",
            source.file_name().unwrap().to_string_lossy()
        );
        let output = workspace.file(&name);
        std::fs::write(&output, b"sanitized video").unwrap();
        Self::outcome(&self.sanitize)?;
        Ok(output)
    }

    fn extract_audio(
        &self,
        _sanitized: &Path,
        workspace: &mut Workspace,
    ) -> hushcut_av::Result<Extraction> {
        self.record("extract");
        if self.no_audio {
            return Ok(Extraction::NoAudioTrack);
        }
        Self::outcome(&self.extract)?;

        let output = workspace.file(EXTRACTED_AUDIO_FILE);
        write_tone(&output, self.audio_rate.unwrap_or(48_000), 2, 0.25);
        Ok(Extraction::Audio(output))
    }

    fn remux_back(&self, _video: &Path, audio: &Path, output: &Path) -> hushcut_av::Result<()> {
        self.record("remux");
        Self::outcome(&self.remux)?;
        // Stand-in container: the enhanced audio itself.
        std::fs::copy(audio, output).map_err(hushcut_av::Error::from)?;
        Ok(())
    }
}

/// What a fake model returns.
#[derive(Debug, Clone, Copy, Default)]
pub enum ModelBehavior {
    /// Halve every sample.
    #[default]
    Attenuate,
    /// Return an empty buffer.
    Silent,
    /// Refuse to load.
    BrokenWeights,
}

/// A [`ModelLoader`] that records every load and every attenuation limit.
#[derive(Default)]
pub struct FakeLoader {
    pub behavior: ModelBehavior,
    pub loads: Mutex<usize>,
    pub limits: Arc<Mutex<Vec<Option<u32>>>>,
}

impl FakeLoader {
    pub fn with(behavior: ModelBehavior) -> Self {
        Self {
            behavior,
            ..Self::default()
        }
    }

    pub fn loads(&self) -> usize {
        *self.loads.lock().unwrap()
    }

    pub fn limits(&self) -> Vec<Option<u32>> {
        self.limits.lock().unwrap().clone()
    }
}

impl ModelLoader for FakeLoader {
    fn load(&self) -> hushcut_enhance::Result<Box<dyn EnhancementModel>> {
        *self.loads.lock().unwrap() += 1;
        if let ModelBehavior::BrokenWeights = self.behavior {
            return Err(hushcut_enhance::Error::model_load("weights.rnn: truncated"));
        }
        Ok(Box::new(FakeModel {
            behavior: self.behavior,
            limits: self.limits.clone(),
        }))
    }
}

struct FakeModel {
    behavior: ModelBehavior,
    limits: Arc<Mutex<Vec<Option<u32>>>>,
}

impl EnhancementModel for FakeModel {
    fn name(&self) -> &str {
        "fake"
    }

    fn sample_rate(&self) -> u32 {
        48_000
    }

    fn enhance(
        &self,
        audio: &AudioBuffer,
        limit: Option<AttenuationLimit>,
    ) -> hushcut_enhance::Result<AudioBuffer> {
        self.limits.lock().unwrap().push(limit.map(|l| l.db()));
        match self.behavior {
            ModelBehavior::Silent => Ok(AudioBuffer::new(vec![], audio.sample_rate)),
            _ => {
                let channels = audio
                    .channels
                    .iter()
                    .map(|ch| ch.iter().map(|s| s * 0.5).collect())
                    .collect();
                Ok(AudioBuffer::new(channels, audio.sample_rate))
            }
        }
    }
}

/// Write a sine tone as 16-bit PCM WAV.
pub fn write_tone(path: &Path, sample_rate: u32, channels: usize, seconds: f32) {
    let frames = (sample_rate as f32 * seconds) as usize;
    let tone: Vec<f32> = (0..frames)
        .map(|i| (i as f32 * 440.0 * std::f32::consts::TAU / sample_rate as f32).sin() * 0.3)
        .collect();
    persist(&AudioBuffer::new(vec![tone; channels], sample_rate), path).unwrap();
}

/// Workspace options rooted in a private directory, with no cleanup delay.
pub fn workspace_root() -> (TempDir, WorkspaceOptions) {
    let root = tempfile::tempdir().unwrap();
    let options = WorkspaceOptions {
        root: Some(root.path().to_path_buf()),
        cleanup_grace: Duration::ZERO,
    };
    (root, options)
}

/// True when nothing is left under the workspace root.
pub fn is_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path).unwrap().next().is_none()
}

pub fn orchestrator(
    toolkit: Arc<FakeToolkit>,
    loader: Arc<dyn ModelLoader>,
    options: WorkspaceOptions,
) -> Orchestrator {
    Orchestrator::new(toolkit, Enhancer::new(loader), options)
}
