use hushcut_av::actions::AudioEncoding;
use hushcut_av::{Tools, WorkspaceOptions};
use hushcut_enhance::{AttenuationLimit, RnnoiseLoader};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub workspace: WorkspaceConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn tools(&self) -> Tools {
        Tools::new(
            self.tools.ffmpeg_path.clone(),
            self.tools.ffprobe_path.clone(),
        )
    }

    pub fn workspace_options(&self) -> WorkspaceOptions {
        WorkspaceOptions {
            root: self.workspace.root.clone(),
            cleanup_grace: Duration::from_millis(self.workspace.cleanup_grace_ms),
        }
    }

    pub fn audio_encoding(&self) -> AudioEncoding {
        AudioEncoding {
            codec: self.output.audio_codec.clone(),
            bitrate: self.output.audio_bitrate.clone(),
        }
    }

    pub fn model_loader(&self) -> RnnoiseLoader {
        RnnoiseLoader::new(self.model.dir.clone())
    }

    /// Default attenuation limit for jobs that don't set their own.
    pub fn attenuation_limit(&self) -> Option<AttenuationLimit> {
        self.model
            .attenuation_limit_db
            .and_then(|db| AttenuationLimit::new(db).ok())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Directory holding `weights.rnn`; built-in weights when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Maximum suppression in dB (1-60); unlimited when unset
    #[serde(default)]
    pub attenuation_limit_db: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkspaceConfig {
    /// Parent directory for per-job temp dirs (default: system temp dir)
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Delay before temp files are removed, in milliseconds
    #[serde(default = "default_cleanup_grace_ms")]
    pub cleanup_grace_ms: u64,
}

fn default_cleanup_grace_ms() -> u64 {
    500
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: None,
            cleanup_grace_ms: default_cleanup_grace_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,
}

fn default_audio_codec() -> String {
    "aac".to_string()
}
fn default_audio_bitrate() -> String {
    "320k".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            audio_codec: default_audio_codec(),
            audio_bitrate: default_audio_bitrate(),
        }
    }
}
