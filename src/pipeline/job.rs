//! Jobs and their stages.

use chrono::{DateTime, Utc};
use hushcut_enhance::AttenuationLimit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Percent reported once the model is loaded and the audio is ready for
/// inference, between the extraction and enhancement checkpoints.
pub const MODEL_LOADED_PERCENT: u8 = 40;

/// One denoise request.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: Uuid,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// `None` runs the model with its own default suppression.
    pub attenuation_limit: Option<AttenuationLimit>,
    pub state: JobState,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            input_path: input_path.into(),
            output_path: output_path.into(),
            attenuation_limit: None,
            state: JobState::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn with_attenuation_limit(mut self, limit: Option<AttenuationLimit>) -> Self {
        self.attenuation_limit = limit;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "stage")]
pub enum JobState {
    Pending,
    Running(Stage),
    Completed,
    Failed,
    Cancelled,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Sanitizing,
    ExtractingAudio,
    Enhancing,
    PersistingAudio,
    Remuxing,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Sanitizing,
        Stage::ExtractingAudio,
        Stage::Enhancing,
        Stage::PersistingAudio,
        Stage::Remuxing,
    ];

    /// Percent reported when this stage completes.
    pub fn checkpoint(&self) -> u8 {
        match self {
            Stage::Sanitizing => 5,
            Stage::ExtractingAudio => 20,
            Stage::Enhancing => 70,
            Stage::PersistingAudio => 80,
            Stage::Remuxing => 100,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Sanitizing => "Sanitizing container",
            Stage::ExtractingAudio => "Extracting audio",
            Stage::Enhancing => "Enhancing audio",
            Stage::PersistingAudio => "Saving enhanced audio",
            Stage::Remuxing => "Remuxing",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
