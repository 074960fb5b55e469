//! Error types for hushcut-enhance.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or running an enhancement model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The model or its weights could not be loaded.
    #[error("failed to load enhancement model: {0}")]
    ModelLoad(String),

    /// Inference ran but did not produce usable audio.
    #[error("enhancement failed: {0}")]
    Inference(String),

    /// WAV decoding or encoding failed.
    #[error("WAV error: {0}")]
    Audio(#[from] hound::Error),

    /// Sample rate conversion failed.
    #[error("resampling failed: {0}")]
    Resample(String),

    /// There is no audio to write.
    #[error("audio buffer is empty")]
    EmptyAudio,

    /// Attenuation limit outside the supported range.
    #[error("attenuation limit must be between 1 and 60 dB, got {0}")]
    InvalidAttenuation(u32),
}

impl Error {
    /// Create a model load error.
    pub fn model_load(message: impl Into<String>) -> Self {
        Self::ModelLoad(message.into())
    }

    /// Create an inference error.
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference(message.into())
    }
}
