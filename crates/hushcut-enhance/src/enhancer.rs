//! Enhancement invoker.
//!
//! Enhancement is split in two so the caller can report progress and check
//! for cancellation between loading the model and running it:
//!
//! ```no_run
//! use hushcut_enhance::{Enhancer, RnnoiseLoader};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let enhancer = Enhancer::new(Arc::new(RnnoiseLoader::default()));
//! let prepared = enhancer.prepare(Path::new("original_audio.wav"))?;
//! // progress / cancellation checkpoint here
//! let enhanced = prepared.enhance(None)?;
//! # Ok::<(), hushcut_enhance::Error>(())
//! ```

use crate::{
    read_wav, resample, AttenuationLimit, AudioBuffer, EnhancementModel, Error, ModelLoader,
    Result,
};
use std::path::Path;
use std::sync::Arc;

/// Runs a model over extracted audio files.
#[derive(Clone)]
pub struct Enhancer {
    loader: Arc<dyn ModelLoader>,
}

impl Enhancer {
    pub fn new(loader: Arc<dyn ModelLoader>) -> Self {
        Self { loader }
    }

    /// Load the model and decode `raw_audio` at the model's sample rate.
    pub fn prepare(&self, raw_audio: &Path) -> Result<Prepared> {
        let model = self.loader.load()?;
        let audio = read_wav(raw_audio)?;
        let audio = resample(audio, model.sample_rate())?;

        tracing::info!(
            "Prepared {} for {:?} ({} ch, {:.2}s at {} Hz)",
            model.name(),
            raw_audio,
            audio.channel_count(),
            audio.duration().as_secs_f64(),
            audio.sample_rate
        );

        Ok(Prepared { model, audio })
    }

    /// [`prepare`](Self::prepare) and [`Prepared::enhance`] in one call.
    pub fn enhance(
        &self,
        raw_audio: &Path,
        limit: Option<AttenuationLimit>,
    ) -> Result<AudioBuffer> {
        self.prepare(raw_audio)?.enhance(limit)
    }
}

/// A loaded model with its input audio, ready for inference.
pub struct Prepared {
    model: Box<dyn EnhancementModel>,
    audio: AudioBuffer,
}

impl Prepared {
    pub fn audio(&self) -> &AudioBuffer {
        &self.audio
    }

    /// Run inference once over the whole buffer.
    pub fn enhance(self, limit: Option<AttenuationLimit>) -> Result<AudioBuffer> {
        let enhanced = self.model.enhance(&self.audio, limit)?;
        if enhanced.is_empty() {
            return Err(Error::inference("model produced no audio"));
        }

        match limit {
            Some(limit) => tracing::info!("Enhanced audio with attenuation limit {}", limit),
            None => tracing::info!("Enhanced audio without attenuation limit"),
        }
        Ok(enhanced)
    }
}
