//! RNNoise backend via `nnnoiseless`.

use crate::model::limit_suppression;
use crate::{AttenuationLimit, AudioBuffer, EnhancementModel, Error, ModelLoader, Result};
use nnnoiseless::{DenoiseState, RnnModel};
use std::path::{Path, PathBuf};

/// RNNoise operates on 10 ms frames at 48 kHz.
const FRAME_SIZE: usize = 480;
const SAMPLE_RATE: u32 = 48_000;

/// RNNoise expects samples in the i16 range.
const PCM_SCALE: f32 = 32767.0;

/// File looked up inside a model directory.
pub const WEIGHTS_FILE: &str = "weights.rnn";

/// Loads RNNoise with built-in weights, or with weights from a directory.
#[derive(Debug, Clone, Default)]
pub struct RnnoiseLoader {
    model_dir: Option<PathBuf>,
}

impl RnnoiseLoader {
    pub fn new(model_dir: Option<PathBuf>) -> Self {
        Self { model_dir }
    }

    pub fn model_dir(&self) -> Option<&Path> {
        self.model_dir.as_deref()
    }
}

impl ModelLoader for RnnoiseLoader {
    fn load(&self) -> Result<Box<dyn EnhancementModel>> {
        let Some(dir) = &self.model_dir else {
            tracing::debug!("Using built-in RNNoise weights");
            return Ok(Box::new(RnnoiseModel { weights: None }));
        };

        let path = dir.join(WEIGHTS_FILE);
        let bytes = std::fs::read(&path)
            .map_err(|e| Error::model_load(format!("{}: {}", path.display(), e)))?;
        let weights = RnnModel::from_bytes(&bytes).ok_or_else(|| {
            Error::model_load(format!("{}: not a valid RNNoise model", path.display()))
        })?;

        tracing::debug!("Loaded RNNoise weights from {:?}", path);
        Ok(Box::new(RnnoiseModel {
            weights: Some(weights),
        }))
    }
}

/// A loaded RNNoise model. Each call runs a fresh denoiser per channel.
pub struct RnnoiseModel {
    weights: Option<RnnModel>,
}

impl RnnoiseModel {
    fn denoiser(&self) -> Box<DenoiseState<'_>> {
        match &self.weights {
            Some(weights) => DenoiseState::with_model(weights),
            None => DenoiseState::new(),
        }
    }

    /// Denoise one channel. Output lags input by one frame, so the input is
    /// padded by a frame and the first output frame is dropped.
    fn denoise_channel(&self, samples: &[f32]) -> Vec<f32> {
        let mut state = self.denoiser();
        let mut output = Vec::with_capacity(samples.len() + FRAME_SIZE);
        let mut in_frame = [0.0f32; FRAME_SIZE];
        let mut out_frame = [0.0f32; FRAME_SIZE];

        let padded_len = samples.len() + FRAME_SIZE;
        let mut pos = 0;
        while pos < padded_len {
            in_frame.fill(0.0);
            for (slot, s) in in_frame.iter_mut().zip(samples.iter().skip(pos)) {
                *slot = s * PCM_SCALE;
            }
            state.process_frame(&mut out_frame, &in_frame);
            output.extend(out_frame.iter().map(|s| s / PCM_SCALE));
            pos += FRAME_SIZE;
        }

        output.drain(..FRAME_SIZE);
        output.truncate(samples.len());
        output
    }
}

impl EnhancementModel for RnnoiseModel {
    fn name(&self) -> &str {
        "rnnoise"
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn enhance(
        &self,
        audio: &AudioBuffer,
        limit: Option<AttenuationLimit>,
    ) -> Result<AudioBuffer> {
        if audio.sample_rate != SAMPLE_RATE {
            return Err(Error::inference(format!(
                "expected {} Hz input, got {} Hz",
                SAMPLE_RATE, audio.sample_rate
            )));
        }

        let channels = audio
            .channels
            .iter()
            .map(|ch| self.denoise_channel(ch))
            .collect();
        let mut enhanced = AudioBuffer::new(channels, SAMPLE_RATE);

        if let Some(limit) = limit {
            limit_suppression(audio, &mut enhanced, limit);
        }

        Ok(enhanced)
    }
}
