//! # hushcut-enhance
//!
//! Speech enhancement for the hushcut denoise pipeline.
//!
//! This crate provides:
//!
//! - **[`EnhancementModel`] / [`ModelLoader`]** -- the model seam, with the
//!   RNNoise backend in [`RnnoiseLoader`].
//! - **[`Enhancer`]** -- loads a model, decodes and resamples the extracted
//!   audio, and runs inference as two separately observable steps.
//! - **[`persist`]** -- writes enhanced audio as 16-bit PCM WAV.
//! - **[`AttenuationLimit`]** -- the validated 1..=60 dB suppression cap.

mod buffer;
mod enhancer;
mod error;
pub mod model;
mod resample;
pub mod rnnoise;
mod wav;

pub use buffer::{AttenuationLimit, AudioBuffer};
pub use enhancer::{Enhancer, Prepared};
pub use error::{Error, Result};
pub use model::{EnhancementModel, ModelLoader};
pub use resample::resample;
pub use rnnoise::RnnoiseLoader;
pub use wav::{persist, read_wav};
