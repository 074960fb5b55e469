//! Model abstraction.
//!
//! The pipeline only ever talks to these two traits, so the concrete backend
//! can be swapped (or faked in tests) without touching orchestration.

use crate::{AttenuationLimit, AudioBuffer, Result};

/// A loaded speech enhancement model.
pub trait EnhancementModel {
    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    /// Sample rate the model operates at. Input is resampled to this rate
    /// before [`enhance`](Self::enhance) is called.
    fn sample_rate(&self) -> u32;

    /// Run one inference pass over the whole buffer.
    ///
    /// With a limit, suppression never goes deeper than the limit's gain.
    fn enhance(
        &self,
        audio: &AudioBuffer,
        limit: Option<AttenuationLimit>,
    ) -> Result<AudioBuffer>;
}

/// Produces a fresh model instance for each job.
pub trait ModelLoader: Send + Sync {
    fn load(&self) -> Result<Box<dyn EnhancementModel>>;
}

/// Blend `original` back into `enhanced` so nothing is suppressed by more
/// than `limit`: `out = gain * original + (1 - gain) * enhanced`.
pub fn limit_suppression(
    original: &AudioBuffer,
    enhanced: &mut AudioBuffer,
    limit: AttenuationLimit,
) {
    let gain = limit.linear_gain();
    for (orig, enh) in original.channels.iter().zip(enhanced.channels.iter_mut()) {
        for (o, e) in orig.iter().zip(enh.iter_mut()) {
            *e = gain * o + (1.0 - gain) * *e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_suppression_floor() {
        let original = AudioBuffer::new(vec![vec![1.0, -0.5]], 48_000);
        // A model that removed everything.
        let mut enhanced = AudioBuffer::new(vec![vec![0.0, 0.0]], 48_000);
        limit_suppression(&original, &mut enhanced, AttenuationLimit::new(20).unwrap());
        assert!((enhanced.channels[0][0] - 0.1).abs() < 1e-6);
        assert!((enhanced.channels[0][1] + 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_limit_suppression_keeps_untouched_signal() {
        let original = AudioBuffer::new(vec![vec![0.25; 8]], 48_000);
        let mut enhanced = original.clone();
        limit_suppression(&original, &mut enhanced, AttenuationLimit::new(6).unwrap());
        for s in &enhanced.channels[0] {
            assert!((s - 0.25).abs() < 1e-6);
        }
    }
}
