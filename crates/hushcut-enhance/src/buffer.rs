//! In-memory audio and the attenuation limit.

use crate::{Error, Result};
use std::fmt;
use std::time::Duration;

/// Decoded audio, one `Vec` per channel, samples in `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub channels: Vec<Vec<f32>>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
        }
    }

    /// Samples per channel. Channels are kept the same length; the shortest
    /// wins if they ever diverge.
    pub fn frames(&self) -> usize {
        self.channels.iter().map(Vec::len).min().unwrap_or(0)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }
}

/// Upper bound on how much the model may suppress, in dB.
///
/// Must be between 1 and 60 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttenuationLimit(u32);

impl AttenuationLimit {
    pub const MIN_DB: u32 = 1;
    pub const MAX_DB: u32 = 60;

    pub fn new(db: u32) -> Result<Self> {
        if (Self::MIN_DB..=Self::MAX_DB).contains(&db) {
            Ok(Self(db))
        } else {
            Err(Error::InvalidAttenuation(db))
        }
    }

    pub fn db(self) -> u32 {
        self.0
    }

    /// Linear amplitude of the deepest allowed suppression, `10^(-dB/20)`.
    pub fn linear_gain(self) -> f32 {
        10f32.powf(-(self.0 as f32) / 20.0)
    }
}

impl fmt::Display for AttenuationLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} dB", self.0)
    }
}

impl TryFrom<u32> for AttenuationLimit {
    type Error = Error;

    fn try_from(db: u32) -> Result<Self> {
        Self::new(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_shape() {
        let buf = AudioBuffer::new(vec![vec![0.0; 4800], vec![0.0; 4800]], 48_000);
        assert_eq!(buf.frames(), 4800);
        assert_eq!(buf.channel_count(), 2);
        assert!(!buf.is_empty());
        assert_eq!(buf.duration(), Duration::from_millis(100));
    }

    #[test]
    fn test_empty_buffer() {
        assert!(AudioBuffer::new(vec![], 48_000).is_empty());
        assert!(AudioBuffer::new(vec![vec![]], 48_000).is_empty());
        assert_eq!(AudioBuffer::new(vec![vec![0.0]], 0).duration(), Duration::ZERO);
    }

    #[test]
    fn test_attenuation_bounds() {
        assert!(AttenuationLimit::new(0).is_err());
        assert!(AttenuationLimit::new(1).is_ok());
        assert!(AttenuationLimit::new(60).is_ok());
        assert!(matches!(
            AttenuationLimit::new(61),
            Err(Error::InvalidAttenuation(61))
        ));
    }

    #[test]
    fn test_linear_gain() {
        let gain = AttenuationLimit::new(20).unwrap().linear_gain();
        assert!((gain - 0.1).abs() < 1e-6);
        let gain = AttenuationLimit::new(60).unwrap().linear_gain();
        assert!((gain - 0.001).abs() < 1e-6);
    }
}
