//! Sample rate conversion with `rubato`.

use crate::{AudioBuffer, Error, Result};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

/// Convert `audio` to `target_rate`. Returns the input unchanged when the
/// rates already match.
///
/// The whole buffer is processed as one chunk; the resampler's delay is
/// trimmed from the front and the tail flushed, so the output length is the
/// input length scaled by the rate ratio.
pub fn resample(audio: AudioBuffer, target_rate: u32) -> Result<AudioBuffer> {
    if audio.sample_rate == target_rate || audio.is_empty() {
        return Ok(AudioBuffer::new(audio.channels, target_rate));
    }
    if audio.sample_rate == 0 {
        return Err(Error::Resample("source sample rate is 0".to_string()));
    }

    let frames = audio.frames();
    let ratio = target_rate as f64 / audio.sample_rate as f64;
    let expected = (frames as f64 * ratio).round() as usize;

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler =
        SincFixedIn::<f32>::new(ratio, 2.0, params, frames, audio.channel_count())
            .map_err(|e| Error::Resample(e.to_string()))?;
    let delay = resampler.output_delay();

    let input: Vec<&[f32]> = audio.channels.iter().map(|ch| &ch[..frames]).collect();
    let mut output = resampler
        .process(&input, None)
        .map_err(|e| Error::Resample(e.to_string()))?;
    let tail = resampler
        .process_partial::<&[f32]>(None, None)
        .map_err(|e| Error::Resample(e.to_string()))?;

    for (ch, rest) in output.iter_mut().zip(tail) {
        ch.extend(rest);
        ch.drain(..delay.min(ch.len()));
        ch.resize(expected, 0.0);
    }

    tracing::debug!(
        "Resampled {} frames at {} Hz to {} frames at {} Hz",
        frames,
        audio.sample_rate,
        expected,
        target_rate
    );

    Ok(AudioBuffer::new(output, target_rate))
}
