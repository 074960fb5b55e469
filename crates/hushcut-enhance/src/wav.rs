//! WAV decoding and persistence.

use crate::{AudioBuffer, Error, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Decode a WAV file into planar f32 samples.
pub fn read_wav(path: &Path) -> Result<AudioBuffer> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channel_count = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<hound::Result<_>>()?,
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<hound::Result<_>>()?
        }
    };

    let frames = interleaved.len() / channel_count;
    let mut channels = vec![Vec::with_capacity(frames); channel_count];
    for frame in interleaved.chunks_exact(channel_count) {
        for (ch, sample) in channels.iter_mut().zip(frame) {
            ch.push(*sample);
        }
    }

    tracing::debug!(
        "Read {:?}: {} ch, {} Hz, {} frames",
        path,
        channel_count,
        spec.sample_rate,
        frames
    );

    Ok(AudioBuffer::new(channels, spec.sample_rate))
}

/// Write `audio` as 16-bit PCM WAV at its own sample rate.
pub fn persist(audio: &AudioBuffer, path: &Path) -> Result<()> {
    if audio.is_empty() {
        return Err(Error::EmptyAudio);
    }

    let spec = WavSpec {
        channels: audio.channel_count() as u16,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for i in 0..audio.frames() {
        for ch in &audio.channels {
            let sample = (ch[i].clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer.write_sample(sample)?;
        }
    }
    writer.finalize()?;

    tracing::debug!("Wrote {} frames to {:?}", audio.frames(), path);
    Ok(())
}
