//! Audio extraction.

use crate::{probe, Error, Result, ToolCommand, Tools};
use std::path::{Path, PathBuf};

/// Workspace file name for the extracted working audio.
pub const EXTRACTED_AUDIO_FILE: &str = "original_audio.wav";

/// What extraction found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The first audio stream was written as PCM WAV at this path.
    Audio(PathBuf),
    /// The container has no audio stream; there is nothing to denoise.
    NoAudioTrack,
}

/// Build the ffmpeg invocation that decodes the first audio stream to
/// 16-bit PCM WAV at its native sample rate and channel layout.
pub fn extract_command(ffmpeg: PathBuf, input: &Path, output: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg);
    cmd.args(["-y", "-i"])
        .arg(input)
        .args(["-vn", "-map", "0:a:0"])
        .args(["-c:a", "pcm_s16le"])
        .arg(output);
    cmd
}

/// Pull the audio stream out of `input` into an uncompressed working file.
///
/// Both the probe and the decode run as child processes that are waited on
/// before this returns, on the error path as well.
pub fn extract_audio(tools: &Tools, input: &Path, output: &Path) -> Result<Extraction> {
    let info = probe::probe(tools, input)?;

    if !info.has_audio() {
        #[cfg(feature = "tracing")]
        tracing::info!("No audio stream in {:?}", input);
        return Ok(Extraction::NoAudioTrack);
    }

    #[cfg(feature = "tracing")]
    if let Some(audio) = info.primary_audio() {
        tracing::info!(
            "Extracting {} audio ({} ch, {:?} Hz) from {:?}",
            audio.codec,
            audio.channels,
            audio.sample_rate,
            input
        );
    }

    extract_command(tools.ffmpeg()?, input, output).execute()?;

    if !output.exists() {
        return Err(Error::tool_failed(
            "ffmpeg",
            "audio extraction did not produce an output file",
        ));
    }

    Ok(Extraction::Audio(output.to_path_buf()))
}
