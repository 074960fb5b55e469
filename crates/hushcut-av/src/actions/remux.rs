//! Remuxing enhanced audio back against the original video.

use crate::{Result, ToolCommand, Tools};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Encoding for the enhanced audio stream in the final container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioEncoding {
    /// ffmpeg encoder name.
    pub codec: String,
    /// Target bitrate, ffmpeg syntax (e.g. "320k").
    pub bitrate: String,
}

impl Default for AudioEncoding {
    fn default() -> Self {
        Self {
            codec: "aac".to_string(),
            bitrate: "320k".to_string(),
        }
    }
}

/// Build the ffmpeg invocation for [`remux_back`].
///
/// Video comes from input #0 stream-copied, audio from input #1 encoded with
/// `encoding`; `-shortest` trims to the shorter of the two.
pub fn remux_back_command(
    ffmpeg: PathBuf,
    video: &Path,
    audio: &Path,
    output: &Path,
    encoding: &AudioEncoding,
) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg);
    cmd.args(["-y", "-ignore_editlist", "1"])
        .arg("-i")
        .arg(video)
        .arg("-i")
        .arg(audio)
        .args(["-map", "0:v:0", "-map", "1:a:0"])
        .args(["-c:v", "copy"])
        .arg("-c:a")
        .arg(&encoding.codec)
        .arg("-b:a")
        .arg(&encoding.bitrate)
        .arg("-shortest")
        .arg(output);
    cmd
}

/// Write the final container to `output`.
///
/// If ffmpeg fails and `output` did not exist beforehand, whatever it left
/// behind is removed so a half-written file is never mistaken for a result.
pub fn remux_back(
    tools: &Tools,
    video: &Path,
    audio: &Path,
    output: &Path,
    encoding: &AudioEncoding,
) -> Result<()> {
    let cmd = remux_back_command(tools.ffmpeg()?, video, audio, output, encoding);
    let preexisting = output.exists();

    #[cfg(feature = "tracing")]
    tracing::info!(
        "Remuxing enhanced audio ({} @ {}) into {:?}",
        encoding.codec,
        encoding.bitrate,
        output
    );

    if let Err(e) = cmd.execute() {
        if !preexisting && output.exists() {
            if let Err(_remove_err) = std::fs::remove_file(output) {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    "Failed to remove partial output {:?}: {}",
                    output,
                    _remove_err
                );
            }
        }
        return Err(e);
    }

    Ok(())
}
