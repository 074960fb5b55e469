//! Container sanitizing.
//!
//! Camera files often carry timecode and vendor metadata tracks (Sony `rtmd`,
//! for instance) and edit lists that confuse downstream demuxers. Sanitizing
//! keeps the video streams plus any audio streams and drops everything else.
//! Kept streams are copied bit-for-bit, with the index rebuilt at the front of
//! the file.

use crate::{Result, ToolCommand, Tools};
use std::path::{Path, PathBuf};

/// Name of the sanitized copy of `source` inside a workspace.
pub fn sanitized_file_name(source: &Path) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "input.mp4".to_string());
    format!("sanitized_{}", name)
}

/// Build the ffmpeg invocation for [`sanitize`].
pub fn sanitize_command(ffmpeg: PathBuf, source: &Path, output: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg);
    cmd.args(["-y", "-ignore_editlist", "1", "-i"])
        .arg(source)
        .args(["-map", "0:v", "-map", "0:a?"])
        .args(["-c", "copy"])
        .args(["-movflags", "+faststart"])
        .arg(output);
    cmd
}

/// Rebuild `source` as a clean, streaming-ready container at `output`.
///
/// Nothing is re-encoded.
pub fn sanitize(tools: &Tools, source: &Path, output: &Path) -> Result<()> {
    #[cfg(feature = "tracing")]
    tracing::info!("Sanitizing container {:?}", source);

    sanitize_command(tools.ffmpeg()?, source, output).execute()?;

    #[cfg(feature = "tracing")]
    tracing::debug!("Sanitized container written to {:?}", output);

    Ok(())
}
