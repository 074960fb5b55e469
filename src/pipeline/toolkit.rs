//! The media-tool seam between the orchestrator and ffmpeg.

use hushcut_av::actions::{
    self, extract_command, remux_back_command, sanitize_command, sanitized_file_name,
    AudioEncoding, Extraction, EXTRACTED_AUDIO_FILE,
};
use hushcut_av::{ToolCommand, Tools, Workspace};
use std::path::{Path, PathBuf};

/// Workspace file name for the enhanced audio.
pub const ENHANCED_AUDIO_FILE: &str = "enhanced_audio.wav";

/// External container/demux operations used by the pipeline.
///
/// Everything but [`remux_back`](Self::remux_back) writes only inside the
/// job's workspace, recording each file it creates there.
pub trait MediaToolkit: Send + Sync {
    /// Rebuild `source` as a clean container inside the workspace.
    fn sanitize(&self, source: &Path, workspace: &mut Workspace) -> hushcut_av::Result<PathBuf>;

    /// Pull the first audio stream of `sanitized` into a PCM file inside the
    /// workspace.
    fn extract_audio(
        &self,
        sanitized: &Path,
        workspace: &mut Workspace,
    ) -> hushcut_av::Result<Extraction>;

    /// Write the final container: video from `video`, audio from `audio`.
    fn remux_back(&self, video: &Path, audio: &Path, output: &Path) -> hushcut_av::Result<()>;
}

/// [`MediaToolkit`] backed by ffmpeg and ffprobe.
#[derive(Debug, Clone, Default)]
pub struct FfmpegToolkit {
    tools: Tools,
    encoding: AudioEncoding,
}

impl FfmpegToolkit {
    pub fn new(tools: Tools, encoding: AudioEncoding) -> Self {
        Self { tools, encoding }
    }

    /// The ffmpeg invocations a job would run, with workspace files shown
    /// under `workspace_dir`.
    pub fn plan(
        &self,
        source: &Path,
        output: &Path,
        workspace_dir: &Path,
    ) -> hushcut_av::Result<Vec<ToolCommand>> {
        let ffmpeg = self.tools.ffmpeg()?;
        let sanitized = workspace_dir.join(sanitized_file_name(source));
        let raw = workspace_dir.join(EXTRACTED_AUDIO_FILE);
        let enhanced = workspace_dir.join(ENHANCED_AUDIO_FILE);

        Ok(vec![
            sanitize_command(ffmpeg.clone(), source, &sanitized),
            extract_command(ffmpeg.clone(), &sanitized, &raw),
            remux_back_command(ffmpeg, &sanitized, &enhanced, output, &self.encoding),
        ])
    }
}

impl MediaToolkit for FfmpegToolkit {
    fn sanitize(&self, source: &Path, workspace: &mut Workspace) -> hushcut_av::Result<PathBuf> {
        let output = workspace.file(&sanitized_file_name(source));
        actions::sanitize(&self.tools, source, &output)?;
        Ok(output)
    }

    fn extract_audio(
        &self,
        sanitized: &Path,
        workspace: &mut Workspace,
    ) -> hushcut_av::Result<Extraction> {
        let output = workspace.file(EXTRACTED_AUDIO_FILE);
        actions::extract_audio(&self.tools, sanitized, &output)
    }

    fn remux_back(&self, video: &Path, audio: &Path, output: &Path) -> hushcut_av::Result<()> {
        actions::remux_back(&self.tools, video, audio, output, &self.encoding)
    }
}
