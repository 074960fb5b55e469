//! Media information types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Information about a media file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Path to the media file.
    pub file_path: PathBuf,
    /// File size in bytes.
    pub file_size: u64,
    /// Container format as reported by the demuxer (e.g., "mov,mp4,m4a,3gp,3g2,mj2").
    pub container: String,
    /// Duration of the media.
    pub duration: Option<Duration>,
    /// Video tracks in the file.
    pub video_tracks: Vec<VideoTrack>,
    /// Audio tracks in the file.
    pub audio_tracks: Vec<AudioTrack>,
    /// Number of streams that are neither audio nor video (timecode, data, subtitles).
    pub other_streams: u32,
}

/// Information about a video track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoTrack {
    /// Track index among video tracks.
    pub index: u32,
    /// Video codec (e.g., "h264", "hevc").
    pub codec: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Frame rate in FPS.
    pub frame_rate: Option<f64>,
    /// Stream duration, when the container records one.
    pub duration: Option<Duration>,
}

/// Information about an audio track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioTrack {
    /// Track index among audio tracks.
    pub index: u32,
    /// Audio codec (e.g., "aac", "pcm_s16le").
    pub codec: String,
    /// Number of channels.
    pub channels: u32,
    /// Sample rate in Hz.
    pub sample_rate: Option<u32>,
    /// Stream duration, when the container records one.
    pub duration: Option<Duration>,
    /// Language code (e.g., "eng", "spa").
    pub language: Option<String>,
}

impl MediaInfo {
    /// Get the primary (first) video track.
    pub fn primary_video(&self) -> Option<&VideoTrack> {
        self.video_tracks.first()
    }

    /// Get the primary (first) audio track.
    pub fn primary_audio(&self) -> Option<&AudioTrack> {
        self.audio_tracks.first()
    }

    /// Whether the file carries at least one audio stream.
    pub fn has_audio(&self) -> bool {
        !self.audio_tracks.is_empty()
    }
}
