//! FFprobe-based media probing.

use super::types::*;
use crate::{Error, Result, ToolCommand};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    format_name: String,
    duration: Option<String>,
    size: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    channels: Option<u32>,
    sample_rate: Option<String>,
    duration: Option<String>,
    #[serde(default)]
    tags: FfprobeTags,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    language: Option<String>,
}

/// Probe a media file using the given ffprobe executable.
pub fn probe_with_ffprobe(ffprobe: &Path, path: &Path) -> Result<MediaInfo> {
    let output = ToolCommand::new(ffprobe.to_path_buf())
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .execute()?;

    parse_ffprobe_json(path, &output.stdout)
}

/// Parse ffprobe's `-print_format json` output.
pub(crate) fn parse_ffprobe_json(path: &Path, json: &str) -> Result<MediaInfo> {
    let ff_output: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| Error::parse_error("ffprobe", e.to_string()))?;
    Ok(parse_ffprobe_output(path, ff_output))
}

fn parse_ffprobe_output(path: &Path, output: FfprobeOutput) -> MediaInfo {
    let mut info = MediaInfo {
        file_path: path.to_path_buf(),
        file_size: output.format.size.and_then(|s| s.parse().ok()).unwrap_or(0),
        container: output.format.format_name,
        duration: parse_duration(output.format.duration.as_deref()),
        video_tracks: Vec::new(),
        audio_tracks: Vec::new(),
        other_streams: 0,
    };

    let mut video_index = 0u32;
    let mut audio_index = 0u32;

    for stream in output.streams {
        match stream.codec_type.as_str() {
            "video" => {
                info.video_tracks.push(VideoTrack {
                    index: video_index,
                    codec: stream.codec_name.unwrap_or_default(),
                    width: stream.width.unwrap_or(0),
                    height: stream.height.unwrap_or(0),
                    frame_rate: stream.r_frame_rate.and_then(|s| parse_frame_rate(&s)),
                    duration: parse_duration(stream.duration.as_deref()),
                });
                video_index += 1;
            }
            "audio" => {
                info.audio_tracks.push(AudioTrack {
                    index: audio_index,
                    codec: stream.codec_name.unwrap_or_default(),
                    channels: stream.channels.unwrap_or(2),
                    sample_rate: stream.sample_rate.and_then(|s| s.parse().ok()),
                    duration: parse_duration(stream.duration.as_deref()),
                    language: stream.tags.language,
                });
                audio_index += 1;
            }
            _ => info.other_streams += 1,
        }
    }

    info
}

fn parse_duration(value: Option<&str>) -> Option<Duration> {
    value
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(Duration::from_secs_f64)
}

fn parse_frame_rate(rate_str: &str) -> Option<f64> {
    let parts: Vec<&str> = rate_str.split('/').collect();
    if parts.len() == 2 {
        let num: f64 = parts[0].parse().ok()?;
        let den: f64 = parts[1].parse().ok()?;
        if den != 0.0 {
            return Some(num / den);
        }
    }
    rate_str.parse().ok()
}
