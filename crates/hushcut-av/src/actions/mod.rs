//! ffmpeg-backed pipeline actions.
//!
//! - Container sanitizing (drop side-data tracks, rebuild the index)
//! - Audio extraction to PCM WAV
//! - Remuxing enhanced audio back against the original video
//!
//! Every action has a matching `*_command` builder so callers can log or
//! print the exact invocation without running it.

mod extract;
mod remux;
mod sanitize;

pub use extract::{extract_audio, extract_command, Extraction, EXTRACTED_AUDIO_FILE};
pub use remux::{remux_back, remux_back_command, AudioEncoding};
pub use sanitize::{sanitize, sanitize_command, sanitized_file_name};
