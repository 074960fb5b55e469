//! # hushcut-av
//!
//! External media tooling for the hushcut denoise pipeline.
//!
//! This crate provides:
//! - Tool discovery for ffmpeg/ffprobe ([`Tools`])
//! - A blocking command builder that captures diagnostics ([`ToolCommand`])
//! - Per-job scratch directories with guaranteed teardown ([`Workspace`])
//! - Stream probing via ffprobe ([`probe`])
//! - The ffmpeg stage actions: sanitize, extract audio, remux back ([`actions`])
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use hushcut_av::{probe, Tools};
//! use std::path::Path;
//!
//! let info = probe(&Tools::default(), Path::new("/path/to/clip.mp4"))?;
//! println!("Container: {}", info.container);
//! println!("Has audio: {}", info.has_audio());
//! # Ok::<(), hushcut_av::Error>(())
//! ```

pub mod actions;
pub mod command;
mod error;
pub mod probe;
pub mod tools;
pub mod workspace;

// Re-exports
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use probe::{probe, AudioTrack, MediaInfo, VideoTrack};
pub use tools::{check_tool, check_tools, get_tool_path, require_tool, ToolInfo, Tools};
pub use workspace::{CleanupError, CleanupReport, Workspace, WorkspaceOptions};
