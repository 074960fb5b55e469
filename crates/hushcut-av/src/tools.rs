//! External tool detection and management.

use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Information about an external tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Locations of the external tools the pipeline shells out to.
///
/// A configured path wins when it exists on disk; otherwise the tool is looked
/// up on `PATH` at the time it is needed.
///
/// # Example
///
/// ```no_run
/// use hushcut_av::Tools;
///
/// let tools = Tools::default();
/// let ffmpeg = tools.ffmpeg()?;
/// println!("using {}", ffmpeg.display());
/// # Ok::<(), hushcut_av::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tools {
    ffmpeg_path: Option<PathBuf>,
    ffprobe_path: Option<PathBuf>,
}

impl Tools {
    /// Create a tool set with optional explicit executable paths.
    pub fn new(ffmpeg_path: Option<PathBuf>, ffprobe_path: Option<PathBuf>) -> Self {
        Self {
            ffmpeg_path,
            ffprobe_path,
        }
    }

    /// Resolve the ffmpeg executable.
    pub fn ffmpeg(&self) -> Result<PathBuf> {
        get_tool_path("ffmpeg", self.ffmpeg_path.as_deref())
    }

    /// Resolve the ffprobe executable.
    pub fn ffprobe(&self) -> Result<PathBuf> {
        get_tool_path("ffprobe", self.ffprobe_path.as_deref())
    }
}

/// Check if a tool is available and get its information.
///
/// ffmpeg-family tools take `-version`, everything else `--version`.
pub fn check_tool(name: &str, config_path: Option<&Path>) -> ToolInfo {
    let version_arg = match name {
        "ffmpeg" | "ffprobe" => "-version",
        _ => "--version",
    };

    let Ok(path) = get_tool_path(name, config_path) else {
        return ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        };
    };

    match Command::new(&path).arg(version_arg).output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.to_string());

            ToolInfo {
                name: name.to_string(),
                available: true,
                version,
                path: Some(path),
            }
        }
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: Some(path),
        },
    }
}

/// Check every tool the denoise pipeline needs.
pub fn check_tools(tools: &Tools) -> Vec<ToolInfo> {
    vec![
        check_tool("ffmpeg", tools.ffmpeg_path.as_deref()),
        check_tool("ffprobe", tools.ffprobe_path.as_deref()),
    ]
}

/// Require that a tool is available, returning its path.
///
/// # Errors
///
/// Returns an error if the tool is not found.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Get the path to a tool, preferring a configured path over PATH lookup.
pub fn get_tool_path(name: &str, config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(
            "Configured {} path {:?} does not exist, falling back to PATH",
            name,
            path
        );
    }

    require_tool(name)
}
