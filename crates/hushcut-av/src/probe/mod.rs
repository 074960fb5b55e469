//! Media file probing.
//!
//! Stream layout is read with the ffprobe CLI; the pipeline only needs to know
//! which streams exist and how long they run.

mod ffprobe;
mod types;

pub use ffprobe::probe_with_ffprobe;
pub use types::*;

use crate::{Error, Result, Tools};
use std::path::Path;

/// Probe a media file and return its stream layout.
pub fn probe(tools: &Tools, path: &Path) -> Result<MediaInfo> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }
    probe_with_ffprobe(&tools.ffprobe()?, path)
}
