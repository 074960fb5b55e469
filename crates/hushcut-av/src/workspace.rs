//! Per-job scratch directories.
//!
//! A [`Workspace`] is a private temporary directory that holds every
//! intermediate file of one job. It is torn down exactly once: explicitly via
//! [`Workspace::release`], or on drop if the owner never got that far.

use crate::{Error, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Default delay before removal, giving exited tool processes time to let go
/// of their file handles.
pub const DEFAULT_CLEANUP_GRACE: Duration = Duration::from_millis(500);

const DIR_PREFIX: &str = "hushcut-";

/// Where workspaces are created and how they are torn down.
#[derive(Debug, Clone)]
pub struct WorkspaceOptions {
    /// Parent directory for workspaces; the system temp dir when `None`.
    pub root: Option<PathBuf>,
    /// Delay before removing files on release.
    pub cleanup_grace: Duration,
}

impl Default for WorkspaceOptions {
    fn default() -> Self {
        Self {
            root: None,
            cleanup_grace: DEFAULT_CLEANUP_GRACE,
        }
    }
}

/// A single file that could not be removed during cleanup.
#[derive(Debug)]
pub struct CleanupError {
    pub path: PathBuf,
    pub error: io::Error,
}

/// Everything that happened while tearing a workspace down.
///
/// Cleanup is best-effort: failures are collected here and logged, never
/// raised.
#[derive(Debug, Default)]
pub struct CleanupReport {
    /// The directory that was released.
    pub dir: PathBuf,
    /// Number of recorded files that were removed.
    pub removed: usize,
    /// Removal failures, in the order they happened.
    pub errors: Vec<CleanupError>,
}

impl CleanupReport {
    /// True when every file and the directory itself were removed.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Exclusively-owned scratch directory for one job.
///
/// # Example
///
/// ```no_run
/// use hushcut_av::{Workspace, WorkspaceOptions};
///
/// let mut workspace = Workspace::acquire(&WorkspaceOptions::default())?;
/// let wav = workspace.file("original_audio.wav");
/// // ... let a tool write `wav` ...
/// let report = workspace.release();
/// assert!(report.is_clean());
/// # Ok::<(), hushcut_av::Error>(())
/// ```
#[derive(Debug)]
pub struct Workspace {
    temp_dir: Option<TempDir>,
    path: PathBuf,
    files: Vec<PathBuf>,
    grace: Duration,
}

impl Workspace {
    /// Create a fresh private directory.
    pub fn acquire(options: &WorkspaceOptions) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(DIR_PREFIX);

        let temp_dir = match options.root.as_deref() {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| Error::Workspace(format!("failed to create workspace: {}", e)))?;

        let path = temp_dir.path().to_path_buf();

        #[cfg(feature = "tracing")]
        tracing::debug!("Acquired workspace {:?}", path);

        Ok(Self {
            temp_dir: Some(temp_dir),
            path,
            files: Vec::new(),
            grace: options.cleanup_grace,
        })
    }

    /// The workspace directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reserve a file path inside the workspace and record it for cleanup.
    pub fn file(&mut self, name: &str) -> PathBuf {
        let path = self.path.join(name);
        if !self.files.contains(&path) {
            self.files.push(path.clone());
        }
        path
    }

    /// Files recorded so far.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Tear the workspace down: wait the grace delay, remove every recorded
    /// file, then the directory.
    pub fn release(mut self) -> CleanupReport {
        self.teardown()
    }

    fn teardown(&mut self) -> CleanupReport {
        let mut report = CleanupReport {
            dir: self.path.clone(),
            ..CleanupReport::default()
        };

        let Some(temp_dir) = self.temp_dir.take() else {
            return report;
        };

        if !self.grace.is_zero() {
            std::thread::sleep(self.grace);
        }

        for file in self.files.drain(..) {
            match std::fs::remove_file(&file) {
                Ok(()) => {
                    report.removed += 1;
                    #[cfg(feature = "tracing")]
                    tracing::trace!("Removed temp file {:?}", file);
                }
                // Reserved but never written.
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(error) => report.errors.push(CleanupError { path: file, error }),
            }
        }

        if let Err(error) = temp_dir.close() {
            report.errors.push(CleanupError {
                path: self.path.clone(),
                error,
            });
        }

        #[cfg(feature = "tracing")]
        {
            for failure in &report.errors {
                tracing::warn!("Failed to remove {:?}: {}", failure.path, failure.error);
            }
            tracing::debug!(
                "Released workspace {:?} ({} files removed, {} errors)",
                report.dir,
                report.removed,
                report.errors.len()
            );
        }

        report
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        self.teardown();
    }
}
