//! Builder for executing external tool commands.

use crate::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

#[cfg(unix)]
use std::os::unix::process::CommandExt;

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// Execution blocks the calling thread until the child exits. There is no
/// timeout and no kill path: a running invocation always runs to completion.
/// On unix the child gets its own process group, so a terminal Ctrl-C aimed
/// at the caller does not reach it.
///
/// # Example
///
/// ```no_run
/// use hushcut_av::ToolCommand;
/// use std::path::PathBuf;
///
/// let output = ToolCommand::new(PathBuf::from("ffprobe"))
///     .arg("-v").arg("quiet")
///     .arg("-show_streams")
///     .arg("/path/to/video.mp4")
///     .execute()?;
/// println!("{}", output.stdout);
/// # Ok::<(), hushcut_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(s.as_ref().to_os_string());
        self
    }

    /// Append multiple arguments.
    pub fn args<I, S>(&mut self, iter: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(iter.into_iter().map(|s| s.as_ref().to_os_string()));
        self
    }

    /// The program this command runs.
    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    /// The arguments, in order.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Short tool name used in error messages (file name of the program).
    pub fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Render the command line for logs and dry runs.
    pub fn display(&self) -> String {
        let mut line = self.program.to_string_lossy().to_string();
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            line.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                line.push('"');
                line.push_str(&arg);
                line.push('"');
            } else {
                line.push_str(&arg);
            }
        }
        line
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// - [`Error::ToolNotFound`] if the executable does not exist.
    /// - [`Error::ToolFailed`] if the process exits with a non-zero status;
    ///   the message carries stderr, falling back to stdout.
    /// - [`Error::Io`] for any other spawn or wait failure.
    pub fn execute(&self) -> Result<ToolOutput> {
        let tool = self.tool_name();

        #[cfg(feature = "tracing")]
        tracing::debug!("Running: {}", self.display());

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        command.process_group(0);

        let output = command.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found(tool.clone())
            } else {
                Error::Io(e)
            }
        })?;

        let tool_output = ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !output.status.success() {
            return Err(Error::tool_failed(tool, failure_detail(&tool_output)));
        }

        Ok(tool_output)
    }
}

/// Pick the most useful diagnostic from a failed run: stderr, then stdout.
fn failure_detail(output: &ToolOutput) -> String {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = output.stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    format!("exited with {} (unknown error)", output.status)
}
