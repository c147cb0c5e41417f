//! External tool invocation.
//!
//! Every transformation is delegated to a mature external tool (LibreOffice,
//! Ghostscript, qpdf, Poppler, ImageMagick, wkhtmltopdf). This module owns the
//! one way those tools are spawned: capture stdout and stderr, treat a
//! non-zero exit as a failure carrying the trimmed tool output.

use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Longest slice of tool output carried into a user-facing message.
const LOG_LIMIT: usize = 500;

/// Errors from spawning or running an external tool.
#[derive(Debug)]
pub enum ToolError {
    /// The tool binary could not be found on PATH.
    NotFound(&'static str),
    /// Spawning or waiting failed at the OS level.
    Io { tool: &'static str, message: String },
    /// The tool ran and exited non-zero.
    Failed { tool: &'static str, logs: String },
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::NotFound(tool) => {
                write!(f, "{} is required but was not found on PATH", tool)
            }
            ToolError::Io { tool, message } => write!(f, "failed to run {}: {}", tool, message),
            ToolError::Failed { tool, logs } => write!(f, "{} failed: {}", tool, logs),
        }
    }
}

impl std::error::Error for ToolError {}

/// Captured output of a completed tool run.
#[derive(Debug)]
pub struct ToolRun {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolRun {
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).trim().to_string()
    }

    /// Stdout and stderr combined, trimmed to the log limit.
    pub fn combined_logs(&self) -> String {
        let mut bytes = self.stdout.clone();
        bytes.push(b'\n');
        bytes.extend_from_slice(&self.stderr);
        trim_logs(&bytes)
    }
}

/// Builder for one external tool invocation.
pub struct Tool {
    name: &'static str,
    command: Command,
}

impl Tool {
    pub fn new(name: &'static str) -> Self {
        let mut command = Command::new(name);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        Self { name, command }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.command.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.command.args(args);
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.command.current_dir(dir);
        self
    }

    /// Run to completion, capturing output.
    pub async fn run(mut self) -> Result<ToolRun, ToolError> {
        log::debug!("spawning {}", self.name);
        let output = self.command.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ToolError::NotFound(self.name)
            } else {
                ToolError::Io {
                    tool: self.name,
                    message: e.to_string(),
                }
            }
        })?;

        if !output.status.success() {
            // Some tools report on stdout, some on stderr; surface whichever
            // has content.
            let logs = if output.stderr.iter().any(|b| !b.is_ascii_whitespace()) {
                trim_logs(&output.stderr)
            } else {
                trim_logs(&output.stdout)
            };
            return Err(ToolError::Failed {
                tool: self.name,
                logs,
            });
        }

        Ok(ToolRun {
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Return `true` when `tool` can be invoked from PATH.
pub fn is_on_path(tool: &str) -> bool {
    std::process::Command::new(tool)
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok()
}

fn trim_logs(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    if text.chars().count() <= LOG_LIMIT {
        text.to_string()
    } else {
        text.chars().take(LOG_LIMIT).collect()
    }
}
