//! Lint engine invocation
//!
//! Linting itself is an external collaborator: a separate engine with its own
//! rule set and rc-file configuration. [`LintEngine`] is the seam the filter
//! calls through, and [`CommandEngine`] is the shipped adapter that spawns a
//! configured lint command per file and normalizes its JSON report into
//! [`LintMessage`] values.

use crate::message::LintMessage;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to spawn lint engine '{cmd}': {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },
    #[error("lint engine exited with status {code:?} and no usable report: {stderr}")]
    EngineFailed { code: Option<i32>, stderr: String },
    #[error("malformed lint report: {0}")]
    MalformedReport(#[from] serde_json::Error),
    #[error("lint engine timed out after {0:?}")]
    Timeout(Duration),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The external lint engine, seen from the filter.
///
/// `config_dir` is the resolved input directory: the engine runs with it as
/// working directory so rc-file discovery sees the same tree the files came
/// from. `relative_path` is the file's pipeline-relative path and `content`
/// its current text (engines configured for stdin lint the text directly;
/// path-based engines read the file themselves).
pub trait LintEngine: Send + Sync {
    fn lint(
        &self,
        config_dir: &Path,
        relative_path: &Path,
        content: &str,
    ) -> Result<Vec<LintMessage>, EngineError>;
}

/// Configuration for [`CommandEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommandEngineConfig {
    /// Lint command to spawn.
    pub cmd: String,
    /// Arguments. A `{}` placeholder is replaced by the relative path;
    /// without one the path is appended.
    pub args: Vec<String>,
    /// Pipe the file content through stdin instead of letting the engine
    /// read the file by path.
    pub stdin: bool,
    /// Wall-clock limit per invocation.
    pub timeout_secs: u64,
}

impl Default for CommandEngineConfig {
    fn default() -> Self {
        Self {
            cmd: "remark".to_string(),
            args: vec!["--quiet".to_string(), "--report".to_string(), "json".to_string()],
            stdin: false,
            timeout_secs: 30,
        }
    }
}

impl CommandEngineConfig {
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Engine adapter that delegates to an external lint process.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    config: CommandEngineConfig,
}

impl CommandEngine {
    pub fn new(config: CommandEngineConfig) -> Self {
        Self { config }
    }

    fn engine_args(&self, relative_path: &str) -> Vec<String> {
        if self.config.args.iter().any(|arg| arg.contains("{}")) {
            self.config.args.iter().map(|arg| arg.replace("{}", relative_path)).collect()
        } else {
            let mut args = self.config.args.clone();
            args.push(relative_path.to_string());
            args
        }
    }
}

impl LintEngine for CommandEngine {
    fn lint(
        &self,
        config_dir: &Path,
        relative_path: &Path,
        content: &str,
    ) -> Result<Vec<LintMessage>, EngineError> {
        let relative = relative_path.to_string_lossy();
        let args = self.engine_args(&relative);

        log::debug!("invoking lint engine: {} {}", self.config.cmd, args.join(" "));

        let mut command = Command::new(&self.config.cmd);
        command
            .args(&args)
            .current_dir(config_dir)
            .stdin(if self.config.stdin { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|e| {
            log::error!("failed to spawn lint engine '{}': {}", self.config.cmd, e);
            EngineError::Spawn {
                cmd: self.config.cmd.clone(),
                source: e,
            }
        })?;

        if self.config.stdin
            && let Some(mut child_stdin) = child.stdin.take()
        {
            child_stdin.write_all(content.as_bytes())?;
            // dropping the handle closes the pipe and signals EOF
        }

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(child.wait_with_output());
        });

        let timeout = self.config.timeout();
        match rx.recv_timeout(timeout) {
            Ok(Ok(output)) => collect_report(&output),
            Ok(Err(e)) => {
                log::error!("lint engine I/O error: {e}");
                Err(EngineError::Io(e))
            }
            Err(_) => {
                log::warn!("lint engine timed out after {timeout:?}");
                Err(EngineError::Timeout(timeout))
            }
        }
    }
}

/// Normalize a finished engine invocation into a message list.
///
/// A non-zero exit status is not an error by itself: lint engines exit
/// non-zero when they find problems, and the report decides the outcome.
/// Only an exit with no usable report fails the invocation.
fn collect_report(output: &Output) -> Result<Vec<LintMessage>, EngineError> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    // remark-style engines write the report to stderr
    let report = if stdout.trim().is_empty() { stderr.as_ref() } else { stdout.as_ref() };

    if report.trim().is_empty() {
        return if output.status.success() {
            Ok(Vec::new())
        } else {
            Err(EngineError::EngineFailed {
                code: output.status.code(),
                stderr: stderr.into_owned(),
            })
        };
    }

    match parse_report(report) {
        Ok(messages) => {
            log::debug!("lint engine reported {} message(s)", messages.len());
            Ok(messages)
        }
        Err(parse_err) if output.status.success() => Err(EngineError::MalformedReport(parse_err)),
        Err(_) => {
            log::warn!("lint engine exited with {:?}: {}", output.status.code(), stderr.trim());
            Err(EngineError::EngineFailed {
                code: output.status.code(),
                stderr: stderr.into_owned(),
            })
        }
    }
}

/// Parse a JSON lint report in either of the two common shapes: a flat
/// message array, or an array of per-file entries wrapping a `messages` list.
fn parse_report(report: &str) -> Result<Vec<LintMessage>, serde_json::Error> {
    if let Ok(messages) = serde_json::from_str::<Vec<LintMessage>>(report) {
        return Ok(messages);
    }

    #[derive(Deserialize)]
    struct FileEntry {
        #[serde(default)]
        messages: Vec<LintMessage>,
    }

    let files: Vec<FileEntry> = serde_json::from_str(report)?;
    Ok(files.into_iter().flat_map(|entry| entry.messages).collect())
}
