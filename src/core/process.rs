//! External process invocation.
//!
//! Every interaction with `git` and `gh` goes through [`ProcessRunner`],
//! which spawns the program, waits for it, and captures its output. No
//! timeout is imposed: a hanging tool hangs the caller.

use crate::core::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// Output from a command execution.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code of the command (`-1` when killed by a signal).
    pub exit_code: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
    /// Duration the command took to run.
    pub duration: Duration,
}

impl CommandOutput {
    /// Returns true if the command succeeded (exit code 0).
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Describes why the command failed: trimmed stderr, or the exit status.
    #[must_use]
    pub fn failure_message(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            format!("exit status {}", self.exit_code)
        } else {
            stderr.to_string()
        }
    }
}

/// Runs external programs and captures their output.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    cwd: Option<PathBuf>,
}

impl ProcessRunner {
    /// Creates a runner that uses the current working directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { cwd: None }
    }

    /// Creates a runner that spawns every program in `path`.
    #[must_use]
    pub fn in_dir(path: impl AsRef<Path>) -> Self {
        Self {
            cwd: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Runs `program` with `args`, returning its output whatever the exit code.
    pub async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let start = Instant::now();
        let shown = command_line(program, args);
        tracing::debug!(command = %shown, "Spawning command");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::CommandNotFound {
                    command: program.to_string(),
                }
            } else {
                Error::io(format!("spawn {shown}"), e)
            }
        })?;

        let result = CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration: start.elapsed(),
        };

        tracing::debug!(
            command = %shown,
            exit_code = result.exit_code,
            duration_ms = u64::try_from(result.duration.as_millis()).unwrap_or(u64::MAX),
            "Command finished"
        );

        Ok(result)
    }

    /// Runs `program` and fails with [`Error::CommandFailed`] on a nonzero exit.
    pub async fn run_checked(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = self.run(program, args).await?;

        if !output.success() {
            return Err(Error::command_failed(
                command_line(program, args),
                output.failure_message(),
                Some(output.exit_code),
            ));
        }

        Ok(output)
    }

    /// Checks if a command exists in PATH.
    #[must_use]
    pub fn command_exists(command: &str) -> bool {
        which::which(command).is_ok()
    }
}

/// Renders a program and its arguments for messages and logs.
fn command_line(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}
