//! Git repository operations.
//!
//! The rest of the crate talks to git only through the [`VersionControl`]
//! trait, so tests can substitute canned answers for a real repository.

use crate::core::error::{Error, Result};
use crate::core::process::ProcessRunner;

/// Default git executable.
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// What the watcher needs from the local version-control tool.
#[allow(async_fn_in_trait)]
pub trait VersionControl {
    /// Returns true if the working directory is inside a repository.
    ///
    /// Any failure to ask counts as "no".
    async fn is_repository(&self) -> bool;

    /// Returns the abbreviated symbolic name of HEAD, trimmed.
    ///
    /// On a detached HEAD git answers with the literal `HEAD`; callers
    /// decide what that means.
    async fn current_branch(&self) -> Result<String>;
}

/// [`VersionControl`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct Git {
    program: String,
    runner: ProcessRunner,
}

impl Default for Git {
    fn default() -> Self {
        Self::new(DEFAULT_GIT_PROGRAM, ProcessRunner::new())
    }
}

impl Git {
    /// Creates a git client that runs `program` through `runner`.
    #[must_use]
    pub fn new(program: impl Into<String>, runner: ProcessRunner) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }
}

impl VersionControl for Git {
    async fn is_repository(&self) -> bool {
        match self
            .runner
            .run(&self.program, &["rev-parse", "--git-dir"])
            .await
        {
            Ok(output) => output.success(),
            Err(e) => {
                tracing::debug!(error = %e, "git probe failed");
                false
            },
        }
    }

    async fn current_branch(&self) -> Result<String> {
        let output = self
            .runner
            .run(&self.program, &["rev-parse", "--abbrev-ref", "HEAD"])
            .await?;

        if !output.success() {
            return Err(Error::git(
                "rev-parse --abbrev-ref HEAD",
                output.failure_message(),
            ));
        }

        Ok(output.stdout.trim().to_string())
    }
}
