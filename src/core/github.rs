//! GitHub access through the `gh` CLI.
//!
//! Authentication and transport belong to `gh`; this module only builds
//! request paths, runs `gh api`, and describes the response payloads the
//! watcher reads.

use crate::core::error::{Error, Result};
use crate::core::process::ProcessRunner;
use serde::Deserialize;
use std::fmt;

/// Default GitHub CLI executable.
pub const DEFAULT_GH_PROGRAM: &str = "gh";

/// What the watcher needs from the hosting platform.
#[allow(async_fn_in_trait)]
pub trait Hosting {
    /// Returns true if the hosting CLI is installed and answers.
    async fn is_available(&self) -> bool;

    /// Identifies the remote repository of the working directory.
    async fn repository(&self) -> Result<RepoIdentity>;

    /// Performs a GET against a REST path and returns the raw body.
    async fn api(&self, path: &str) -> Result<String>;
}

/// The `(owner, name)` pair of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentity {
    /// Owning user or organisation login.
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepoIdentity {
    /// Creates a repository identity.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Path of the branch-info endpoint.
    #[must_use]
    pub fn branch_path(&self, branch: &str) -> String {
        format!("/repos/{}/{}/branches/{branch}", self.owner, self.name)
    }

    /// Path of the combined-status endpoint for a commit.
    #[must_use]
    pub fn status_path(&self, sha: &str) -> String {
        format!("/repos/{}/{}/commits/{sha}/status", self.owner, self.name)
    }

    /// Path of the check-runs endpoint for a commit.
    #[must_use]
    pub fn check_runs_path(&self, sha: &str) -> String {
        format!("/repos/{}/{}/commits/{sha}/check-runs", self.owner, self.name)
    }
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// =============================================================================
// Response payloads
// =============================================================================

/// `gh repo view --json owner,name`.
#[derive(Debug, Clone, Deserialize)]
struct RepoView {
    owner: RepoOwner,
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RepoOwner {
    login: String,
}

/// `GET /repos/{owner}/{repo}/branches/{branch}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchInfo {
    /// Tip commit of the branch.
    pub commit: BranchCommit,
}

/// Commit reference inside [`BranchInfo`].
#[derive(Debug, Clone, Deserialize)]
pub struct BranchCommit {
    /// Commit SHA.
    pub sha: String,
}

/// `GET /repos/{owner}/{repo}/commits/{sha}/status`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CombinedStatus {
    /// Aggregate state: `success`, `failure`, `error` or `pending`.
    pub state: String,
    /// Individual status contexts.
    pub statuses: Vec<StatusEntry>,
}

/// One legacy commit status.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatusEntry {
    /// `success`, `failure`, `error` or `pending`.
    pub state: String,
    /// Free-form description; may be null.
    pub description: Option<String>,
    /// Label identifying the reporting system.
    pub context: String,
    /// Link to details; may be null.
    pub target_url: Option<String>,
}

/// `GET /repos/{owner}/{repo}/commits/{sha}/check-runs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckRuns {
    /// The check runs for the commit.
    pub check_runs: Vec<CheckRun>,
}

/// One check run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckRun {
    /// Name of the check.
    pub name: String,
    /// `queued`, `in_progress` or `completed`.
    pub status: String,
    /// Set once completed: `success`, `failure`, `cancelled`, `timed_out`, ...
    pub conclusion: Option<String>,
    /// Link to the run.
    pub html_url: Option<String>,
}

// =============================================================================
// gh-backed client
// =============================================================================

/// [`Hosting`] backed by the `gh` executable.
#[derive(Debug, Clone)]
pub struct GhCli {
    program: String,
    runner: ProcessRunner,
}

impl Default for GhCli {
    fn default() -> Self {
        Self::new(DEFAULT_GH_PROGRAM, ProcessRunner::new())
    }
}

impl GhCli {
    /// Creates a client that runs `program` through `runner`.
    #[must_use]
    pub fn new(program: impl Into<String>, runner: ProcessRunner) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }
}

impl Hosting for GhCli {
    async fn is_available(&self) -> bool {
        if !ProcessRunner::command_exists(&self.program) {
            tracing::debug!(program = %self.program, "gh not found in PATH");
            return false;
        }

        match self.runner.run(&self.program, &["--version"]).await {
            Ok(output) => output.success(),
            Err(e) => {
                tracing::debug!(error = %e, "gh probe failed");
                false
            },
        }
    }

    async fn repository(&self) -> Result<RepoIdentity> {
        let output = self
            .runner
            .run_checked(&self.program, &["repo", "view", "--json", "owner,name"])
            .await?;

        let view: RepoView = serde_json::from_str(&output.stdout)
            .map_err(|e| Error::parse("repository info", e))?;

        Ok(RepoIdentity::new(
            view.owner.login.trim(),
            view.name.trim(),
        ))
    }

    async fn api(&self, path: &str) -> Result<String> {
        let output = self
            .runner
            .run_checked(&self.program, &["api", path])
            .await?;
        Ok(output.stdout)
    }
}
