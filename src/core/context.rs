//! Environment probing and watch-context resolution.
//!
//! Before polling starts the watcher needs three things: a git working
//! tree, a usable `gh`, and the (branch, repository) pair to watch. All of
//! them are fatal when missing.

use crate::core::error::{Error, Result};
use crate::core::git::VersionControl;
use crate::core::github::{Hosting, RepoIdentity};

/// What git prints for `--abbrev-ref HEAD` when no branch is checked out.
const DETACHED_HEAD: &str = "HEAD";

/// Branch and repository being watched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchContext {
    /// Checked-out branch.
    pub branch: String,
    /// Remote repository.
    pub repository: RepoIdentity,
}

/// Verifies that git sees a repository and that `gh` can be invoked.
///
/// The git check runs first, so a missing `gh` is only reported inside a
/// repository.
pub async fn verify_environment<V, H>(vcs: &V, hosting: &H, gh_program: &str) -> Result<()>
where
    V: VersionControl,
    H: Hosting,
{
    if !vcs.is_repository().await {
        return Err(Error::NotGitRepo);
    }

    if !hosting.is_available().await {
        return Err(Error::HostingCliUnavailable {
            program: gh_program.to_string(),
        });
    }

    Ok(())
}

/// Resolves the checked-out branch, rejecting a detached HEAD.
pub async fn current_branch<V: VersionControl>(vcs: &V) -> Result<String> {
    let branch = vcs
        .current_branch()
        .await
        .map_err(|e| Error::resolution("current branch", e))?;

    if branch == DETACHED_HEAD {
        return Err(Error::DetachedHead);
    }

    if branch.is_empty() {
        return Err(Error::resolution(
            "current branch",
            Error::git("rev-parse --abbrev-ref HEAD", "empty branch name"),
        ));
    }

    Ok(branch)
}

/// Resolves the branch and repository to watch.
pub async fn resolve_context<V, H>(vcs: &V, hosting: &H) -> Result<WatchContext>
where
    V: VersionControl,
    H: Hosting,
{
    let branch = current_branch(vcs).await?;

    let repository = hosting
        .repository()
        .await
        .map_err(|e| Error::resolution("repository info", e))?;

    tracing::debug!(%branch, %repository, "Resolved watch context");

    Ok(WatchContext { branch, repository })
}
