//! # gh-automerge
//!
//! Wait for GitHub status checks on the current branch.
//!
//! `automerge` asks `git` which branch is checked out, asks `gh` which
//! repository it belongs to, then polls both of GitHub's check systems
//! (legacy commit statuses and check runs) for the branch's tip commit
//! until every check has passed or one has failed. The exit code carries
//! the verdict, so it slots into scripts such as `automerge && gh pr merge`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gh_automerge::core::context::resolve_context;
//! use gh_automerge::{evaluate, GhCli, Git};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> gh_automerge::Result<()> {
//!     let git = Git::default();
//!     let gh = GhCli::default();
//!
//!     let context = resolve_context(&git, &gh).await?;
//!     let verdict = evaluate(&gh, &context.repository, &context.branch).await;
//!
//!     for message in verdict.messages() {
//!         eprintln!("{message}");
//!     }
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/gh-automerge/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cli;
pub mod config;
pub mod core;

// Re-export main types for convenience
pub use config::Config;
pub use crate::core::checks::{evaluate, Failure, Verdict};
pub use crate::core::error::{Error, Result};
pub use crate::core::git::{Git, VersionControl};
pub use crate::core::github::{GhCli, Hosting, RepoIdentity};
pub use crate::core::poll::{PollState, Poller, Reporter};
