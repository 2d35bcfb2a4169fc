//! Core functionality for gh-automerge.
//!
//! This module contains the main components:
//! - [`process`]: External process invocation
//! - [`git`]: Local repository queries behind [`git::VersionControl`]
//! - [`github`]: GitHub queries through `gh` behind [`github::Hosting`]
//! - [`context`]: Environment probing and watch-context resolution
//! - [`checks`]: Status-check aggregation
//! - [`poll`]: The poll loop
//! - [`error`]: Error types and result handling

pub mod checks;
pub mod context;
pub mod error;
pub mod git;
pub mod github;
pub mod poll;
pub mod process;

#[cfg(test)]
pub(crate) mod testing;
