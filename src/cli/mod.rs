//! Command-line interface for gh-automerge.
//!
//! The `automerge` binary has no subcommands. Arguments select one of
//! three [`Action`]s:
//! - `--help` / `-h`: print usage
//! - `--version` / `-v`: print the version
//! - anything else: watch the current branch's status checks
//!
//! Unrecognised arguments are ignored rather than rejected.

mod commands;

use crate::core::error::Result;
use clap::Parser;
use std::ffi::OsString;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Wait for GitHub status checks on the current branch.
///
/// Help and version are recognised only as the first argument, spelled
/// exactly; everything after it is ignored.
#[derive(Debug, Parser)]
#[command(
    name = "automerge",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// `--help`/`-h` or `--version`/`-v` first; anything else is ignored.
    #[arg(
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// What the invocation asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Print usage.
    Help,
    /// Print the version.
    Version,
    /// Poll status checks until they pass or fail.
    Watch,
}

impl Action {
    /// Derives the action from a full argument list (program name first).
    ///
    /// Arguments that fail to parse fall back to [`Action::Watch`].
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Cli::try_parse_from(args) {
            Ok(cli) => cli.action(),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unparsed arguments");
                Self::Watch
            },
        }
    }
}

impl Cli {
    /// The action this invocation selects, decided by the first argument.
    #[must_use]
    pub fn action(&self) -> Action {
        match self.args.first().map(String::as_str) {
            Some("--version" | "-v") => Action::Version,
            Some("--help" | "-h") => Action::Help,
            _ => Action::Watch,
        }
    }
}

/// Runs the CLI.
pub async fn run() -> Result<ExitCode> {
    setup_logging();

    match Action::from_args(std::env::args_os()) {
        Action::Help => commands::help(),
        Action::Version => commands::version(),
        Action::Watch => commands::watch().await,
    }
}

/// Sets up logging on stderr, filtered by `RUST_LOG` (default `warn`).
fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
