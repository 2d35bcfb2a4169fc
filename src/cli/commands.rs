//! CLI command implementations.

use crate::config::Config;
use crate::core::context::{resolve_context, verify_environment};
use crate::core::error::Result;
use crate::core::git::{Git, VersionControl};
use crate::core::github::{GhCli, Hosting};
use crate::core::poll::{Poller, Reporter};
use crate::core::process::ProcessRunner;
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

/// Usage summary printed by `--help`.
const USAGE: &str = "\
Usage: automerge
Polls GitHub API for status checks on current branch.
Exits 0 if all checks pass, exits 1 if any fail.
";

/// Print usage.
pub fn help() -> Result<ExitCode> {
    print!("{USAGE}");
    Ok(ExitCode::SUCCESS)
}

/// Print the version.
pub fn version() -> Result<ExitCode> {
    println!("automerge version {}", env!("CARGO_PKG_VERSION"));
    Ok(ExitCode::SUCCESS)
}

/// Watch the current branch's status checks.
pub async fn watch() -> Result<ExitCode> {
    let config = Config::load_or_default()?;
    let runner = ProcessRunner::new();
    let git = Git::new(&config.git, runner.clone());
    let gh = GhCli::new(&config.gh, runner);

    watch_with(
        &git,
        &gh,
        &config.gh,
        config.poll_interval(),
        &mut Reporter::stdio(),
    )
    .await
}

/// Checks preconditions, resolves what to watch, and polls.
async fn watch_with<V, H, O, E>(
    vcs: &V,
    hosting: &H,
    gh_program: &str,
    interval: Duration,
    reporter: &mut Reporter<O, E>,
) -> Result<ExitCode>
where
    V: VersionControl,
    H: Hosting,
    O: Write,
    E: Write,
{
    verify_environment(vcs, hosting, gh_program).await?;
    let context = resolve_context(vcs, hosting).await?;

    reporter.banner(&context)?;
    let state = Poller::new(hosting, &context, interval)
        .run(reporter)
        .await?;

    Ok(state.exit_code())
}
