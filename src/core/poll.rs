//! The poll loop.
//!
//! Polling is a three-state machine: it starts in [`PollState::Polling`]
//! and moves to [`PollState::Passed`] or [`PollState::Failed`] once a
//! verdict is terminal. There is no iteration limit.

use crate::core::checks::{self, Failure, Verdict};
use crate::core::context::WatchContext;
use crate::core::error::{Error, Result};
use crate::core::github::Hosting;
use console::style;
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

/// Default delay between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Where the watch stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// Checks are still running.
    Polling,
    /// Every check passed.
    Passed,
    /// Something failed; the failures to report.
    Failed(Vec<Failure>),
}

impl PollState {
    /// Maps a verdict to the next state. Failure wins over success.
    #[must_use]
    pub fn from_verdict(verdict: Verdict) -> Self {
        if verdict.any_failed {
            Self::Failed(verdict.failures)
        } else if verdict.all_passed {
            Self::Passed
        } else {
            Self::Polling
        }
    }

    /// True once polling should stop.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Polling)
    }

    /// Process exit code for this state; only `Passed` is a success.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Passed => ExitCode::SUCCESS,
            Self::Polling | Self::Failed(_) => ExitCode::FAILURE,
        }
    }
}

/// Writes watch progress: normal output to `out`, failures to `err`.
#[derive(Debug)]
pub struct Reporter<O, E> {
    out: O,
    err: E,
}

impl Reporter<std::io::Stdout, std::io::Stderr> {
    /// Reporter bound to the process's stdout and stderr.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdout(), std::io::stderr())
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    /// Creates a reporter over arbitrary writers.
    pub const fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Consumes the reporter, returning its writers.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    /// Announces what is being watched.
    pub fn banner(&mut self, context: &WatchContext) -> Result<()> {
        writeln!(
            self.out,
            "Checking status for {} on branch {}...",
            context.repository, context.branch
        )
        .map_err(|e| Error::io("write banner", e))
    }

    /// One progress dot per pending poll.
    pub fn progress(&mut self) -> Result<()> {
        write!(self.out, ".").map_err(|e| Error::io("write progress", e))?;
        self.out.flush().map_err(|e| Error::io("flush progress", e))
    }

    /// Final success line.
    pub fn passed(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "\n✅ {}",
            style("All status checks passed!").green().bold()
        )
        .map_err(|e| Error::io("write result", e))
    }

    /// One line per failure.
    pub fn failed(&mut self, failures: &[Failure]) -> Result<()> {
        let write = |err: &mut E| -> std::io::Result<()> {
            writeln!(
                err,
                "\n{}",
                style("Status checks failed:").for_stderr().red().bold()
            )?;
            for failure in failures {
                match failure.details_url {
                    Some(ref url) => {
                        writeln!(err, "  ❌ {} {}", failure.message, style(url).for_stderr().dim())?;
                    },
                    None => writeln!(err, "  ❌ {}", failure.message)?,
                }
            }
            Ok(())
        };
        write(&mut self.err).map_err(|e| Error::io("write failures", e))
    }
}

/// Drives the check aggregator until a terminal verdict.
#[derive(Debug)]
pub struct Poller<'a, H> {
    hosting: &'a H,
    context: &'a WatchContext,
    interval: Duration,
}

impl<'a, H: Hosting> Poller<'a, H> {
    /// Creates a poller for `context` that waits `interval` between polls.
    pub const fn new(hosting: &'a H, context: &'a WatchContext, interval: Duration) -> Self {
        Self {
            hosting,
            context,
            interval,
        }
    }

    /// Polls until the checks pass or fail, reporting as it goes.
    pub async fn run<O: Write, E: Write>(&self, reporter: &mut Reporter<O, E>) -> Result<PollState> {
        let mut state = PollState::Polling;
        let mut attempt: u64 = 0;

        while !state.is_terminal() {
            attempt += 1;
            state = self.tick(reporter).await?;
            tracing::debug!(attempt, terminal = state.is_terminal(), "Poll finished");
        }

        Ok(state)
    }

    /// Runs one poll: evaluate, report, and wait if still pending.
    pub async fn tick<O: Write, E: Write>(&self, reporter: &mut Reporter<O, E>) -> Result<PollState> {
        let verdict =
            checks::evaluate(self.hosting, &self.context.repository, &self.context.branch).await;
        let state = PollState::from_verdict(verdict);

        match state {
            PollState::Polling => {
                reporter.progress()?;
                tokio::time::sleep(self.interval).await;
            },
            PollState::Passed => reporter.passed()?,
            PollState::Failed(ref failures) => reporter.failed(failures)?,
        }

        Ok(state)
    }
}
