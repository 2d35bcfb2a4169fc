//! Status-check aggregation.
//!
//! GitHub reports CI results through two independent systems: legacy
//! commit statuses and check runs. This module reads both for a branch's
//! tip commit and folds them into a single [`Verdict`].
//!
//! The two flags of a verdict come from different signals. For legacy
//! statuses, `all_passed` mirrors the aggregate `state` field (unless an
//! entry failed) while `any_failed` comes from scanning individual entries,
//! so both can be false while checks are pending. They are never both true.

use crate::core::github::{BranchInfo, CheckRuns, CombinedStatus, Hosting, RepoIdentity};
use serde::de::DeserializeOwned;

/// Legacy status states that count as failures.
pub const FAILING_STATUS_STATES: &[&str] = &["failure", "error"];

/// Check-run conclusions that count as failures.
pub const FAILING_CONCLUSIONS: &[&str] = &["failure", "cancelled", "timed_out"];

/// Status of a check run that has finished.
const COMPLETED: &str = "completed";

/// Check-run statuses GitHub documents, other than `completed`.
const IN_FLIGHT_STATUSES: &[&str] = &["queued", "in_progress", "waiting", "requested", "pending"];

/// One failing check, or one failed attempt to ask about checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// `"<name>: <reason>"`.
    pub message: String,
    /// Where to read more, when the API supplied a link.
    pub details_url: Option<String>,
}

impl Failure {
    /// Creates a failure without a details link.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details_url: None,
        }
    }

    fn with_url(message: String, url: Option<&str>) -> Self {
        Self {
            message,
            details_url: url.filter(|u| !u.is_empty()).map(str::to_string),
        }
    }
}

/// Outcome of a single poll.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Verdict {
    /// Every check has finished successfully.
    pub all_passed: bool,
    /// At least one check failed, or the checks could not be read.
    pub any_failed: bool,
    /// Failures in report order.
    pub failures: Vec<Failure>,
}

impl Verdict {
    /// Nothing to wait for and nothing failed.
    #[must_use]
    pub const fn passed() -> Self {
        Self {
            all_passed: true,
            any_failed: false,
            failures: Vec::new(),
        }
    }

    /// A failed query, reported like a failing check.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            all_passed: false,
            any_failed: true,
            failures: vec![Failure::new(message)],
        }
    }

    /// Merges two subsystem verdicts; `self`'s failures come first.
    #[must_use]
    pub fn combine(mut self, other: Self) -> Self {
        self.failures.extend(other.failures);
        Self {
            all_passed: self.all_passed && other.all_passed,
            any_failed: self.any_failed || other.any_failed,
            failures: self.failures,
        }
    }

    /// True while neither terminal condition holds.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.any_failed && !self.all_passed
    }

    /// Failure messages in report order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.message.as_str()).collect()
    }
}

/// Evaluates legacy commit statuses.
#[must_use]
pub fn evaluate_statuses(status: &CombinedStatus) -> Verdict {
    if status.statuses.is_empty() {
        return Verdict::passed();
    }

    let failures: Vec<Failure> = status
        .statuses
        .iter()
        .filter(|s| FAILING_STATUS_STATES.contains(&s.state.as_str()))
        .map(|s| {
            Failure::with_url(
                format!(
                    "{}: {}",
                    s.context,
                    s.description.as_deref().unwrap_or_default()
                ),
                s.target_url.as_deref(),
            )
        })
        .collect();

    Verdict {
        all_passed: status.state == "success" && failures.is_empty(),
        any_failed: !failures.is_empty(),
        failures,
    }
}

/// Evaluates check runs.
#[must_use]
pub fn evaluate_check_runs(runs: &CheckRuns) -> Verdict {
    if runs.check_runs.is_empty() {
        return Verdict::passed();
    }

    let mut all_completed = true;
    let mut failures = Vec::new();

    for run in &runs.check_runs {
        if run.status != COMPLETED {
            if !IN_FLIGHT_STATUSES.contains(&run.status.as_str()) {
                tracing::warn!(name = %run.name, status = %run.status, "Unknown check run status");
            }
            all_completed = false;
            continue;
        }

        let conclusion = run.conclusion.as_deref().unwrap_or_default();
        if FAILING_CONCLUSIONS.contains(&conclusion) {
            failures.push(Failure::with_url(
                format!("{}: {conclusion}", run.name),
                run.html_url.as_deref(),
            ));
        }
    }

    let any_failed = !failures.is_empty();
    Verdict {
        all_passed: all_completed && !any_failed,
        any_failed,
        failures,
    }
}

/// Reads and aggregates the checks for a branch's tip commit.
///
/// Never fails: an unreadable response becomes a failing verdict, so a
/// transient API error ends the watch the same way a failing check does.
pub async fn evaluate<H: Hosting>(hosting: &H, repository: &RepoIdentity, branch: &str) -> Verdict {
    let branch_path = repository.branch_path(branch);
    let info: BranchInfo = match fetch(hosting, &branch_path, "branch info").await {
        Ok(info) => info,
        Err(message) => return Verdict::error(message),
    };
    let sha = info.commit.sha;
    tracing::debug!(%branch, %sha, "Resolved tip commit");

    let statuses = match fetch(hosting, &repository.status_path(&sha), "status checks").await {
        Ok(status) => evaluate_statuses(&status),
        Err(message) => Verdict::error(message),
    };

    let runs = match fetch(hosting, &repository.check_runs_path(&sha), "check runs").await {
        Ok(runs) => evaluate_check_runs(&runs),
        Err(message) => Verdict::error(message),
    };

    let verdict = statuses.combine(runs);
    tracing::debug!(
        all_passed = verdict.all_passed,
        any_failed = verdict.any_failed,
        failures = verdict.failures.len(),
        "Evaluated status checks"
    );
    verdict
}

/// Fetches and decodes one endpoint, describing any failure as a message.
async fn fetch<H, T>(hosting: &H, path: &str, what: &str) -> std::result::Result<T, String>
where
    H: Hosting,
    T: DeserializeOwned,
{
    let body = hosting
        .api(path)
        .await
        .map_err(|e| format!("Failed to get {what}: {e}"))?;

    serde_json::from_str(&body).map_err(|e| format!("Failed to parse {what}: {e}"))
}
