//! Sequence run record
//!
//! The runtime record of one sequencer invocation, accumulated as each
//! group completes and finalized exactly once. This replaces the shell
//! scripts' global pass/fail counters with an explicit value.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Terminal classification of one group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupOutcome {
    /// Applied and readiness predicate satisfied
    AppliedReady,
    /// Applied, predicate not satisfied within its deadline (warning)
    AppliedTimeout,
    /// Applied, no predicate declared
    AppliedNoCheck,
    /// Apply failed (rejection, or transport retries exhausted)
    FailedApply,
    /// Predicate terminally failed (policy-equivalent to FailedApply)
    PredicateFailed,
}

impl GroupOutcome {
    /// True for the outcomes that trigger the group's failure policy.
    pub fn is_failure(&self) -> bool {
        matches!(self, GroupOutcome::FailedApply | GroupOutcome::PredicateFailed)
    }

    /// True for warning-level outcomes that never halt the run.
    pub fn is_warning(&self) -> bool {
        matches!(self, GroupOutcome::AppliedTimeout)
    }
}

/// How the run as a whole ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunStatus {
    Completed,
    Aborted,
    Cancelled,
}

/// Outcome entry for one attempted group
#[derive(Debug, Clone, Serialize)]
pub struct GroupResult {
    pub group: String,
    pub outcome: GroupOutcome,
    /// Wall time from first apply to outcome, if measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<Duration>,
    /// Human-readable failure detail, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// The full record of one invocation. Results hold entries only for
/// groups that were fully attempted, in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct SequenceRun {
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    pub results: Vec<GroupResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RunStatus>,
}

impl SequenceRun {
    pub fn started() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            results: Vec::new(),
            status: None,
        }
    }

    /// Append an outcome. Panics if the run was already finalized,
    /// which would violate the append-then-finalize lifecycle.
    pub fn record(
        &mut self,
        group: impl Into<String>,
        outcome: GroupOutcome,
        elapsed: Option<Duration>,
        detail: Option<String>,
    ) {
        assert!(self.status.is_none(), "record after finalize");
        self.results.push(GroupResult {
            group: group.into(),
            outcome,
            elapsed,
            detail,
        });
    }

    pub fn finalize(&mut self, status: RunStatus) {
        assert!(self.status.is_none(), "finalize twice");
        self.status = Some(status);
        self.finished_at = Some(Utc::now());
    }

    pub fn outcome_of(&self, group: &str) -> Option<GroupOutcome> {
        self.results
            .iter()
            .find(|r| r.group == group)
            .map(|r| r.outcome)
    }

    pub fn count_where(&self, pred: impl Fn(GroupOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(r.outcome)).count()
    }

    /// Full success: completed, nothing failed.
    pub fn is_success(&self) -> bool {
        self.status == Some(RunStatus::Completed)
            && !self.results.iter().any(|r| r.outcome.is_failure())
    }

    /// Exit-code contract: non-zero only when the run aborted or was
    /// cancelled. Warn-and-continue failures and timeouts exit zero.
    pub fn exit_failure(&self) -> bool {
        matches!(self.status, Some(RunStatus::Aborted) | Some(RunStatus::Cancelled))
    }
}
