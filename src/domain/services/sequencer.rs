//! Deployment sequencer
//!
//! Drives resource groups strictly in input order through
//! apply -> optional readiness wait -> outcome recording, honoring each
//! group's failure policy. Later groups carry implicit data
//! dependencies on earlier ones, so there is no parallel apply.

use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::entities::{
    GroupOutcome, Manifest, ResourceGroup, RunStatus, SequenceRun,
};
use crate::domain::entities::resource_group::OnFailure;
use crate::domain::ports::{Clock, ClusterApi, ClusterError, SequenceEvent, SequenceEventSink};
use crate::domain::value_objects::{CancelToken, WaitOutcome};

use super::evaluator::ReadinessEvaluator;

/// Bounded retry for transport errors during apply - the only retry
/// policy in the system. Rejected documents are never retried.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based), doubling each time.
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Options shared by one run
#[derive(Debug, Clone)]
pub struct SequencerOptions {
    pub default_namespace: String,
    pub poll_interval: Duration,
    pub retry: RetryPolicy,
}

impl Default for SequencerOptions {
    fn default() -> Self {
        Self {
            default_namespace: "default".to_string(),
            poll_interval: super::evaluator::DEFAULT_POLL_INTERVAL,
            retry: RetryPolicy::default(),
        }
    }
}

pub struct Sequencer<'a> {
    api: &'a dyn ClusterApi,
    clock: &'a dyn Clock,
    events: &'a dyn SequenceEventSink,
    cancel: CancelToken,
    options: SequencerOptions,
}

impl<'a> Sequencer<'a> {
    pub fn new(
        api: &'a dyn ClusterApi,
        clock: &'a dyn Clock,
        events: &'a dyn SequenceEventSink,
        cancel: CancelToken,
        options: SequencerOptions,
    ) -> Self {
        Self {
            api,
            clock,
            events,
            cancel,
            options,
        }
    }

    /// Run every group in order. Always returns a finalized run.
    pub fn run(&self, groups: &[ResourceGroup]) -> SequenceRun {
        let mut run = SequenceRun::started();
        self.events.on_event(&SequenceEvent::Started {
            group_count: groups.len(),
        });

        for group in groups {
            if self.cancel.is_cancelled() {
                return self.finish(run, RunStatus::Cancelled);
            }

            self.events.on_event(&SequenceEvent::GroupStarted {
                group: group.name.clone(),
                resource_count: group.resources.len(),
            });
            let group_start = self.clock.now();

            let (outcome, detail) = match self.apply_group(group) {
                Err(error) => {
                    warn!(group = %group.name, %error, "apply failed");
                    (GroupOutcome::FailedApply, Some(error.to_string()))
                }
                Ok(()) => match &group.readiness {
                    None => (GroupOutcome::AppliedNoCheck, None),
                    Some(predicate) => {
                        self.events.on_event(&SequenceEvent::Waiting {
                            group: group.name.clone(),
                            check: predicate.check.to_string(),
                            timeout: predicate.timeout,
                        });
                        let evaluator = ReadinessEvaluator::new(
                            self.api,
                            self.clock,
                            self.options.poll_interval,
                            self.cancel.clone(),
                        );
                        match evaluator.wait(predicate) {
                            WaitOutcome::Ready => (GroupOutcome::AppliedReady, None),
                            WaitOutcome::Timeout => (
                                GroupOutcome::AppliedTimeout,
                                Some(format!(
                                    "not ready after {}s",
                                    predicate.timeout.as_secs()
                                )),
                            ),
                            WaitOutcome::PredicateFailed { reason } => {
                                (GroupOutcome::PredicateFailed, Some(reason))
                            }
                            WaitOutcome::Cancelled => {
                                // In-flight group: no entry is recorded.
                                return self.finish(run, RunStatus::Cancelled);
                            }
                        }
                    }
                },
            };

            let elapsed = self.clock.now().duration_since(group_start);
            run.record(&group.name, outcome, Some(elapsed), detail.clone());
            self.events.on_event(&SequenceEvent::GroupFinished {
                group: group.name.clone(),
                outcome,
                elapsed,
                detail,
            });

            if outcome.is_failure() && group.on_failure == OnFailure::Abort {
                return self.finish(run, RunStatus::Aborted);
            }
        }

        self.finish(run, RunStatus::Completed)
    }

    fn finish(&self, mut run: SequenceRun, status: RunStatus) -> SequenceRun {
        run.finalize(status);
        self.events.on_event(&SequenceEvent::Finished { status });
        run
    }

    /// Apply the group's manifests as one logical batch: the first
    /// unrecoverable error decides the batch, no per-resource rollback.
    fn apply_group(&self, group: &ResourceGroup) -> Result<(), ClusterError> {
        for manifest in &group.resources {
            self.apply_with_retry(group, manifest)?;
            self.events.on_event(&SequenceEvent::ResourceApplied {
                group: group.name.clone(),
                resource: manifest.id(),
            });
        }
        Ok(())
    }

    fn apply_with_retry(
        &self,
        group: &ResourceGroup,
        manifest: &Manifest,
    ) -> Result<(), ClusterError> {
        let mut attempt = 1;
        loop {
            match self
                .api
                .apply(manifest, &self.options.default_namespace)
            {
                Ok(()) => return Ok(()),
                Err(error) if error.is_transport() && attempt < self.options.retry.attempts => {
                    debug!(resource = %manifest.id(), attempt, %error, "retrying apply");
                    self.events.on_event(&SequenceEvent::ApplyRetry {
                        group: group.name.clone(),
                        resource: manifest.id(),
                        attempt,
                        error: error.to_string(),
                    });
                    self.clock.sleep(self.options.retry.delay(attempt));
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
