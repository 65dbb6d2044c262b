//! Readiness predicate evaluator
//!
//! Polls a predicate at a fixed interval until it is satisfied, its
//! deadline elapses, it terminally fails, or the run is cancelled.
//! Transient read errors are retried silently until the deadline - a
//! flaky API server must never abort a wait early.

use std::time::Duration;

use tracing::debug;

use crate::domain::ports::{Clock, ClusterApi, PvcPhase};
use crate::domain::value_objects::{
    CancelToken, ProbeStatus, ReadinessCheck, ReadinessPredicate, WaitOutcome,
};

/// Default distance between polls. The plan can override within reason.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

pub struct ReadinessEvaluator<'a> {
    api: &'a dyn ClusterApi,
    clock: &'a dyn Clock,
    interval: Duration,
    cancel: CancelToken,
}

impl<'a> ReadinessEvaluator<'a> {
    pub fn new(
        api: &'a dyn ClusterApi,
        clock: &'a dyn Clock,
        interval: Duration,
        cancel: CancelToken,
    ) -> Self {
        Self {
            api,
            clock,
            interval,
            cancel,
        }
    }

    /// Block until the predicate resolves.
    pub fn wait(&self, predicate: &ReadinessPredicate) -> WaitOutcome {
        let deadline = self.clock.now() + predicate.timeout;
        loop {
            if self.cancel.is_cancelled() {
                return WaitOutcome::Cancelled;
            }
            match self.probe(&predicate.check) {
                ProbeStatus::Satisfied => return WaitOutcome::Ready,
                ProbeStatus::Failed { detail } => {
                    return WaitOutcome::PredicateFailed { reason: detail }
                }
                ProbeStatus::Pending { detail } | ProbeStatus::Missing { detail } => {
                    debug!(check = %predicate.check, %detail, "not ready yet");
                }
                ProbeStatus::Unreachable { detail } => {
                    debug!(check = %predicate.check, %detail, "read failed, will retry");
                }
            }
            if self.clock.now() >= deadline {
                return WaitOutcome::Timeout;
            }
            self.clock.sleep(self.interval);
        }
    }

    /// Observe the predicate once, without waiting.
    pub fn probe(&self, check: &ReadinessCheck) -> ProbeStatus {
        match check {
            ReadinessCheck::PodsReady {
                selector,
                namespace,
            } => match self.api.pods_matching(selector, namespace) {
                Err(e) => unreachable_status(e),
                Ok(pods) if pods.is_empty() => ProbeStatus::Missing {
                    detail: format!("no pods match '{selector}'"),
                },
                Ok(pods) => {
                    let ready = pods.iter().filter(|p| p.is_ready()).count();
                    if ready == pods.len() {
                        ProbeStatus::Satisfied
                    } else {
                        ProbeStatus::Pending {
                            detail: format!("{ready}/{} pods ready", pods.len()),
                        }
                    }
                }
            },

            ReadinessCheck::DeploymentRolledOut { name, namespace } => {
                match self.api.deployment_state(name, namespace) {
                    Err(e) => unreachable_status(e),
                    Ok(None) => ProbeStatus::Missing {
                        detail: format!("deployment {namespace}/{name} not found"),
                    },
                    Ok(Some(state)) if state.is_rolled_out() => ProbeStatus::Satisfied,
                    Ok(Some(state)) => ProbeStatus::Pending {
                        detail: format!(
                            "{}/{} replicas ready, {} updated",
                            state.ready_replicas, state.desired_replicas, state.updated_replicas
                        ),
                    },
                }
            }

            ReadinessCheck::JobComplete { name, namespace } => {
                match self.api.job_state(name, namespace) {
                    Err(e) => unreachable_status(e),
                    Ok(None) => ProbeStatus::Missing {
                        detail: format!("job {namespace}/{name} not found"),
                    },
                    // Failed wins over Complete: a failed job must fail
                    // fast, never drift into a timeout.
                    Ok(Some(state)) if state.failed => ProbeStatus::Failed {
                        detail: state
                            .failure_message
                            .unwrap_or_else(|| format!("job {namespace}/{name} failed")),
                    },
                    Ok(Some(state)) if state.complete => ProbeStatus::Satisfied,
                    Ok(Some(_)) => ProbeStatus::Pending {
                        detail: format!("job {namespace}/{name} still running"),
                    },
                }
            }

            ReadinessCheck::PvcBound { names, namespace } => {
                let mut pending = Vec::new();
                for name in names {
                    match self.api.pvc_phase(name, namespace) {
                        Err(e) => return unreachable_status(e),
                        Ok(None) => {
                            return ProbeStatus::Missing {
                                detail: format!("pvc {namespace}/{name} not found"),
                            }
                        }
                        Ok(Some(PvcPhase::Lost)) => {
                            return ProbeStatus::Failed {
                                detail: format!("pvc {namespace}/{name} lost its volume"),
                            }
                        }
                        Ok(Some(PvcPhase::Pending)) => pending.push(name.clone()),
                        Ok(Some(PvcPhase::Bound)) => {}
                    }
                }
                if pending.is_empty() {
                    ProbeStatus::Satisfied
                } else {
                    ProbeStatus::Pending {
                        detail: format!("waiting for bind: {}", pending.join(", ")),
                    }
                }
            }
        }
    }
}

fn unreachable_status(error: crate::domain::ports::ClusterError) -> ProbeStatus {
    ProbeStatus::Unreachable {
        detail: error.to_string(),
    }
}
