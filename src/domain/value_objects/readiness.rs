//! Readiness predicate value object
//!
//! Describes what "ready" means for a resource group, plus the outcome
//! space of waiting on one.

use std::fmt;
use std::time::Duration;

use super::selector::LabelSelector;

/// What must hold on the cluster before a group counts as ready
#[derive(Debug, Clone, PartialEq)]
pub enum ReadinessCheck {
    /// At least one pod matches the selector, and every matching pod is
    /// Running with all containers ready
    PodsReady {
        selector: LabelSelector,
        namespace: String,
    },
    /// Named Deployment has `readyReplicas == updatedReplicas == spec.replicas`
    DeploymentRolledOut { name: String, namespace: String },
    /// Named Job reached condition Complete; condition Failed fails fast
    JobComplete { name: String, namespace: String },
    /// Every named PVC has `status.phase == Bound`
    PvcBound {
        names: Vec<String>,
        namespace: String,
    },
}

/// A readiness check paired with its deadline
#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessPredicate {
    pub check: ReadinessCheck,
    pub timeout: Duration,
}

impl ReadinessPredicate {
    pub fn new(check: ReadinessCheck, timeout: Duration) -> Self {
        Self { check, timeout }
    }
}

impl fmt::Display for ReadinessCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessCheck::PodsReady { selector, namespace } => {
                write!(f, "pods ready ({selector}) in {namespace}")
            }
            ReadinessCheck::DeploymentRolledOut { name, namespace } => {
                write!(f, "deployment {namespace}/{name} rolled out")
            }
            ReadinessCheck::JobComplete { name, namespace } => {
                write!(f, "job {namespace}/{name} complete")
            }
            ReadinessCheck::PvcBound { names, namespace } => {
                write!(f, "pvc bound in {namespace}: {}", names.join(", "))
            }
        }
    }
}

/// Terminal outcome of waiting on a predicate
#[derive(Debug, Clone, PartialEq)]
pub enum WaitOutcome {
    /// Predicate satisfied within the deadline
    Ready,
    /// Deadline elapsed; warning-level, the component may still converge
    Timeout,
    /// Predicate can never be satisfied (e.g. Job hit Failed)
    PredicateFailed { reason: String },
    /// External cancellation observed at a poll tick
    Cancelled,
}

/// Single-shot observation of a predicate, used by validate/status
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeStatus {
    /// Predicate holds right now
    Satisfied,
    /// Observed but not yet satisfied
    Pending { detail: String },
    /// Target resource does not exist yet
    Missing { detail: String },
    /// Terminally failed
    Failed { detail: String },
    /// Could not observe (transport error)
    Unreachable { detail: String },
}
