//! Cluster API port
//!
//! Abstracts the cluster control plane behind typed operations: an
//! idempotent declarative apply, per-kind status reads, and delete for
//! the cleanup path. Status comes back as fields, not scraped text.

use crate::domain::entities::Manifest;
use crate::domain::value_objects::LabelSelector;

/// Error from a single cluster API call
#[derive(Debug, Clone)]
pub enum ClusterError {
    /// Transient communication failure; safe to retry
    Transport(String),
    /// The API server rejected the request; retrying is pointless
    Rejected { resource: String, message: String },
}

impl std::fmt::Display for ClusterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport error: {}", msg),
            Self::Rejected { resource, message } => {
                write!(f, "{} rejected: {}", resource, message)
            }
        }
    }
}

impl std::error::Error for ClusterError {}

impl ClusterError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ClusterError::Transport(_))
    }
}

/// Observed state of one pod
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodState {
    pub name: String,
    /// `status.phase` is "Running"
    pub running: bool,
    /// Every container reports ready (false when no statuses exist yet)
    pub containers_ready: bool,
}

impl PodState {
    pub fn is_ready(&self) -> bool {
        self.running && self.containers_ready
    }
}

/// Replica counters of a Deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentState {
    pub desired_replicas: i32,
    pub ready_replicas: i32,
    pub updated_replicas: i32,
}

impl DeploymentState {
    pub fn is_rolled_out(&self) -> bool {
        self.ready_replicas == self.desired_replicas
            && self.updated_replicas == self.desired_replicas
    }
}

/// Condition summary of a Job
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobState {
    pub complete: bool,
    pub failed: bool,
    pub failure_message: Option<String>,
}

/// `status.phase` of a PersistentVolumeClaim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PvcPhase {
    Pending,
    Bound,
    Lost,
}

/// Typed handle to the cluster control plane.
///
/// Implementations: `KubeClusterApi` against a live API server, mock
/// clusters in tests. All calls are blocking from the caller's view;
/// the kube adapter drives async I/O internally.
pub trait ClusterApi {
    /// Idempotent upsert of one manifest (server-side apply semantics).
    fn apply(&self, manifest: &Manifest, default_namespace: &str) -> Result<(), ClusterError>;

    /// Pods matching a label selector in a namespace.
    fn pods_matching(
        &self,
        selector: &LabelSelector,
        namespace: &str,
    ) -> Result<Vec<PodState>, ClusterError>;

    /// Replica counters of a named Deployment; None if absent.
    fn deployment_state(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Option<DeploymentState>, ClusterError>;

    /// Condition summary of a named Job; None if absent.
    fn job_state(&self, name: &str, namespace: &str) -> Result<Option<JobState>, ClusterError>;

    /// Phase of a named PVC; None if absent.
    fn pvc_phase(&self, name: &str, namespace: &str) -> Result<Option<PvcPhase>, ClusterError>;

    /// Whether the manifest's resource currently exists.
    fn exists(&self, manifest: &Manifest, default_namespace: &str) -> Result<bool, ClusterError>;

    /// Delete the manifest's resource. Ok(false) when already absent.
    fn delete(&self, manifest: &Manifest, default_namespace: &str) -> Result<bool, ClusterError>;
}
