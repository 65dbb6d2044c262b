//! Deploy options

use std::time::Duration;

use crate::domain::services::{RetryPolicy, SequencerOptions, DEFAULT_POLL_INTERVAL};

/// Options for one deploy run
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Namespace for manifests that do not pin one
    pub default_namespace: String,
    /// Distance between readiness polls
    pub poll_interval: Duration,
    /// Transport-error retry policy for apply calls
    pub retry: RetryPolicy,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            default_namespace: "default".to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            retry: RetryPolicy::default(),
        }
    }
}

impl From<&DeployOptions> for SequencerOptions {
    fn from(options: &DeployOptions) -> Self {
        SequencerOptions {
            default_namespace: options.default_namespace.clone(),
            poll_interval: options.poll_interval,
            retry: options.retry,
        }
    }
}
