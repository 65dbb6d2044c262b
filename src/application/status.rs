//! Status Use Case
//!
//! Read-only snapshot of each group's live state: how many of its
//! resources exist, and what its readiness predicate observes right
//! now. All state is re-derived from the cluster; nothing persists
//! between invocations.

use crate::domain::entities::ResourceGroup;
use crate::domain::ports::{ClusterApi, SystemClock};
use crate::domain::services::{ReadinessEvaluator, DEFAULT_POLL_INTERVAL};
use crate::domain::value_objects::{CancelToken, ProbeStatus};

/// Snapshot of one group
#[derive(Debug, Clone)]
pub struct GroupStatus {
    pub group: String,
    pub resources_total: usize,
    pub resources_present: usize,
    /// Result of a single predicate probe, if the group declares one
    pub readiness: Option<ProbeStatus>,
}

impl GroupStatus {
    pub fn all_present(&self) -> bool {
        self.resources_present == self.resources_total
    }
}

pub struct StatusUseCase<'a> {
    api: &'a dyn ClusterApi,
    default_namespace: String,
}

impl<'a> StatusUseCase<'a> {
    pub fn new(api: &'a dyn ClusterApi, default_namespace: impl Into<String>) -> Self {
        Self {
            api,
            default_namespace: default_namespace.into(),
        }
    }

    pub fn execute(&self, groups: &[ResourceGroup]) -> Vec<GroupStatus> {
        let clock = SystemClock;
        let evaluator = ReadinessEvaluator::new(
            self.api,
            &clock,
            DEFAULT_POLL_INTERVAL,
            CancelToken::new(),
        );

        groups
            .iter()
            .map(|group| {
                let present = group
                    .resources
                    .iter()
                    .filter(|m| {
                        self.api
                            .exists(m, &self.default_namespace)
                            .unwrap_or(false)
                    })
                    .count();
                GroupStatus {
                    group: group.name.clone(),
                    resources_total: group.resources.len(),
                    resources_present: present,
                    readiness: group
                        .readiness
                        .as_ref()
                        .map(|p| evaluator.probe(&p.check)),
                }
            })
            .collect()
    }
}
