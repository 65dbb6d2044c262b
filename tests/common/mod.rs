//! Common test utilities for sequencer scenario and property tests.
//!
//! `ScriptedCluster` is a deterministic in-memory stand-in for the
//! cluster port, and `ManualClock` makes waits advance instantly.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use caravel::domain::entities::resource_group::OnFailure;
use caravel::domain::entities::Manifest;
use caravel::domain::ports::{
    Clock, ClusterApi, ClusterError, DeploymentState, JobState, PodState, PvcPhase,
};
use caravel::domain::value_objects::LabelSelector;
use caravel::ResourceGroup;

/// Clock whose sleeps advance a virtual offset instead of blocking.
pub struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }

    fn sleep(&self, duration: Duration) {
        *self.offset.lock().unwrap() += duration;
    }
}

/// Cluster double scripted through its public fields.
#[derive(Default)]
pub struct ScriptedCluster {
    /// Resource ids whose apply is rejected by the API server
    pub reject: HashSet<String>,
    /// Selectors that observe ready pods
    pub ready_selectors: HashSet<String>,
    /// Deployment names that report a finished rollout
    pub ready_deployments: HashSet<String>,
    /// Resource ids present on the cluster
    pub existing: HashSet<String>,
    /// Every apply, in call order
    pub applied: RefCell<Vec<String>>,
    /// Every delete, in call order
    pub deleted: RefCell<Vec<String>>,
}

impl ClusterApi for ScriptedCluster {
    fn apply(&self, manifest: &Manifest, _namespace: &str) -> Result<(), ClusterError> {
        let id = manifest.id();
        if self.reject.contains(&id) {
            return Err(ClusterError::Rejected {
                resource: id,
                message: "admission denied".to_string(),
            });
        }
        self.applied.borrow_mut().push(id);
        Ok(())
    }

    fn pods_matching(
        &self,
        selector: &LabelSelector,
        _namespace: &str,
    ) -> Result<Vec<PodState>, ClusterError> {
        let ready = self.ready_selectors.contains(&selector.to_string());
        Ok(vec![PodState {
            name: "pod-0".to_string(),
            running: ready,
            containers_ready: ready,
        }])
    }

    fn deployment_state(
        &self,
        name: &str,
        _namespace: &str,
    ) -> Result<Option<DeploymentState>, ClusterError> {
        if self.ready_deployments.contains(name) {
            Ok(Some(DeploymentState {
                desired_replicas: 1,
                ready_replicas: 1,
                updated_replicas: 1,
            }))
        } else {
            Ok(None)
        }
    }

    fn job_state(&self, _name: &str, _namespace: &str) -> Result<Option<JobState>, ClusterError> {
        Ok(None)
    }

    fn pvc_phase(&self, _name: &str, _namespace: &str) -> Result<Option<PvcPhase>, ClusterError> {
        Ok(Some(PvcPhase::Bound))
    }

    fn exists(&self, manifest: &Manifest, _namespace: &str) -> Result<bool, ClusterError> {
        Ok(self.existing.contains(&manifest.id()))
    }

    fn delete(&self, manifest: &Manifest, _namespace: &str) -> Result<bool, ClusterError> {
        self.deleted.borrow_mut().push(manifest.id());
        Ok(true)
    }
}

pub fn manifest(kind: &str, name: &str) -> Manifest {
    let yaml = format!("apiVersion: v1\nkind: {kind}\nmetadata:\n  name: {name}\n");
    Manifest::parse_all(&yaml, &PathBuf::from("fixture.yaml"))
        .unwrap()
        .remove(0)
}

pub fn plain_group(name: &str, on_failure: OnFailure) -> ResourceGroup {
    ResourceGroup::new(name, vec![manifest("ConfigMap", name)], None, on_failure).unwrap()
}
