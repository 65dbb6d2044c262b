//! k8s-openapi object -> port status conversion
//!
//! Everything the evaluator needs is reduced to small typed structs
//! here, so the rest of the crate never touches raw API objects.

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, Pod};

use crate::domain::ports::{DeploymentState, JobState, PodState, PvcPhase};

pub fn pod_state(pod: &Pod) -> PodState {
    let name = pod
        .metadata
        .name
        .clone()
        .unwrap_or_else(|| "<unnamed>".to_string());
    let status = pod.status.as_ref();
    let running = status
        .and_then(|s| s.phase.as_deref())
        .map(|phase| phase == "Running")
        .unwrap_or(false);
    // No container statuses yet means the pod is still coming up.
    let containers_ready = status
        .and_then(|s| s.container_statuses.as_ref())
        .map(|statuses| !statuses.is_empty() && statuses.iter().all(|c| c.ready))
        .unwrap_or(false);
    PodState {
        name,
        running,
        containers_ready,
    }
}

pub fn deployment_state(deployment: &Deployment) -> DeploymentState {
    // `spec.replicas` defaults to 1 when unset, as the API server does.
    let desired = deployment
        .spec
        .as_ref()
        .and_then(|s| s.replicas)
        .unwrap_or(1);
    let status = deployment.status.as_ref();
    DeploymentState {
        desired_replicas: desired,
        ready_replicas: status.and_then(|s| s.ready_replicas).unwrap_or(0),
        updated_replicas: status.and_then(|s| s.updated_replicas).unwrap_or(0),
    }
}

pub fn job_state(job: &Job) -> JobState {
    let mut state = JobState::default();
    if let Some(conditions) = job.status.as_ref().and_then(|s| s.conditions.as_ref()) {
        for condition in conditions {
            if condition.status != "True" {
                continue;
            }
            match condition.type_.as_str() {
                "Complete" => state.complete = true,
                "Failed" => {
                    state.failed = true;
                    state.failure_message = condition
                        .message
                        .clone()
                        .or_else(|| condition.reason.clone());
                }
                _ => {}
            }
        }
    }
    state
}

pub fn pvc_phase(pvc: &PersistentVolumeClaim) -> PvcPhase {
    match pvc.status.as_ref().and_then(|s| s.phase.as_deref()) {
        Some("Bound") => PvcPhase::Bound,
        Some("Lost") => PvcPhase::Lost,
        _ => PvcPhase::Pending,
    }
}
