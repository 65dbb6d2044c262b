//! Kubernetes cluster adapter
//!
//! Implements the `ClusterApi` port against a live API server using
//! `kube`. The async client is confined behind an owned tokio runtime;
//! callers see the blocking contract the sequencer expects.
//!
//! Apply uses server-side apply (`Patch::Apply` with a caravel field
//! manager), which gives the idempotent-upsert semantics the plan
//! relies on: re-applying an unchanged document is a no-op.

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::{PersistentVolumeClaim, Pod};
use kube::api::{Api, DeleteParams, DynamicObject, ListParams, Patch, PatchParams};
use kube::core::{ApiResource, GroupVersionKind};
use kube::Client;
use tracing::{debug, info};

use crate::domain::entities::Manifest;
use crate::domain::ports::{
    ClusterApi, ClusterError, DeploymentState, JobState, PodState, PvcPhase,
};
use crate::domain::value_objects::LabelSelector;

use super::convert;

/// Field manager name for server-side apply
const FIELD_MANAGER: &str = "caravel";

/// Kinds that live outside any namespace. Manifests of other kinds
/// without an explicit namespace land in the plan's default namespace.
const CLUSTER_SCOPED_KINDS: &[&str] = &[
    "Namespace",
    "ClusterRole",
    "ClusterRoleBinding",
    "CustomResourceDefinition",
    "StorageClass",
    "PersistentVolume",
    "PriorityClass",
    "IngressClass",
];

pub struct KubeClusterApi {
    client: Client,
    runtime: tokio::runtime::Runtime,
}

impl KubeClusterApi {
    /// Connect using the standard config chain (kubeconfig, then
    /// in-cluster service account).
    pub fn connect() -> Result<Self, ClusterError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| ClusterError::Transport(e.to_string()))?;
        let client = runtime
            .block_on(Client::try_default())
            .map_err(|e| ClusterError::Transport(e.to_string()))?;
        info!("connected to cluster");
        Ok(Self { client, runtime })
    }

    fn dynamic_api(
        &self,
        manifest: &Manifest,
        default_namespace: &str,
    ) -> Api<DynamicObject> {
        let (group, version) = match manifest.api_version.split_once('/') {
            Some((group, version)) => (group, version),
            None => ("", manifest.api_version.as_str()),
        };
        let gvk = GroupVersionKind::gvk(group, version, &manifest.kind);
        let resource = ApiResource::from_gvk(&gvk);

        if CLUSTER_SCOPED_KINDS.contains(&manifest.kind.as_str()) {
            Api::all_with(self.client.clone(), &resource)
        } else {
            let namespace = manifest
                .namespace
                .as_deref()
                .unwrap_or(default_namespace);
            Api::namespaced_with(self.client.clone(), namespace, &resource)
        }
    }
}

impl ClusterApi for KubeClusterApi {
    fn apply(&self, manifest: &Manifest, default_namespace: &str) -> Result<(), ClusterError> {
        let api = self.dynamic_api(manifest, default_namespace);
        let params = PatchParams::apply(FIELD_MANAGER).force();
        debug!(resource = %manifest.id(), "server-side apply");
        self.runtime
            .block_on(api.patch(&manifest.name, &params, &Patch::Apply(&manifest.body)))
            .map(|_| ())
            .map_err(|e| classify_apply_error(e, &manifest.id()))
    }

    fn pods_matching(
        &self,
        selector: &LabelSelector,
        namespace: &str,
    ) -> Result<Vec<PodState>, ClusterError> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let params = ListParams::default().labels(selector.as_str());
        let pods = self
            .runtime
            .block_on(api.list(&params))
            .map_err(transport)?;
        Ok(pods.items.iter().map(convert::pod_state).collect())
    }

    fn deployment_state(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Option<DeploymentState>, ClusterError> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let deployment = self.runtime.block_on(api.get_opt(name)).map_err(transport)?;
        Ok(deployment.as_ref().map(convert::deployment_state))
    }

    fn job_state(&self, name: &str, namespace: &str) -> Result<Option<JobState>, ClusterError> {
        let api: Api<Job> = Api::namespaced(self.client.clone(), namespace);
        let job = self.runtime.block_on(api.get_opt(name)).map_err(transport)?;
        Ok(job.as_ref().map(convert::job_state))
    }

    fn pvc_phase(&self, name: &str, namespace: &str) -> Result<Option<PvcPhase>, ClusterError> {
        let api: Api<PersistentVolumeClaim> = Api::namespaced(self.client.clone(), namespace);
        let pvc = self.runtime.block_on(api.get_opt(name)).map_err(transport)?;
        Ok(pvc.as_ref().map(convert::pvc_phase))
    }

    fn exists(&self, manifest: &Manifest, default_namespace: &str) -> Result<bool, ClusterError> {
        let api = self.dynamic_api(manifest, default_namespace);
        let found = self
            .runtime
            .block_on(api.get_opt(&manifest.name))
            .map_err(transport)?;
        Ok(found.is_some())
    }

    fn delete(&self, manifest: &Manifest, default_namespace: &str) -> Result<bool, ClusterError> {
        let api = self.dynamic_api(manifest, default_namespace);
        match self
            .runtime
            .block_on(api.delete(&manifest.name, &DeleteParams::default()))
        {
            Ok(_) => Ok(true),
            Err(kube::Error::Api(response)) if response.code == 404 => Ok(false),
            Err(e) => Err(classify_apply_error(e, &manifest.id())),
        }
    }
}

/// Reads classify every failure as transport: the evaluator retries
/// them silently until its deadline.
fn transport(error: kube::Error) -> ClusterError {
    ClusterError::Transport(error.to_string())
}

/// Writes distinguish API rejections (4xx, never retried) from
/// transport failures (retried with backoff).
fn classify_apply_error(error: kube::Error, resource: &str) -> ClusterError {
    match error {
        kube::Error::Api(response) if (400..500).contains(&response.code) && response.code != 429 => {
            ClusterError::Rejected {
                resource: resource.to_string(),
                message: response.message,
            }
        }
        other => ClusterError::Transport(other.to_string()),
    }
}
