//! Plan file schema
//!
//! Raw serde types for the TOML deploy plan. Validation and conversion
//! into domain entities happens in the loader.

use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::entities::resource_group::OnFailure;

/// Top-level plan file
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PlanFile {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default, rename = "group")]
    pub groups: Vec<GroupEntry>,
}

/// Plan-wide fallbacks
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    /// Namespace for manifests and checks that do not pin one
    pub namespace: Option<String>,
    /// Readiness timeout when a group does not declare its own
    pub timeout_seconds: Option<u64>,
    /// Distance between readiness polls
    pub poll_interval_seconds: Option<u64>,
}

/// One `[[group]]` block
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupEntry {
    #[serde(default)]
    pub name: String,
    /// Manifest files or directories, relative to the plan file
    #[serde(default)]
    pub manifests: Vec<PathBuf>,
    #[serde(default)]
    pub on_failure: OnFailure,
    pub readiness: Option<ReadinessEntry>,
}

/// One `[group.readiness]` block
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadinessEntry {
    pub kind: ReadinessKindEntry,
    /// For `pods-ready`
    pub label_selector: Option<String>,
    /// For `deployment-rolled-out` and `job-complete`
    pub name: Option<String>,
    /// For `pvc-bound`
    pub names: Option<Vec<String>>,
    pub namespace: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadinessKindEntry {
    PodsReady,
    DeploymentRolledOut,
    JobComplete,
    PvcBound,
}
