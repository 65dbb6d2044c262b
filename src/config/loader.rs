//! Plan loading and validation
//!
//! Turns a plan file plus its manifest files into validated domain
//! groups. Every structural problem surfaces here as a
//! `CaravelError` - before anything touches the cluster.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::entities::{Manifest, ResourceGroup};
use crate::domain::services::DEFAULT_POLL_INTERVAL;
use crate::domain::value_objects::{LabelSelector, ReadinessCheck, ReadinessPredicate};
use crate::error::{CaravelError, CaravelResult};

use super::types::{GroupEntry, PlanFile, ReadinessEntry, ReadinessKindEntry};

/// Readiness timeout when neither the group nor the defaults set one
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Fallback namespace, matching the cluster's own default
const DEFAULT_NAMESPACE: &str = "default";

/// A fully loaded and validated deploy plan
#[derive(Debug, Clone)]
pub struct Plan {
    pub groups: Vec<ResourceGroup>,
    pub default_namespace: String,
    pub poll_interval: Duration,
}

impl Plan {
    /// Load a plan file and every manifest it references.
    pub fn load(path: &Path) -> CaravelResult<Plan> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CaravelError::PlanNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CaravelError::Io(e)
            }
        })?;
        let file: PlanFile = toml::from_str(&content).map_err(|e| CaravelError::InvalidPlan {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let base = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        let default_namespace = file
            .defaults
            .namespace
            .clone()
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        // A zero interval would turn the readiness wait into a busy
        // loop against the API server.
        if file.defaults.poll_interval_seconds == Some(0) {
            return Err(CaravelError::InvalidPollInterval {
                plan: path.to_path_buf(),
            });
        }
        let poll_interval = file
            .defaults
            .poll_interval_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        let mut groups = Vec::with_capacity(file.groups.len());
        for (index, entry) in file.groups.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(CaravelError::EmptyGroupName {
                    index,
                    plan: path.to_path_buf(),
                });
            }
            groups.push(build_group(entry, &base, &file, &default_namespace)?);
        }

        Ok(Plan {
            groups,
            default_namespace,
            poll_interval,
        })
    }
}

fn build_group(
    entry: &GroupEntry,
    base: &Path,
    file: &PlanFile,
    default_namespace: &str,
) -> CaravelResult<ResourceGroup> {
    let mut resources = Vec::new();
    for manifest_path in &entry.manifests {
        let resolved = base.join(manifest_path);
        for file_path in expand_path(&resolved)? {
            let content = std::fs::read_to_string(&file_path)?;
            resources.extend(Manifest::parse_all(&content, &file_path)?);
        }
    }

    let readiness = entry
        .readiness
        .as_ref()
        .map(|r| build_predicate(&entry.name, r, file, default_namespace))
        .transpose()?;

    ResourceGroup::new(&entry.name, resources, readiness, entry.on_failure)
}

/// A plain file is taken as-is; a directory yields its `*.yaml` and
/// `*.yml` files in filename order.
fn expand_path(path: &Path) -> CaravelResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if path.is_dir() {
        let mut files: Vec<PathBuf> = std::fs::read_dir(path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e == "yaml" || e == "yml")
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        return Ok(files);
    }
    Err(CaravelError::ManifestNotFound {
        path: path.to_path_buf(),
    })
}

fn build_predicate(
    group: &str,
    entry: &ReadinessEntry,
    file: &PlanFile,
    default_namespace: &str,
) -> CaravelResult<ReadinessPredicate> {
    let namespace = entry
        .namespace
        .clone()
        .unwrap_or_else(|| default_namespace.to_string());
    let timeout_secs = entry
        .timeout_seconds
        .or(file.defaults.timeout_seconds)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(CaravelError::InvalidTimeout {
            group: group.to_string(),
        });
    }

    let check = match entry.kind {
        ReadinessKindEntry::PodsReady => {
            let raw = entry.label_selector.as_deref().ok_or(
                CaravelError::MissingField {
                    group: group.to_string(),
                    field: "label_selector",
                },
            )?;
            ReadinessCheck::PodsReady {
                selector: LabelSelector::parse(raw)?,
                namespace,
            }
        }
        ReadinessKindEntry::DeploymentRolledOut => ReadinessCheck::DeploymentRolledOut {
            name: required_name(group, entry)?,
            namespace,
        },
        ReadinessKindEntry::JobComplete => ReadinessCheck::JobComplete {
            name: required_name(group, entry)?,
            namespace,
        },
        ReadinessKindEntry::PvcBound => {
            let names = entry
                .names
                .clone()
                .filter(|names| !names.is_empty())
                .ok_or(CaravelError::MissingField {
                    group: group.to_string(),
                    field: "names",
                })?;
            ReadinessCheck::PvcBound { names, namespace }
        }
    };

    Ok(ReadinessPredicate::new(
        check,
        Duration::from_secs(timeout_secs),
    ))
}

fn required_name(group: &str, entry: &ReadinessEntry) -> CaravelResult<String> {
    entry
        .name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .ok_or(CaravelError::MissingField {
            group: group.to_string(),
            field: "name",
        })
}
