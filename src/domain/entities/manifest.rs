//! Manifest entity - one declarative resource document
//!
//! Caravel treats manifest content as opaque: the body travels to the
//! cluster API untouched (server-side apply), and only the identifying
//! fields needed for display, existence checks, and deletion are
//! extracted up front. Semantic validation is the API server's job.

use std::path::Path;

use serde::Deserialize;

use crate::error::{CaravelError, CaravelResult};

/// A single parsed Kubernetes resource document
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// `apiVersion` field, e.g. "apps/v1"
    pub api_version: String,
    /// `kind` field, e.g. "Deployment"
    pub kind: String,
    /// `metadata.name`
    pub name: String,
    /// `metadata.namespace`, if the document pins one
    pub namespace: Option<String>,
    /// Full document as JSON, ready for server-side apply
    pub body: serde_json::Value,
}

impl Manifest {
    /// Parse every YAML document in `content`.
    ///
    /// Empty documents (stray `---` separators, comment-only blocks)
    /// are skipped. `source` is only used for error reporting.
    pub fn parse_all(content: &str, source: &Path) -> CaravelResult<Vec<Manifest>> {
        let mut manifests = Vec::new();
        for doc in serde_yaml_ng::Deserializer::from_str(content) {
            let value = serde_yaml_ng::Value::deserialize(doc).map_err(|e| {
                CaravelError::InvalidManifest {
                    path: source.to_path_buf(),
                    message: e.to_string(),
                }
            })?;
            if value.is_null() {
                continue;
            }
            manifests.push(Self::from_yaml(value, source)?);
        }
        Ok(manifests)
    }

    fn from_yaml(value: serde_yaml_ng::Value, source: &Path) -> CaravelResult<Manifest> {
        let body = serde_json::to_value(&value).map_err(|e| CaravelError::InvalidManifest {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        let api_version = required_str(&body, &["apiVersion"], source)?;
        let kind = required_str(&body, &["kind"], source)?;
        let name = required_str(&body, &["metadata", "name"], source)?;
        let namespace = body
            .pointer("/metadata/namespace")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        Ok(Manifest {
            api_version,
            kind,
            name,
            namespace,
            body,
        })
    }

    /// Display identity, e.g. "Deployment/backend"
    pub fn id(&self) -> String {
        format!("{}/{}", self.kind, self.name)
    }
}

fn required_str(
    body: &serde_json::Value,
    path: &[&str],
    source: &Path,
) -> CaravelResult<String> {
    let mut current = body;
    for key in path {
        current = match current.get(key) {
            Some(v) => v,
            None => {
                return Err(CaravelError::InvalidManifest {
                    path: source.to_path_buf(),
                    message: format!("document is missing '{}'", path.join(".")),
                })
            }
        };
    }
    current
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| CaravelError::InvalidManifest {
            path: source.to_path_buf(),
            message: format!("'{}' is not a string", path.join(".")),
        })
}
