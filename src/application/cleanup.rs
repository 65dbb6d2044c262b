//! Cleanup Use Case
//!
//! Tears down everything the plan declares, in reverse group order so
//! dependents disappear before their dependencies. Already-absent
//! resources are fine; deletion is not a place to be precious.

use tracing::info;

use crate::domain::entities::ResourceGroup;
use crate::domain::ports::ClusterApi;

/// Result of a cleanup pass
#[derive(Debug, Clone, Default)]
pub struct CleanupResult {
    /// Resource ids deleted
    pub deleted: Vec<String>,
    /// Resource ids that were already gone
    pub absent: Vec<String>,
    /// "id: error" strings for failed deletions
    pub errors: Vec<String>,
}

impl CleanupResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct CleanupUseCase<'a> {
    api: &'a dyn ClusterApi,
    default_namespace: String,
}

impl<'a> CleanupUseCase<'a> {
    pub fn new(api: &'a dyn ClusterApi, default_namespace: impl Into<String>) -> Self {
        Self {
            api,
            default_namespace: default_namespace.into(),
        }
    }

    pub fn execute(&self, groups: &[ResourceGroup]) -> CleanupResult {
        let mut result = CleanupResult::default();

        for group in groups.iter().rev() {
            for manifest in group.resources.iter().rev() {
                let id = manifest.id();
                match self.api.delete(manifest, &self.default_namespace) {
                    Ok(true) => {
                        info!(resource = %id, "deleted");
                        result.deleted.push(id);
                    }
                    Ok(false) => result.absent.push(id),
                    Err(e) => result.errors.push(format!("{id}: {e}")),
                }
            }
        }

        result
    }
}
