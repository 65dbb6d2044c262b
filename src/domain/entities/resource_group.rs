//! Resource group entity
//!
//! A named, ordered unit of manifests applied together and judged by an
//! optional readiness predicate. Pure data; the only behavior is
//! construction-time validation.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ReadinessPredicate;
use crate::error::{CaravelError, CaravelResult};

use super::manifest::Manifest;

/// What the sequencer does when a group fails to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OnFailure {
    /// Stop the whole run; later groups are never attempted
    #[default]
    Abort,
    /// Record the failure, render a warning, keep going
    WarnAndContinue,
}

/// Ordered batch of resources applied and waited on as a unit
#[derive(Debug, Clone)]
pub struct ResourceGroup {
    pub name: String,
    pub resources: Vec<Manifest>,
    pub readiness: Option<ReadinessPredicate>,
    pub on_failure: OnFailure,
}

impl ResourceGroup {
    /// Build a group, rejecting empty names and empty resource lists.
    pub fn new(
        name: impl Into<String>,
        resources: Vec<Manifest>,
        readiness: Option<ReadinessPredicate>,
        on_failure: OnFailure,
    ) -> CaravelResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CaravelError::EmptyGroupName {
                index: 0,
                plan: Default::default(),
            });
        }
        if resources.is_empty() {
            return Err(CaravelError::EmptyGroup { group: name });
        }
        Ok(Self {
            name,
            resources,
            readiness,
            on_failure,
        })
    }
}
