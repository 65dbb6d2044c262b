//! Plan configuration
//!
//! The deploy plan is a TOML file naming ordered resource groups, the
//! manifest files each group applies, and the readiness check that
//! gates it. See `types` for the schema and `loader` for validation.

mod loader;
mod types;

pub use loader::Plan;
pub use types::{Defaults, GroupEntry, PlanFile, ReadinessEntry, ReadinessKindEntry};

/// Default plan file name, looked up in the working directory
pub const DEFAULT_PLAN_FILE: &str = "caravel.toml";
