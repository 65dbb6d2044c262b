//! Command entry points
//!
//! Thin wrappers that load the plan, connect the cluster adapter, run
//! a use case and render its result. All policy lives below this layer.

mod cleanup;
mod deploy;
mod status;
mod validate;

pub use cleanup::cmd_cleanup;
pub use deploy::cmd_deploy;
pub use status::cmd_status;
pub use validate::cmd_validate;

use std::path::Path;

use anyhow::{Context, Result};
use caravel::config::Plan;
use caravel::infrastructure::KubeClusterApi;

fn load_plan(path: &Path) -> Result<Plan> {
    Plan::load(path).with_context(|| format!("failed to load plan {}", path.display()))
}

fn connect() -> Result<KubeClusterApi> {
    KubeClusterApi::connect().context("failed to connect to the cluster")
}
