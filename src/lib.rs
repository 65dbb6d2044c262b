//! Caravel - ordered Kubernetes deployment sequencer
//!
//! Caravel applies a plan of ordered resource groups to a cluster,
//! waiting between groups until each one's readiness predicate holds.
//! Failure policies decide whether a broken group aborts the run or
//! merely warns, and Ctrl+C cancels cleanly at the next poll tick.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

// Re-exports for convenience
pub use application::{CleanupUseCase, DeployOptions, DeployUseCase, StatusUseCase, ValidateUseCase};
pub use config::{Plan, DEFAULT_PLAN_FILE};
pub use domain::entities::{GroupOutcome, ResourceGroup, RunStatus, SequenceRun};
pub use domain::value_objects::{CancelToken, ReadinessCheck, ReadinessPredicate};
pub use error::{CaravelError, CaravelResult};
pub use infrastructure::KubeClusterApi;
