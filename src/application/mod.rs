//! Application Layer
//!
//! Use cases that orchestrate the business flow. This layer depends on
//! the domain (entities, services, ports) and coordinates between
//! infrastructure and domain; it contains no business rules itself.
//!
//! - `DeployUseCase` - runs the sequencer over the plan's groups
//! - `ValidateUseCase` - read-only health checks (quick/report)
//! - `StatusUseCase` - read-only per-group snapshot
//! - `CleanupUseCase` - reverse-order teardown

pub mod cleanup;
pub mod deploy;
pub mod status;
pub mod validate;

pub use cleanup::{CleanupResult, CleanupUseCase};
pub use deploy::{DeployOptions, DeployUseCase};
pub use status::{GroupStatus, StatusUseCase};
pub use validate::{CheckItem, CheckStatus, ValidateDepth, ValidateUseCase, ValidationReport};
