//! Domain entities

pub mod manifest;
pub mod resource_group;
pub mod sequence_run;

pub use manifest::Manifest;
pub use resource_group::{OnFailure, ResourceGroup};
pub use sequence_run::{GroupOutcome, GroupResult, RunStatus, SequenceRun};
