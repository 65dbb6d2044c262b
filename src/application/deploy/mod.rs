//! Deploy Use Case
//!
//! Orchestrates one sequencer run: groups in, finalized `SequenceRun`
//! out. All policy lives in the domain services; this layer only wires
//! ports together.

mod options;
#[cfg(test)]
mod tests;
mod use_case;

pub use options::DeployOptions;
pub use use_case::DeployUseCase;
