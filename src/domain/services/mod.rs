//! Domain services - stateless logic over ports

pub mod evaluator;
pub mod sequencer;

pub use evaluator::{ReadinessEvaluator, DEFAULT_POLL_INTERVAL};
pub use sequencer::{RetryPolicy, Sequencer, SequencerOptions};
