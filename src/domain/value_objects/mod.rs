//! Value objects - small validated types with no identity

pub mod cancel;
pub mod readiness;
pub mod selector;

pub use cancel::CancelToken;
pub use readiness::{ProbeStatus, ReadinessCheck, ReadinessPredicate, WaitOutcome};
pub use selector::LabelSelector;
