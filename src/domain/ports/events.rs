//! Sequence event port
//!
//! Observable interface for a sequencer run. Implementations render
//! terminal progress, stream NDJSON for CI, or stay silent.

use std::time::Duration;

use crate::domain::entities::{GroupOutcome, RunStatus};

/// Event emitted while a run progresses
#[derive(Debug, Clone)]
pub enum SequenceEvent {
    /// Run started
    Started { group_count: usize },

    /// Group apply beginning
    GroupStarted { group: String, resource_count: usize },

    /// One resource upserted
    ResourceApplied { group: String, resource: String },

    /// Transport error; the apply will be retried
    ApplyRetry {
        group: String,
        resource: String,
        attempt: u32,
        error: String,
    },

    /// Readiness wait beginning
    Waiting {
        group: String,
        check: String,
        timeout: Duration,
    },

    /// Group reached a terminal outcome
    GroupFinished {
        group: String,
        outcome: GroupOutcome,
        elapsed: Duration,
        detail: Option<String>,
    },

    /// Run finalized
    Finished { status: RunStatus },
}

/// Trait for receiving sequence events
pub trait SequenceEventSink: Send + Sync {
    fn on_event(&self, event: &SequenceEvent);
}

/// No-op sink for silent operation
pub struct NoopEventSink;

impl SequenceEventSink for NoopEventSink {
    fn on_event(&self, _event: &SequenceEvent) {}
}
