//! NDJSON event stream
//!
//! One JSON object per line on stdout, for CI consumers. The schema is
//! flat: an `event` discriminator plus the event's own fields.

use serde_json::{json, Value};

use crate::domain::ports::{SequenceEvent, SequenceEventSink};

pub fn event_value(event: &SequenceEvent) -> Value {
    match event {
        SequenceEvent::Started { group_count } => json!({
            "event": "started",
            "groups": group_count,
        }),
        SequenceEvent::GroupStarted {
            group,
            resource_count,
        } => json!({
            "event": "group-started",
            "group": group,
            "resources": resource_count,
        }),
        SequenceEvent::ResourceApplied { group, resource } => json!({
            "event": "resource-applied",
            "group": group,
            "resource": resource,
        }),
        SequenceEvent::ApplyRetry {
            group,
            resource,
            attempt,
            error,
        } => json!({
            "event": "apply-retry",
            "group": group,
            "resource": resource,
            "attempt": attempt,
            "error": error,
        }),
        SequenceEvent::Waiting {
            group,
            check,
            timeout,
        } => json!({
            "event": "waiting",
            "group": group,
            "check": check,
            "timeout_seconds": timeout.as_secs(),
        }),
        SequenceEvent::GroupFinished {
            group,
            outcome,
            elapsed,
            detail,
        } => json!({
            "event": "group-finished",
            "group": group,
            "outcome": outcome,
            "elapsed_seconds": elapsed.as_secs(),
            "detail": detail,
        }),
        SequenceEvent::Finished { status } => json!({
            "event": "finished",
            "status": status,
        }),
    }
}

/// Sink that prints one NDJSON line per event.
pub struct JsonEventSink;

impl SequenceEventSink for JsonEventSink {
    fn on_event(&self, event: &SequenceEvent) {
        println!("{}", event_value(event));
    }
}
