//! Ports - trait boundaries between the domain and the outside world

pub mod clock;
pub mod cluster_api;
pub mod events;

pub use clock::{Clock, SystemClock};
pub use cluster_api::{
    ClusterApi, ClusterError, DeploymentState, JobState, PodState, PvcPhase,
};
pub use events::{NoopEventSink, SequenceEvent, SequenceEventSink};
