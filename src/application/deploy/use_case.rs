//! Deploy use case implementation

use crate::domain::entities::{ResourceGroup, SequenceRun};
use crate::domain::ports::{Clock, ClusterApi, NoopEventSink, SequenceEventSink};
use crate::domain::services::Sequencer;
use crate::domain::value_objects::CancelToken;

use super::options::DeployOptions;

/// Deploy use case - parameterized by its ports for easy testing
pub struct DeployUseCase<'a> {
    api: &'a dyn ClusterApi,
    clock: &'a dyn Clock,
}

impl<'a> DeployUseCase<'a> {
    pub fn new(api: &'a dyn ClusterApi, clock: &'a dyn Clock) -> Self {
        Self { api, clock }
    }

    /// Execute silently (tests, library callers).
    pub fn execute(&self, groups: &[ResourceGroup], options: &DeployOptions) -> SequenceRun {
        self.execute_with_events(groups, options, &NoopEventSink, CancelToken::new())
    }

    /// Execute with progress events and external cancellation.
    pub fn execute_with_events(
        &self,
        groups: &[ResourceGroup],
        options: &DeployOptions,
        events: &dyn SequenceEventSink,
        cancel: CancelToken,
    ) -> SequenceRun {
        let sequencer = Sequencer::new(self.api, self.clock, events, cancel, options.into());
        sequencer.run(groups)
    }
}
