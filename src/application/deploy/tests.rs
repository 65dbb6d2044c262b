//! Deploy use case tests
//!
//! Exercises the sequencer's ordering, failure-policy, retry, and
//! cancellation contracts against mock ports.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::domain::entities::resource_group::OnFailure;
use crate::domain::entities::{GroupOutcome, Manifest, ResourceGroup, RunStatus};
use crate::domain::ports::{
    Clock, ClusterApi, ClusterError, DeploymentState, JobState, PodState, PvcPhase,
};
use crate::domain::value_objects::{
    CancelToken, LabelSelector, ReadinessCheck, ReadinessPredicate,
};

use super::{DeployOptions, DeployUseCase};

// Mock implementations for testing

struct FakeClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl FakeClock {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }

    fn sleep(&self, duration: Duration) {
        *self.offset.lock().unwrap() += duration;
    }
}

#[derive(Default)]
struct MockCluster {
    /// Resource ids applied, in order
    applied: RefCell<Vec<String>>,
    /// Resource ids whose apply is rejected outright
    reject: HashSet<String>,
    /// Resource id -> remaining transient failures before success
    flaky: RefCell<HashMap<String, u32>>,
    /// Selector strings that report a single ready pod
    ready_selectors: HashSet<String>,
    /// Cancel this token on the first readiness poll
    cancel_on_poll: Option<CancelToken>,
}

impl ClusterApi for MockCluster {
    fn apply(&self, manifest: &Manifest, _ns: &str) -> Result<(), ClusterError> {
        let id = manifest.id();
        if self.reject.contains(&id) {
            return Err(ClusterError::Rejected {
                resource: id,
                message: "admission webhook denied".into(),
            });
        }
        let mut flaky = self.flaky.borrow_mut();
        if let Some(remaining) = flaky.get_mut(&id) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(ClusterError::Transport("connection refused".into()));
            }
        }
        self.applied.borrow_mut().push(id);
        Ok(())
    }

    fn pods_matching(
        &self,
        selector: &LabelSelector,
        _ns: &str,
    ) -> Result<Vec<PodState>, ClusterError> {
        if let Some(token) = &self.cancel_on_poll {
            token.cancel();
        }
        if self.ready_selectors.contains(selector.as_str()) {
            Ok(vec![PodState {
                name: "pod-0".into(),
                running: true,
                containers_ready: true,
            }])
        } else {
            Ok(vec![])
        }
    }

    fn deployment_state(
        &self,
        _name: &str,
        _ns: &str,
    ) -> Result<Option<DeploymentState>, ClusterError> {
        Ok(None)
    }

    fn job_state(&self, _name: &str, _ns: &str) -> Result<Option<JobState>, ClusterError> {
        Ok(None)
    }

    fn pvc_phase(&self, _name: &str, _ns: &str) -> Result<Option<PvcPhase>, ClusterError> {
        Ok(Some(PvcPhase::Bound))
    }

    fn exists(&self, _m: &Manifest, _ns: &str) -> Result<bool, ClusterError> {
        Ok(true)
    }

    fn delete(&self, _m: &Manifest, _ns: &str) -> Result<bool, ClusterError> {
        Ok(true)
    }
}

fn manifest(kind: &str, name: &str) -> Manifest {
    let yaml = format!("apiVersion: v1\nkind: {kind}\nmetadata:\n  name: {name}\n");
    Manifest::parse_all(&yaml, &PathBuf::from("test.yaml"))
        .unwrap()
        .remove(0)
}

fn plain_group(name: &str, on_failure: OnFailure) -> ResourceGroup {
    ResourceGroup::new(
        name,
        vec![manifest("ConfigMap", &format!("{name}-config"))],
        None,
        on_failure,
    )
    .unwrap()
}

fn pods_ready_group(name: &str, selector: &str, timeout_secs: u64) -> ResourceGroup {
    ResourceGroup::new(
        name,
        vec![manifest("Deployment", name)],
        Some(ReadinessPredicate::new(
            ReadinessCheck::PodsReady {
                selector: LabelSelector::parse(selector).unwrap(),
                namespace: "demo".into(),
            },
            Duration::from_secs(timeout_secs),
        )),
        OnFailure::Abort,
    )
    .unwrap()
}

fn fast_options() -> DeployOptions {
    DeployOptions {
        poll_interval: Duration::from_secs(2),
        ..DeployOptions::default()
    }
}

#[test]
fn unsatisfiable_readiness_times_out_but_run_completes() {
    // Storage has no check; Database waits on pods that never appear.
    let cluster = MockCluster::default();
    let clock = FakeClock::new();
    let use_case = DeployUseCase::new(&cluster, &clock);

    let groups = vec![
        plain_group("storage", OnFailure::Abort),
        pods_ready_group("database", "app=postgres", 5),
    ];
    let run = use_case.execute(&groups, &fast_options());

    assert_eq!(run.status, Some(RunStatus::Completed));
    assert_eq!(run.results.len(), 2);
    assert_eq!(
        run.outcome_of("storage"),
        Some(GroupOutcome::AppliedNoCheck)
    );
    // Timeout is warning-level: it never aborts, even under Abort.
    assert_eq!(
        run.outcome_of("database"),
        Some(GroupOutcome::AppliedTimeout)
    );
}

#[test]
fn rejected_apply_under_abort_halts_the_run() {
    let mut cluster = MockCluster::default();
    cluster.reject.insert("ConfigMap/broken-config".into());
    let clock = FakeClock::new();
    let use_case = DeployUseCase::new(&cluster, &clock);

    let groups = vec![
        plain_group("broken", OnFailure::Abort),
        plain_group("after", OnFailure::Abort),
    ];
    let run = use_case.execute(&groups, &fast_options());

    assert_eq!(run.status, Some(RunStatus::Aborted));
    assert_eq!(run.results.len(), 1);
    assert_eq!(run.outcome_of("broken"), Some(GroupOutcome::FailedApply));
    assert_eq!(run.outcome_of("after"), None);
    // Nothing of the later group ever reached the cluster.
    assert!(cluster.applied.borrow().is_empty());
}

#[test]
fn warn_and_continue_proceeds_past_a_failed_group() {
    let mut cluster = MockCluster::default();
    cluster.reject.insert("ConfigMap/optional-config".into());
    let clock = FakeClock::new();
    let use_case = DeployUseCase::new(&cluster, &clock);

    let groups = vec![
        plain_group("optional", OnFailure::WarnAndContinue),
        plain_group("core", OnFailure::Abort),
    ];
    let run = use_case.execute(&groups, &fast_options());

    assert_eq!(run.status, Some(RunStatus::Completed));
    assert_eq!(run.outcome_of("optional"), Some(GroupOutcome::FailedApply));
    assert_eq!(run.outcome_of("core"), Some(GroupOutcome::AppliedNoCheck));
}

#[test]
fn transport_errors_are_retried_to_success() {
    let cluster = MockCluster::default();
    cluster
        .flaky
        .borrow_mut()
        .insert("ConfigMap/core-config".into(), 2);
    let clock = FakeClock::new();
    let use_case = DeployUseCase::new(&cluster, &clock);

    let run = use_case.execute(&[plain_group("core", OnFailure::Abort)], &fast_options());

    assert_eq!(run.outcome_of("core"), Some(GroupOutcome::AppliedNoCheck));
    assert_eq!(cluster.applied.borrow().len(), 1);
}

#[test]
fn transport_errors_exhaust_into_failed_apply() {
    let cluster = MockCluster::default();
    cluster
        .flaky
        .borrow_mut()
        .insert("ConfigMap/core-config".into(), 10);
    let clock = FakeClock::new();
    let use_case = DeployUseCase::new(&cluster, &clock);

    let run = use_case.execute(&[plain_group("core", OnFailure::Abort)], &fast_options());

    assert_eq!(run.status, Some(RunStatus::Aborted));
    assert_eq!(run.outcome_of("core"), Some(GroupOutcome::FailedApply));
}

#[test]
fn apply_order_follows_input_order() {
    let cluster = MockCluster::default();
    let clock = FakeClock::new();
    let use_case = DeployUseCase::new(&cluster, &clock);

    let groups = vec![
        plain_group("storage", OnFailure::Abort),
        plain_group("database", OnFailure::Abort),
        plain_group("backend", OnFailure::Abort),
    ];
    use_case.execute(&groups, &fast_options());

    assert_eq!(
        *cluster.applied.borrow(),
        vec![
            "ConfigMap/storage-config".to_string(),
            "ConfigMap/database-config".to_string(),
            "ConfigMap/backend-config".to_string(),
        ]
    );
}

#[test]
fn reapplying_an_unchanged_plan_classifies_identically() {
    let mut cluster = MockCluster::default();
    cluster.ready_selectors.insert("app=postgres".into());
    let clock = FakeClock::new();
    let use_case = DeployUseCase::new(&cluster, &clock);

    let groups = vec![
        plain_group("storage", OnFailure::Abort),
        pods_ready_group("database", "app=postgres", 30),
    ];
    let first = use_case.execute(&groups, &fast_options());
    let second = use_case.execute(&groups, &fast_options());

    for group in ["storage", "database"] {
        assert_eq!(first.outcome_of(group), second.outcome_of(group));
    }
    assert_eq!(
        second.outcome_of("database"),
        Some(GroupOutcome::AppliedReady)
    );
}

#[test]
fn cancellation_mid_wait_omits_the_inflight_group() {
    let cancel = CancelToken::new();
    let mut cluster = MockCluster::default();
    cluster.cancel_on_poll = Some(cancel.clone());
    let clock = FakeClock::new();
    let use_case = DeployUseCase::new(&cluster, &clock);

    let groups = vec![
        plain_group("storage", OnFailure::Abort),
        pods_ready_group("database", "app=postgres", 600),
        plain_group("backend", OnFailure::Abort),
    ];
    let run = use_case.execute_with_events(
        &groups,
        &fast_options(),
        &crate::domain::ports::NoopEventSink,
        cancel,
    );

    assert_eq!(run.status, Some(RunStatus::Cancelled));
    // Only the fully-attempted group is recorded; the in-flight wait
    // produced no partial entry and the tail group was never started.
    assert_eq!(run.results.len(), 1);
    assert_eq!(run.outcome_of("storage"), Some(GroupOutcome::AppliedNoCheck));
    assert_eq!(run.outcome_of("database"), None);
    assert_eq!(run.outcome_of("backend"), None);
}

#[test]
fn cancellation_before_a_group_skips_its_apply() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let cluster = MockCluster::default();
    let clock = FakeClock::new();
    let use_case = DeployUseCase::new(&cluster, &clock);

    let run = use_case.execute_with_events(
        &[plain_group("storage", OnFailure::Abort)],
        &fast_options(),
        &crate::domain::ports::NoopEventSink,
        cancel,
    );

    assert_eq!(run.status, Some(RunStatus::Cancelled));
    assert!(run.results.is_empty());
    assert!(cluster.applied.borrow().is_empty());
}
