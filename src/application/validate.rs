//! Validate Use Case
//!
//! Read-only health checks against the live cluster: probe each
//! group's readiness predicate once, and in report depth also verify
//! that every manifest resource exists. Nothing is applied.

use crate::domain::entities::ResourceGroup;
use crate::domain::ports::ClusterApi;
use crate::domain::services::ReadinessEvaluator;
use crate::domain::value_objects::{CancelToken, ProbeStatus};
use crate::domain::ports::{Clock, SystemClock};

/// How deep the validation goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidateDepth {
    /// Readiness predicates only
    #[default]
    Quick,
    /// Predicates plus per-resource existence
    Report,
}

/// Severity of a single validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

/// One validation finding
#[derive(Debug, Clone)]
pub struct CheckItem {
    /// Group the finding belongs to
    pub group: String,
    /// What was checked, e.g. "pods ready (app=db) in demo"
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
}

/// Result of one validation pass
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub items: Vec<CheckItem>,
    pub passed: usize,
    pub warnings: usize,
    pub failures: usize,
}

impl ValidationReport {
    pub fn is_success(&self) -> bool {
        self.failures == 0
    }

    fn push(&mut self, item: CheckItem) {
        match item.status {
            CheckStatus::Pass => self.passed += 1,
            CheckStatus::Warning => self.warnings += 1,
            CheckStatus::Fail => self.failures += 1,
        }
        self.items.push(item);
    }
}

/// Validate use case
pub struct ValidateUseCase<'a> {
    api: &'a dyn ClusterApi,
    default_namespace: String,
}

impl<'a> ValidateUseCase<'a> {
    pub fn new(api: &'a dyn ClusterApi, default_namespace: impl Into<String>) -> Self {
        Self {
            api,
            default_namespace: default_namespace.into(),
        }
    }

    pub fn execute(&self, groups: &[ResourceGroup], depth: ValidateDepth) -> ValidationReport {
        self.execute_with_callback(groups, depth, |_| {})
    }

    /// Execute, invoking `on_item` as each finding lands (streamed UI).
    pub fn execute_with_callback(
        &self,
        groups: &[ResourceGroup],
        depth: ValidateDepth,
        mut on_item: impl FnMut(&CheckItem),
    ) -> ValidationReport {
        let clock = SystemClock;
        let mut report = ValidationReport::default();

        for group in groups {
            if depth == ValidateDepth::Report {
                for manifest in &group.resources {
                    let item = self.existence_item(group, manifest);
                    on_item(&item);
                    report.push(item);
                }
            }

            if let Some(predicate) = &group.readiness {
                let item = self.predicate_item(group, &clock, predicate);
                on_item(&item);
                report.push(item);
            }
        }

        report
    }

    fn existence_item(
        &self,
        group: &ResourceGroup,
        manifest: &crate::domain::entities::Manifest,
    ) -> CheckItem {
        let (status, message) = match self.api.exists(manifest, &self.default_namespace) {
            Ok(true) => (CheckStatus::Pass, "present".to_string()),
            Ok(false) => (CheckStatus::Fail, "not found on cluster".to_string()),
            Err(e) => (CheckStatus::Warning, format!("unreachable: {e}")),
        };
        CheckItem {
            group: group.name.clone(),
            name: manifest.id(),
            status,
            message,
        }
    }

    fn predicate_item(
        &self,
        group: &ResourceGroup,
        clock: &dyn Clock,
        predicate: &crate::domain::value_objects::ReadinessPredicate,
    ) -> CheckItem {
        // Single-shot probe: validation never waits.
        let evaluator = ReadinessEvaluator::new(
            self.api,
            clock,
            crate::domain::services::DEFAULT_POLL_INTERVAL,
            CancelToken::new(),
        );
        let (status, message) = match evaluator.probe(&predicate.check) {
            ProbeStatus::Satisfied => (CheckStatus::Pass, "ready".to_string()),
            ProbeStatus::Pending { detail } => (CheckStatus::Warning, detail),
            ProbeStatus::Missing { detail } => (CheckStatus::Fail, detail),
            ProbeStatus::Failed { detail } => (CheckStatus::Fail, detail),
            ProbeStatus::Unreachable { detail } => (CheckStatus::Warning, detail),
        };
        CheckItem {
            group: group.name.clone(),
            name: predicate.check.to_string(),
            status,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::resource_group::OnFailure;
    use crate::domain::entities::Manifest;
    use crate::domain::ports::{
        ClusterError, DeploymentState, JobState, PodState, PvcPhase,
    };
    use crate::domain::value_objects::{LabelSelector, ReadinessCheck, ReadinessPredicate};
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::time::Duration;

    #[derive(Default)]
    struct ReadOnlyCluster {
        missing: HashSet<String>,
        failed_jobs: HashSet<String>,
    }

    impl ClusterApi for ReadOnlyCluster {
        fn apply(&self, _m: &Manifest, _ns: &str) -> Result<(), ClusterError> {
            panic!("validate must never apply");
        }

        fn pods_matching(
            &self,
            _s: &LabelSelector,
            _ns: &str,
        ) -> Result<Vec<PodState>, ClusterError> {
            Ok(vec![PodState {
                name: "web-0".into(),
                running: true,
                containers_ready: true,
            }])
        }

        fn deployment_state(
            &self,
            _n: &str,
            _ns: &str,
        ) -> Result<Option<DeploymentState>, ClusterError> {
            Ok(None)
        }

        fn job_state(&self, name: &str, _ns: &str) -> Result<Option<JobState>, ClusterError> {
            if self.failed_jobs.contains(name) {
                Ok(Some(JobState {
                    complete: false,
                    failed: true,
                    failure_message: None,
                }))
            } else {
                Ok(None)
            }
        }

        fn pvc_phase(&self, _n: &str, _ns: &str) -> Result<Option<PvcPhase>, ClusterError> {
            Ok(Some(PvcPhase::Bound))
        }

        fn exists(&self, m: &Manifest, _ns: &str) -> Result<bool, ClusterError> {
            Ok(!self.missing.contains(&m.id()))
        }

        fn delete(&self, _m: &Manifest, _ns: &str) -> Result<bool, ClusterError> {
            panic!("validate must never delete");
        }
    }

    fn manifest(kind: &str, name: &str) -> Manifest {
        let yaml = format!("apiVersion: v1\nkind: {kind}\nmetadata:\n  name: {name}\n");
        Manifest::parse_all(&yaml, &PathBuf::from("t.yaml"))
            .unwrap()
            .remove(0)
    }

    fn web_group() -> ResourceGroup {
        ResourceGroup::new(
            "web",
            vec![manifest("Service", "web"), manifest("ConfigMap", "web-config")],
            Some(ReadinessPredicate::new(
                ReadinessCheck::PodsReady {
                    selector: LabelSelector::parse("app=web").unwrap(),
                    namespace: "demo".into(),
                },
                Duration::from_secs(30),
            )),
            OnFailure::Abort,
        )
        .unwrap()
    }

    #[test]
    fn quick_depth_probes_predicates_only() {
        let cluster = ReadOnlyCluster::default();
        let use_case = ValidateUseCase::new(&cluster, "demo");

        let report = use_case.execute(&[web_group()], ValidateDepth::Quick);
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.passed, 1);
        assert!(report.is_success());
    }

    #[test]
    fn report_depth_adds_existence_checks() {
        let mut cluster = ReadOnlyCluster::default();
        cluster.missing.insert("ConfigMap/web-config".into());
        let use_case = ValidateUseCase::new(&cluster, "demo");

        let report = use_case.execute(&[web_group()], ValidateDepth::Report);
        assert_eq!(report.items.len(), 3);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failures, 1);
        assert!(!report.is_success());
    }

    #[test]
    fn failed_job_is_fail_severity() {
        let mut cluster = ReadOnlyCluster::default();
        cluster.failed_jobs.insert("migrate".into());
        let use_case = ValidateUseCase::new(&cluster, "demo");

        let group = ResourceGroup::new(
            "migrations",
            vec![manifest("Job", "migrate")],
            Some(ReadinessPredicate::new(
                ReadinessCheck::JobComplete {
                    name: "migrate".into(),
                    namespace: "demo".into(),
                },
                Duration::from_secs(30),
            )),
            OnFailure::Abort,
        )
        .unwrap();

        let report = use_case.execute(&[group], ValidateDepth::Quick);
        assert_eq!(report.failures, 1);
    }
}
