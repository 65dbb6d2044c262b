//! Terminal views
//!
//! Rendering for the deploy, status, validate and cleanup commands.
//! Every function returns a string so views stay testable without
//! capturing stdout.

use std::time::Duration;

use crate::application::{CheckItem, CheckStatus, CleanupResult, GroupStatus, ValidationReport};
use crate::domain::entities::{GroupOutcome, RunStatus, SequenceRun};
use crate::domain::value_objects::ProbeStatus;

use super::output::{paint, Icon, OutputStyle, SemanticColor};

/// Command banner with a short field list underneath.
pub fn header(title: &str, fields: &[(&str, String)], style: OutputStyle) -> String {
    let mut out = String::new();
    out.push_str(&paint(title, SemanticColor::Dim, style));
    out.push('\n');
    for (label, value) in fields {
        out.push_str(&format!("  {label}: {value}\n"));
    }
    out
}

fn outcome_parts(outcome: GroupOutcome) -> (Icon, &'static str) {
    match outcome {
        GroupOutcome::AppliedReady => (Icon::Success, "ready"),
        GroupOutcome::AppliedNoCheck => (Icon::Success, "applied"),
        GroupOutcome::AppliedTimeout => (Icon::Warning, "not ready in time"),
        GroupOutcome::FailedApply => (Icon::Error, "apply failed"),
        GroupOutcome::PredicateFailed => (Icon::Error, "readiness failed"),
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 60 {
        format!("{}m{:02}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}

/// One line per finished group: icon, name, outcome, timing, detail.
pub fn group_line(
    group: &str,
    outcome: GroupOutcome,
    elapsed: Option<Duration>,
    detail: Option<&str>,
    style: OutputStyle,
) -> String {
    let (icon, label) = outcome_parts(outcome);
    let mut line = format!("{} {group}: {label}", icon.colored(style));
    if let Some(elapsed) = elapsed {
        line.push_str(&paint(
            &format!(" ({})", format_elapsed(elapsed)),
            SemanticColor::Dim,
            style,
        ));
    }
    if let Some(detail) = detail {
        line.push_str(&format!(" - {detail}"));
    }
    line
}

/// Closing summary for a deploy run.
pub fn run_summary(run: &SequenceRun, total_groups: usize, style: OutputStyle) -> String {
    let ready = run.count_where(|o| {
        matches!(o, GroupOutcome::AppliedReady | GroupOutcome::AppliedNoCheck)
    });
    let warned = run.count_where(|o| o.is_warning());
    let failed = run.count_where(|o| o.is_failure());
    let skipped = total_groups.saturating_sub(run.results.len());

    let mut parts = vec![format!("{ready} ok")];
    if warned > 0 {
        parts.push(paint(&format!("{warned} warned"), SemanticColor::Warning, style));
    }
    if failed > 0 {
        parts.push(paint(&format!("{failed} failed"), SemanticColor::Error, style));
    }
    if skipped > 0 {
        parts.push(paint(&format!("{skipped} skipped"), SemanticColor::Dim, style));
    }

    let verdict = match run.status {
        Some(RunStatus::Completed) if run.is_success() => {
            paint("deploy complete", SemanticColor::Success, style)
        }
        Some(RunStatus::Completed) => {
            paint("deploy complete with failures", SemanticColor::Warning, style)
        }
        Some(RunStatus::Aborted) => paint("deploy aborted", SemanticColor::Error, style),
        Some(RunStatus::Cancelled) => paint("deploy cancelled", SemanticColor::Warning, style),
        None => "deploy in progress".to_string(),
    };

    format!("\n{verdict}: {}", parts.join(", "))
}

fn probe_parts(probe: &ProbeStatus) -> (Icon, String) {
    match probe {
        ProbeStatus::Satisfied => (Icon::Success, "ready".to_string()),
        ProbeStatus::Pending { detail } => (Icon::Pending, detail.clone()),
        ProbeStatus::Missing { detail } => (Icon::Error, detail.clone()),
        ProbeStatus::Failed { detail } => (Icon::Error, detail.clone()),
        ProbeStatus::Unreachable { detail } => (Icon::Warning, detail.clone()),
    }
}

/// One line per group for the status command.
pub fn status_line(status: &GroupStatus, style: OutputStyle) -> String {
    let presence_icon = if status.all_present() {
        Icon::Success
    } else if status.resources_present == 0 {
        Icon::Error
    } else {
        Icon::Warning
    };
    let mut line = format!(
        "{} {}: {}/{} resources present",
        presence_icon.colored(style),
        status.group,
        status.resources_present,
        status.resources_total,
    );
    if let Some(probe) = &status.readiness {
        let (icon, detail) = probe_parts(probe);
        line.push_str(&format!("  {} {detail}", icon.colored(style)));
    }
    line
}

fn check_icon(status: CheckStatus) -> Icon {
    match status {
        CheckStatus::Pass => Icon::Success,
        CheckStatus::Warning => Icon::Warning,
        CheckStatus::Fail => Icon::Error,
    }
}

/// One line per validation finding.
pub fn check_line(item: &CheckItem, style: OutputStyle) -> String {
    format!(
        "{} [{}] {}: {}",
        check_icon(item.status).colored(style),
        item.group,
        item.name,
        item.message,
    )
}

/// Closing summary for a validation pass.
pub fn validation_summary(report: &ValidationReport, style: OutputStyle) -> String {
    let verdict = if report.is_success() {
        paint("validation passed", SemanticColor::Success, style)
    } else {
        paint("validation failed", SemanticColor::Error, style)
    };
    format!(
        "\n{verdict}: {} passed, {} warnings, {} failures",
        report.passed, report.warnings, report.failures,
    )
}

/// Closing summary for a cleanup pass.
pub fn cleanup_summary(result: &CleanupResult, style: OutputStyle) -> String {
    let verdict = if result.is_success() {
        paint("cleanup complete", SemanticColor::Success, style)
    } else {
        paint("cleanup finished with errors", SemanticColor::Error, style)
    };
    format!(
        "{verdict}: {} deleted, {} already absent, {} errors",
        result.deleted.len(),
        result.absent.len(),
        result.errors.len(),
    )
}
