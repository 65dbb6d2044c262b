//! Deploy command entry point

use std::path::Path;

use anyhow::Result;

use caravel::application::{DeployOptions, DeployUseCase};
use caravel::config::Plan;
use caravel::domain::entities::resource_group::OnFailure;
use caravel::domain::ports::{SequenceEvent, SequenceEventSink, SystemClock};
use caravel::domain::value_objects::CancelToken;
use caravel::ui::{views, Icon, JsonEventSink, OutputStyle};

pub fn cmd_deploy(plan_path: &Path, dry_run: bool, json: bool, verbose: u8) -> Result<()> {
    let plan = super::load_plan(plan_path)?;
    let style = if json {
        OutputStyle::plain()
    } else {
        OutputStyle::detect()
    };

    if dry_run {
        render_plan(&plan, plan_path, json, style);
        return Ok(());
    }

    if !json {
        print!(
            "{}",
            views::header(
                "Caravel Deploy",
                &[
                    ("Plan", plan_path.display().to_string()),
                    ("Groups", plan.groups.len().to_string()),
                    ("Namespace", plan.default_namespace.clone()),
                ],
                style,
            )
        );
    }

    let api = super::connect()?;
    let clock = SystemClock;

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!("\ninterrupt received, stopping after the current poll");
        handler_token.cancel();
    })
    .expect("Error setting Ctrl+C handler");

    let options = DeployOptions {
        default_namespace: plan.default_namespace.clone(),
        poll_interval: plan.poll_interval,
        ..DeployOptions::default()
    };

    let use_case = DeployUseCase::new(&api, &clock);
    let run = if json {
        use_case.execute_with_events(&plan.groups, &options, &JsonEventSink, cancel)
    } else {
        let sink = ConsoleEventSink { style, verbose };
        use_case.execute_with_events(&plan.groups, &options, &sink, cancel)
    };

    if json {
        println!("{}", serde_json::to_string(&run)?);
    } else {
        println!("{}", views::run_summary(&run, plan.groups.len(), style));
    }

    if run.exit_failure() {
        std::process::exit(1);
    }
    Ok(())
}

fn policy_label(policy: OnFailure) -> &'static str {
    match policy {
        OnFailure::Abort => "abort",
        OnFailure::WarnAndContinue => "warn-and-continue",
    }
}

/// Dry run: show the sequence the plan would execute, apply nothing.
fn render_plan(plan: &Plan, plan_path: &Path, json: bool, style: OutputStyle) {
    if json {
        for (index, group) in plan.groups.iter().enumerate() {
            let value = serde_json::json!({
                "event": "plan-group",
                "position": index + 1,
                "group": group.name,
                "resources": group.resources.len(),
                "on_failure": policy_label(group.on_failure),
                "check": group.readiness.as_ref().map(|p| p.check.to_string()),
                "timeout_seconds": group.readiness.as_ref().map(|p| p.timeout.as_secs()),
            });
            println!("{value}");
        }
        return;
    }

    print!(
        "{}",
        views::header(
            "Caravel Deploy (dry run)",
            &[
                ("Plan", plan_path.display().to_string()),
                ("Namespace", plan.default_namespace.clone()),
            ],
            style,
        )
    );
    for (index, group) in plan.groups.iter().enumerate() {
        println!(
            "{} {}. {} ({} resources) [{}]",
            Icon::Arrow.colored(style),
            index + 1,
            group.name,
            group.resources.len(),
            policy_label(group.on_failure),
        );
        if let Some(predicate) = &group.readiness {
            println!(
                "     readiness: {} (up to {}s)",
                predicate.check,
                predicate.timeout.as_secs(),
            );
        }
    }
    println!("\nnothing applied");
}

/// Renders sequencer progress as it happens.
struct ConsoleEventSink {
    style: OutputStyle,
    verbose: u8,
}

impl SequenceEventSink for ConsoleEventSink {
    fn on_event(&self, event: &SequenceEvent) {
        match event {
            SequenceEvent::Started { .. } | SequenceEvent::Finished { .. } => {}
            SequenceEvent::GroupStarted {
                group,
                resource_count,
            } => {
                println!(
                    "\n{} {group} ({resource_count} resources)",
                    Icon::Arrow.colored(self.style),
                );
            }
            SequenceEvent::ResourceApplied { resource, .. } => {
                if self.verbose > 0 {
                    println!("    applied {resource}");
                }
            }
            SequenceEvent::ApplyRetry {
                resource,
                attempt,
                error,
                ..
            } => {
                println!(
                    "    {} retrying {resource} (attempt {attempt}): {error}",
                    Icon::Warning.colored(self.style),
                );
            }
            SequenceEvent::Waiting { check, timeout, .. } => {
                println!("    waiting for {check} (up to {}s)", timeout.as_secs());
            }
            SequenceEvent::GroupFinished {
                group,
                outcome,
                elapsed,
                detail,
            } => {
                println!(
                    "{}",
                    views::group_line(
                        group,
                        *outcome,
                        Some(*elapsed),
                        detail.as_deref(),
                        self.style,
                    )
                );
            }
        }
    }
}
