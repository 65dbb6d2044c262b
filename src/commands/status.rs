//! Status command entry point

use std::path::Path;

use anyhow::Result;

use caravel::application::StatusUseCase;
use caravel::domain::value_objects::ProbeStatus;
use caravel::ui::{views, OutputStyle};

pub fn cmd_status(plan_path: &Path, json: bool) -> Result<()> {
    let plan = super::load_plan(plan_path)?;
    let api = super::connect()?;

    let statuses = StatusUseCase::new(&api, &plan.default_namespace).execute(&plan.groups);

    if json {
        for status in &statuses {
            let value = serde_json::json!({
                "event": "group-status",
                "group": status.group,
                "resources_total": status.resources_total,
                "resources_present": status.resources_present,
                "readiness": status.readiness.as_ref().map(probe_value),
            });
            println!("{value}");
        }
        return Ok(());
    }

    let style = OutputStyle::detect();
    print!(
        "{}",
        views::header(
            "Caravel Status",
            &[
                ("Plan", plan_path.display().to_string()),
                ("Namespace", plan.default_namespace.clone()),
            ],
            style,
        )
    );
    for status in &statuses {
        println!("{}", views::status_line(status, style));
    }
    Ok(())
}

fn probe_value(probe: &ProbeStatus) -> serde_json::Value {
    let (state, detail) = match probe {
        ProbeStatus::Satisfied => ("satisfied", None),
        ProbeStatus::Pending { detail } => ("pending", Some(detail.as_str())),
        ProbeStatus::Missing { detail } => ("missing", Some(detail.as_str())),
        ProbeStatus::Failed { detail } => ("failed", Some(detail.as_str())),
        ProbeStatus::Unreachable { detail } => ("unreachable", Some(detail.as_str())),
    };
    serde_json::json!({ "state": state, "detail": detail })
}
