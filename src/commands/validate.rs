//! Validate command entry point

use std::path::Path;

use anyhow::Result;

use caravel::application::{CheckStatus, ValidateDepth, ValidateUseCase};
use caravel::ui::{views, OutputStyle};

pub fn cmd_validate(plan_path: &Path, depth: ValidateDepth, json: bool) -> Result<()> {
    let plan = super::load_plan(plan_path)?;
    let api = super::connect()?;
    let use_case = ValidateUseCase::new(&api, &plan.default_namespace);

    let style = OutputStyle::detect();
    if !json {
        print!(
            "{}",
            views::header(
                "Caravel Validate",
                &[
                    ("Plan", plan_path.display().to_string()),
                    ("Namespace", plan.default_namespace.clone()),
                ],
                style,
            )
        );
    }

    let report = use_case.execute_with_callback(&plan.groups, depth, |item| {
        if json {
            let status = match item.status {
                CheckStatus::Pass => "pass",
                CheckStatus::Warning => "warning",
                CheckStatus::Fail => "fail",
            };
            let value = serde_json::json!({
                "event": "check",
                "group": item.group,
                "name": item.name,
                "status": status,
                "message": item.message,
            });
            println!("{value}");
        } else {
            println!("{}", views::check_line(item, style));
        }
    });

    if json {
        let value = serde_json::json!({
            "event": "summary",
            "passed": report.passed,
            "warnings": report.warnings,
            "failures": report.failures,
            "success": report.is_success(),
        });
        println!("{value}");
    } else {
        println!("{}", views::validation_summary(&report, style));
    }

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
