//! Cleanup command entry point

use std::path::Path;

use anyhow::Result;
use dialoguer::Confirm;

use caravel::application::CleanupUseCase;
use caravel::ui::{views, Icon, OutputStyle};

pub fn cmd_cleanup(plan_path: &Path, yes: bool, json: bool) -> Result<()> {
    let plan = super::load_plan(plan_path)?;
    let resource_count: usize = plan.groups.iter().map(|g| g.resources.len()).sum();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete {resource_count} resources across {} groups?",
                plan.groups.len()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("cleanup cancelled");
            return Ok(());
        }
    }

    let api = super::connect()?;
    let result = CleanupUseCase::new(&api, &plan.default_namespace).execute(&plan.groups);

    if json {
        let value = serde_json::json!({
            "event": "cleanup",
            "deleted": result.deleted,
            "absent": result.absent,
            "errors": result.errors,
            "success": result.is_success(),
        });
        println!("{value}");
    } else {
        let style = OutputStyle::detect();
        for id in &result.deleted {
            println!("{} deleted {id}", Icon::Success.colored(style));
        }
        for id in &result.absent {
            println!("{} already absent {id}", Icon::Pending.colored(style));
        }
        for error in &result.errors {
            println!("{} {error}", Icon::Error.colored(style));
        }
        println!("{}", views::cleanup_summary(&result, style));
    }

    if !result.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
