//! CLI smoke tests against the built binary. Nothing here touches a
//! cluster: dry runs and plan errors resolve before any connection.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_caravel")
}

#[test]
fn help_lists_every_command() {
    let output = Command::new(bin()).arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["deploy", "status", "validate", "cleanup"] {
        assert!(stdout.contains(command), "help should mention '{command}'; got:\n{stdout}");
    }
}

#[test]
fn deploy_dry_run_prints_the_sequence_without_a_cluster() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("db.yaml"),
        "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: postgres\n",
    )
    .unwrap();
    let plan = dir.path().join("caravel.toml");
    fs::write(
        &plan,
        r#"
[[group]]
name = "database"
manifests = ["db.yaml"]

  [group.readiness]
  kind = "deployment-rolled-out"
  name = "postgres"
"#,
    )
    .unwrap();

    let output = Command::new(bin())
        .args(["deploy", "--dry-run", "--plan"])
        .arg(&plan)
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("database"), "{stdout}");
    assert!(stdout.contains("nothing applied"), "{stdout}");
}

#[test]
fn deploy_dry_run_json_emits_one_line_per_group() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("svc.yaml"),
        "apiVersion: v1\nkind: Service\nmetadata:\n  name: web\n",
    )
    .unwrap();
    let plan = dir.path().join("caravel.toml");
    fs::write(
        &plan,
        r#"
[[group]]
name = "web"
manifests = ["svc.yaml"]
"#,
    )
    .unwrap();

    let output = Command::new(bin())
        .args(["deploy", "--dry-run", "--json", "--plan"])
        .arg(&plan)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().next().expect("one NDJSON line");
    let value: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(value["event"], "plan-group");
    assert_eq!(value["group"], "web");
    assert_eq!(value["resources"], 1);
}

#[test]
fn missing_plan_file_fails_before_connecting() {
    let output = Command::new(bin())
        .args(["deploy", "--dry-run", "--plan", "/nonexistent/caravel.toml"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("caravel.toml"), "{stderr}");
}

#[test]
fn invalid_plan_reports_the_broken_group() {
    let dir = TempDir::new().unwrap();
    let plan = dir.path().join("caravel.toml");
    fs::write(
        &plan,
        r#"
[[group]]
name = "empty"
manifests = []
"#,
    )
    .unwrap();

    let output = Command::new(bin())
        .args(["deploy", "--dry-run", "--plan"])
        .arg(&plan)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("empty"), "{stderr}");
}
