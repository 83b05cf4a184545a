//! End-to-end tests for the fincontrol binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fincontrol(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fincontrol").unwrap();
    cmd.env("FINCONTROL_CONFIG_DIR", config_dir.path())
        .env_remove("FINCONTROL_SEED")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn summary_shows_kpis() {
    let dir = TempDir::new().unwrap();
    fincontrol(&dir)
        .args(["summary", "--seed", "42", "--end-month", "2025-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Revenue"))
        .stdout(predicate::str::contains("January 2025 to December 2025"));
}

#[test]
fn scenario_flags_are_reported() {
    let dir = TempDir::new().unwrap();
    fincontrol(&dir)
        .args([
            "ratios",
            "--end-month",
            "2025-12",
            "--revenue-change",
            "10",
            "--expense-change",
            "-5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scenario: revenue +10.0%, expenses -5.0%"))
        .stdout(predicate::str::contains("Expense Ratio"));
}

#[test]
fn department_filter() {
    let dir = TempDir::new().unwrap();
    fincontrol(&dir)
        .args(["departments", "--end-month", "2025-12", "-d", "sales", "-d", "R&D"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sales"))
        .stdout(predicate::str::contains("R&D"))
        .stdout(predicate::str::contains("Marketing").not());
}

#[test]
fn unknown_department_fails() {
    let dir = TempDir::new().unwrap();
    fincontrol(&dir)
        .args(["departments", "--department", "legal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown department: legal"));
}

#[test]
fn dataset_export_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let args = ["export", "dataset", "--seed", "7", "--end-month", "2025-06"];

    let first = fincontrol(&dir).args(args).assert().success();
    let first = first.get_output().stdout.clone();
    let second = fincontrol(&dir).args(args).assert().success();

    assert_eq!(first, second.get_output().stdout);
    let text = String::from_utf8(first).unwrap();
    assert!(text.starts_with("month,revenue,expenses,profit,margin,department,department_share"));
    assert_eq!(text.lines().count(), 61);
}

#[test]
fn seed_from_environment() {
    let dir = TempDir::new().unwrap();
    let args = ["export", "periods", "--end-month", "2025-06"];

    let flag = fincontrol(&dir)
        .args(args)
        .args(["--seed", "11"])
        .assert()
        .success();
    let env = fincontrol(&dir)
        .env("FINCONTROL_SEED", "11")
        .args(args)
        .assert()
        .success();

    assert_eq!(flag.get_output().stdout, env.get_output().stdout);
}

#[test]
fn json_export_to_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("dataset.json");

    fincontrol(&dir)
        .args(["export", "json", "--pretty", "--end-month", "2025-12", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 12 periods"));

    let contents = std::fs::read_to_string(&output).unwrap();
    let imported = fincontrol::export::import_from_json(&contents).unwrap();
    assert_eq!(imported.periods.len(), 12);
}

#[test]
fn init_then_config() {
    let dir = TempDir::new().unwrap();

    fincontrol(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings written to"));
    assert!(dir.path().join("config.json").exists());

    fincontrol(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exist"));

    fincontrol(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized:      yes"))
        .stdout(predicate::str::contains("Default seed:     42"));
}

#[test]
fn margin_calendar_spans_years() {
    let dir = TempDir::new().unwrap();
    fincontrol(&dir)
        .args(["margin-calendar", "--end-month", "2025-03", "--window", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly Profit Margin"))
        .stdout(predicate::str::contains("2024"))
        .stdout(predicate::str::contains("2025"));

    let output = dir.path().join("margins.csv");
    fincontrol(&dir)
        .args(["heatmap", "--end-month", "2025-12", "--output"])
        .arg(&output)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("year,jan,feb"));
    assert_eq!(csv.lines().count(), 2);
}

#[test]
fn oversized_base_revenue_fails() {
    let dir = TempDir::new().unwrap();
    fincontrol(&dir)
        .args(["summary", "--base-revenue", "10000000000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Base revenue must be positive"));
}

#[test]
fn invalid_window_fails() {
    let dir = TempDir::new().unwrap();
    fincontrol(&dir)
        .args(["summary", "--window", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time window"));
}
