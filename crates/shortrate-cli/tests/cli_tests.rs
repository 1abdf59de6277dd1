//! Command-line tests running the `shortrate` binary on scenario files.

use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn scenario(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

fn shortrate() -> Command {
    Command::cargo_bin("shortrate").unwrap()
}

fn write_scenario(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const FLAT_CURVE: &str = r#"
[model]
sigma = 0.01
mean_reversion = 0.1
num_time_steps = 50

[curve]
times = [0.0, 10.0]
zero_rates = [0.05, 0.05]
"#;

#[test]
fn test_tree_json_reports_geometry() {
    let output = shortrate()
        .args(["--format", "json", "tree", "--config"])
        .arg(scenario("hull_zero_bond.toml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["steps"], 490);
    assert!(summary["jmax"].as_u64().unwrap() > 0);
    assert!(summary["curve_reproduction_error"].as_f64().unwrap() < 1e-10);
    assert_eq!(summary["columns"].as_array().unwrap().len(), 491);
}

#[test]
fn test_zcb_option_tree_close_to_analytic() {
    let output = shortrate()
        .args(["--format", "json", "zcb-option", "--config"])
        .arg(scenario("hull_zero_bond.toml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let analytic = rows[0]["put"].as_f64().unwrap();
    let tree = rows[1]["put"].as_f64().unwrap();
    assert_eq!(rows[0]["method"], "analytic");
    assert!((analytic - tree).abs() < 0.01);
}

#[test]
fn test_bond_option_table_lists_every_method() {
    shortrate()
        .args(["bond-option", "--steps", "100", "--config"])
        .arg(scenario("bond_option.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("jamshidian"))
        .stdout(predicate::str::contains("tree, american"))
        .stdout(predicate::str::contains("tree, expiry column"));
}

#[test]
fn test_callable_csv() {
    shortrate()
        .args(["--format", "csv", "callable", "--steps", "200", "--config"])
        .arg(scenario("callable_bond.toml"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("instrument,value"))
        .stdout(predicate::str::contains("straight"));
}

#[test]
fn test_converge_sweep() {
    let output = shortrate()
        .args(["--format", "json", "converge", "--sweep", "100,500", "--config"])
        .arg(scenario("hull_zero_bond.toml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["steps"], 100);
    assert_eq!(rows[1]["steps"], 500);
}

#[test]
fn test_missing_section_fails() {
    let file = write_scenario(FLAT_CURVE);

    shortrate()
        .args(["zcb-option", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("zero_bond_option"));
}

#[test]
fn test_malformed_curve_fails() {
    let file = write_scenario(&FLAT_CURVE.replace(
        "zero_rates = [0.05, 0.05]",
        "discount_factors = [1.0, 1.2]",
    ));

    shortrate()
        .args(["tree", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Curve error"));
}

#[test]
fn test_tree_horizon_override() {
    let file = write_scenario(FLAT_CURVE);

    let output = shortrate()
        .args(["--format", "json", "tree", "--horizon", "2.5", "--config"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!((summary["horizon"].as_f64().unwrap() - 2.5).abs() < 1e-12);
    assert!((summary["dt"].as_f64().unwrap() - 0.05).abs() < 1e-12);
}

#[test]
fn test_verbose_logs_curve_extrapolation() {
    let file = write_scenario(FLAT_CURVE);

    shortrate()
        .env_remove("RUST_LOG")
        .args(["--verbose", "--format", "json", "tree", "--horizon", "12", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("extrapolating discount curve"));
}
