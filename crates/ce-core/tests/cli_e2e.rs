//! CLI E2E tests for the `commute` binary.
//!
//! Validates:
//! - `estimate` reproduces the reference trip in text and JSON
//! - zone-average toggles and the unknown-route sentinel
//! - `zones`, `table` and `export` outputs
//! - missing data files exit 11 without crashing
//! - config resolution errors exit 10

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::time::Duration;
use tempfile::{tempdir, TempDir};

// ============================================================================
// Helpers
// ============================================================================

/// Command isolated from any user config.
fn commute(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("commute");
    cmd.timeout(Duration::from_secs(60))
        .env_remove("COMMUTE_CONFIG")
        .env_remove("COMMUTE_LOG")
        .env("XDG_CONFIG_HOME", home.path());
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("parse JSON")
}

// ============================================================================
// estimate
// ============================================================================

#[test]
fn estimate_reference_trip_text() {
    let home = tempdir().expect("tempdir");
    commute(&home)
        .args(["estimate", "--distance", "10", "--signals", "14", "--quality", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("84 min"))
        .stdout(predicate::str::contains("0.42 L"))
        .stdout(predicate::str::contains("₹43"))
        .stdout(predicate::str::contains("Manual Estimate: ~11 potholes."));
}

#[test]
fn estimate_defaults_match_reference_trip() {
    let home = tempdir().expect("tempdir");
    let json = json_output(commute(&home).args(["--format", "json", "estimate"]));
    assert_eq!(json["status"], "ok");
    assert_eq!(json["schema_version"], "1.0.0");
    assert_eq!(json["view"]["estimate"]["estimated_potholes"], 11);
    assert_eq!(json["display"]["predicted_time"], "84 min");
    let time = json["view"]["estimate"]["predicted_time_min"]
        .as_f64()
        .expect("time");
    assert!((time - 84.438).abs() < 1e-9);
}

#[test]
fn estimate_short_smooth_trip() {
    let home = tempdir().expect("tempdir");
    commute(&home)
        .args(["estimate", "-d", "1", "--signals", "0", "--quality", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("14 min"));
}

#[test]
fn estimate_with_zone_averages() {
    let home = tempdir().expect("tempdir");
    let json = json_output(commute(&home).args([
        "--format",
        "json",
        "estimate",
        "--unknown-route",
        "--zone-signals",
        "--zone-quality",
    ]));
    assert_eq!(json["view"]["signals_from_average"], true);
    assert_eq!(json["view"]["quality_from_average"], true);
    assert_eq!(json["view"]["zone_averages"]["basis"], "whole_table");
    assert_eq!(json["view"]["zone_averages"]["samples"], 50);
    assert!(json["display"]["caption"]
        .as_str()
        .expect("caption")
        .starts_with("Auto Estimate"));
}

#[test]
fn zone_named_other_is_not_the_unknown_route() {
    let home = tempdir().expect("tempdir");
    let data = home.path().join("routes.csv");
    std::fs::write(
        &data,
        "Zone,Distance_km,Time_min,Signals,Potholes\nOther,10,40,2,0\nHebbal,10,40,30,20\n",
    )
    .expect("write csv");
    let json = json_output(commute(&home).args([
        "--data",
        data.to_str().expect("utf8 path"),
        "--format",
        "json",
        "estimate",
        "--zone",
        "Other",
        "--zone-signals",
    ]));
    assert_eq!(json["view"]["zone_averages"]["basis"], "zone");
    assert_eq!(json["view"]["zone_averages"]["samples"], 1);
    assert_eq!(json["view"]["zone_averages"]["signals"], 2);
}

#[test]
fn estimate_rejects_zone_with_unknown_route() {
    let home = tempdir().expect("tempdir");
    commute(&home)
        .args(["estimate", "--zone", "Hebbal", "--unknown-route"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn estimate_rejects_conflicting_signal_flags() {
    let home = tempdir().expect("tempdir");
    commute(&home)
        .args(["estimate", "--signals", "3", "--zone-signals"])
        .assert()
        .failure()
        .code(2);
}

// ============================================================================
// zones / table / export
// ============================================================================

#[test]
fn zones_charts_are_ascending() {
    let home = tempdir().expect("tempdir");
    let json = json_output(commute(&home).args(["--format", "json", "zones"]));
    for key in ["signals_by_zone", "road_quality_by_zone"] {
        let means: Vec<f64> = json[key]
            .as_array()
            .expect("array")
            .iter()
            .map(|b| b["mean"].as_f64().expect("mean"))
            .collect();
        assert!(!means.is_empty());
        assert!(means.windows(2).all(|w| w[0] <= w[1]), "{key} not sorted");
    }
    let zones = json["zones"].as_array().expect("zones");
    assert_eq!(zones.last().expect("sentinel"), "Other / Unknown Route");
}

#[test]
fn table_json_has_fifty_rows() {
    let home = tempdir().expect("tempdir");
    let json = json_output(commute(&home).args(["--format", "json", "table"]));
    let rows = json["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 50);
    assert!(rows[0].get("Road_Quality").is_some());
}

#[test]
fn export_then_load_round_trips() {
    let home = tempdir().expect("tempdir");
    let out = home.path().join("routes.csv");
    commute(&home)
        .args(["export", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 50 rows"));

    let from_file = json_output(
        commute(&home)
            .args(["--format", "json", "--data"])
            .arg(&out)
            .arg("table"),
    );
    let generated = json_output(commute(&home).args(["--format", "json", "table"]));
    assert_eq!(from_file["rows"], generated["rows"]);
}

#[test]
fn seed_changes_table() {
    let home = tempdir().expect("tempdir");
    let a = json_output(commute(&home).args(["--format", "json", "table"]));
    let b = json_output(commute(&home).args(["--format", "json", "--seed", "7", "table"]));
    assert_ne!(a["rows"], b["rows"]);
}

// ============================================================================
// Degraded states
// ============================================================================

#[test]
fn missing_data_file_exits_11() {
    let home = tempdir().expect("tempdir");
    commute(&home)
        .args(["--data"])
        .arg(home.path().join("nope.csv"))
        .arg("estimate")
        .assert()
        .failure()
        .code(11)
        .stderr(predicate::str::contains("nope.csv"));
}

#[test]
fn missing_data_file_json_reports_unavailable() {
    let home = tempdir().expect("tempdir");
    let output = commute(&home)
        .args(["--format", "json", "--data"])
        .arg(home.path().join("nope.csv"))
        .arg("zones")
        .assert()
        .code(11)
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).expect("parse JSON");
    assert_eq!(json["status"], "unavailable");
}

#[test]
fn malformed_data_file_exits_11() {
    let home = tempdir().expect("tempdir");
    let path = home.path().join("bad.csv");
    fs::write(&path, "Zone,Distance_km,Time_min,Signals,Potholes\nHebbal,far,1,2,3\n")
        .expect("write");
    commute(&home)
        .args(["--data"])
        .arg(&path)
        .arg("table")
        .assert()
        .code(11);
}

#[test]
fn missing_config_file_exits_10() {
    let home = tempdir().expect("tempdir");
    commute(&home)
        .args(["--config"])
        .arg(home.path().join("absent.json"))
        .args(["config", "validate"])
        .assert()
        .code(10);
}

#[test]
fn invalid_config_exits_10_with_json_error() {
    let home = tempdir().expect("tempdir");
    let path = home.path().join("config.json");
    fs::write(&path, r#"{"estimator": {"per_signal": 0}}"#).expect("write");
    let output = commute(&home)
        .args(["--format", "json", "--config"])
        .arg(&path)
        .arg("estimate")
        .assert()
        .code(10)
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).expect("parse JSON");
    assert_eq!(json["status"], "error");
    assert!(json["message"]
        .as_str()
        .expect("message")
        .contains("estimator.per_signal"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn config_show_reports_defaults() {
    let home = tempdir().expect("tempdir");
    let json = json_output(commute(&home).args(["--format", "json", "config", "show"]));
    assert_eq!(json["using_defaults"], true);
    assert_eq!(json["config"]["estimator"]["per_km"], 4.18);
    assert_eq!(json["config"]["data"]["kind"], "synthetic");
}

#[test]
fn config_file_changes_fuel_price() {
    let home = tempdir().expect("tempdir");
    let path = home.path().join("config.json");
    fs::write(&path, r#"{"fuel": {"price_per_liter": 204, "currency": "$"}}"#).expect("write");
    commute(&home)
        .args(["--config"])
        .arg(&path)
        .args(["estimate", "--distance", "10", "--signals", "14", "--quality", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$86"));
}
