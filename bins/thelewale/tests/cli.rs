//! Command-line tests for the commands that run without a backend

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn thelewale() -> Command {
    let mut cmd = Command::cargo_bin("thelewale").unwrap();
    cmd.env_remove("THELEWALE_USER")
        .env_remove("THELEWALE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn badge_for_points() {
    thelewale()
        .args(["badge", "250"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vendor Specialist"))
        .stdout(predicate::str::contains("250 more points to Food Guru"));
}

#[test]
fn badge_just_below_a_tier() {
    thelewale()
        .args(["badge", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Newbie"))
        .stdout(predicate::str::contains("1 more points to Contributor"));
}

#[test]
fn badge_top_tier_has_no_next() {
    thelewale()
        .args(["badge", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food Guru"))
        .stdout(predicate::str::contains("more points").not());
}

#[test]
fn badge_negative_or_missing_points() {
    thelewale()
        .args(["badge", "-5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Newbie"));

    thelewale()
        .arg("badge")
        .assert()
        .success()
        .stdout(predicate::str::contains("Newbie"));
}

#[test]
fn badge_json_output() {
    thelewale()
        .args(["--format", "json", "badge", "120"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Contributor\""))
        .stdout(predicate::str::contains("\"pointsNeeded\": 130"));
}

#[test]
fn badge_tiers_from_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("thelewale.toml");
    fs::write(
        &path,
        r#"
[[badges]]
name = "Taster"
min_points = 0
color = "green"

[[badges]]
name = "Chaat Champion"
min_points = 50
color = "gold"
"#,
    )
    .unwrap();

    thelewale()
        .arg("--config")
        .arg(&path)
        .args(["badge", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chaat Champion"));
}

#[test]
fn missing_config_file_is_a_config_error() {
    thelewale()
        .args(["--config", "/nonexistent/thelewale.toml", "badge", "10"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn distance_between_connaught_place_and_pitampura() {
    thelewale()
        .args(["distance", "28.6139", "77.2090", "28.7041", "77.1025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("14.4 km"))
        .stdout(predicate::str::contains("within"));
}

#[test]
fn distance_outside_radius() {
    thelewale()
        .args(["distance", "28.6139", "77.2090", "19.0760", "72.8777"])
        .assert()
        .success()
        .stdout(predicate::str::contains("outside"));
}

#[test]
fn distance_rejects_out_of_range_latitude() {
    thelewale()
        .args(["distance", "95", "77.2", "28.7", "77.1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid coordinate"));
}

#[test]
fn json_error_report_on_stdout() {
    thelewale()
        .args(["--format", "json", "distance", "28.6", "200", "28.7", "77.1"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"codeStr\": \"E6003\""))
        .stdout(predicate::str::contains("\"category\": \"Validation\""));
}

#[test]
fn submit_reports_unreadable_listing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vendor.json");
    fs::write(&path, "{ \"name\": ").unwrap();

    thelewale()
        .arg("submit")
        .arg("--file")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid vendor listing"));

    thelewale()
        .args(["submit", "--file", "/nonexistent/vendor.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn review_requires_valid_rating() {
    thelewale()
        .args(["review", "v1", "--rating", "6", "--content", "Great momos"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("E6002"));
}

#[test]
fn help_lists_commands() {
    thelewale()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("badge"))
        .stdout(predicate::str::contains("watch"));
}
