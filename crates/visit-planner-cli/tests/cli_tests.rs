//! Integration tests for the `planner` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the drop, audit,
//! pool, and slots subcommands through the actual binary, including stdin/stdout
//! piping, file I/O, config loading, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper: path to a fixture file.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Helper: read the day.json fixture as a string.
fn day_json() -> String {
    std::fs::read_to_string(fixture("day.json")).expect("day.json fixture must exist")
}

fn planner() -> Command {
    Command::cargo_bin("planner").unwrap()
}

fn event<'a>(snapshot: &'a Value, id: &str) -> &'a Value {
    snapshot["scheduleEvents"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["id"] == id)
        .unwrap_or_else(|| panic!("event {} missing", id))
}

// ─────────────────────────────────────────────────────────────────────────────
// drop
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn drop_visit_on_occupied_slot_shifts_event() {
    let output = planner()
        .args([
            "drop",
            "--day",
            "2026-03-16",
            "--item",
            r#"{"type":"UNASSIGNED_VISIT","visitId":"v1"}"#,
            "--target",
            r#"{"type":"EMPLOYEE_SLOT","employeeId":1,"timeSlot":"09:00"}"#,
        ])
        .write_stdin(day_json())
        .assert()
        .success()
        .stderr(predicate::str::contains("Placed event-"))
        .stderr(predicate::str::contains("(1 displaced)"))
        .get_output()
        .stdout
        .clone();

    let snapshot: Value = serde_json::from_slice(&output).expect("stdout must be JSON");

    assert_eq!(event(&snapshot, "e1")["startTime"], "09:30");
    assert_eq!(event(&snapshot, "e1")["endTime"], "10:00");
    // Employee 2's event is untouched.
    assert_eq!(event(&snapshot, "e2")["startTime"], "09:00");

    let visits = snapshot["unassignedVisits"].as_array().unwrap();
    assert_eq!(visits.len(), 2);
    assert!(visits.iter().all(|v| v["id"] != "v1"));

    // Reference data passes through.
    assert_eq!(snapshot["employees"].as_array().unwrap().len(), 2);
    assert_eq!(snapshot["scheduleEvents"].as_array().unwrap().len(), 3);
}

#[test]
fn drop_event_on_pool_from_file_to_file() {
    let output_path = std::env::temp_dir().join("planner-test-return-to-pool.json");
    let _ = std::fs::remove_file(&output_path);

    planner()
        .args([
            "drop",
            "-i",
            &fixture("day.json"),
            "-o",
            output_path.to_str().unwrap(),
            "--day",
            "2026-03-16",
            "--item",
            r#"{"type":"SCHEDULE_EVENT","eventId":"e2"}"#,
            "--target",
            r#"{"type":"UNASSIGNED_PANEL"}"#,
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Returned e2 to the pool"));

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let snapshot: Value = serde_json::from_str(&content).unwrap();

    assert_eq!(snapshot["scheduleEvents"].as_array().unwrap().len(), 1);
    let visits = snapshot["unassignedVisits"].as_array().unwrap();
    let returned = visits.last().unwrap();
    assert_eq!(returned["priority"], "medium");
    assert_eq!(returned["customerId"], 11);
    assert_eq!(returned["preferredDate"], "2026-03-16");

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn drop_without_target_leaves_snapshot_unchanged() {
    let output = planner()
        .args([
            "drop",
            "--day",
            "2026-03-16",
            "--item",
            r#"{"type":"UNASSIGNED_VISIT","visitId":"v1"}"#,
            "--target",
            r#"{"type":"INVALID"}"#,
        ])
        .write_stdin(day_json())
        .assert()
        .success()
        .stderr(predicate::str::contains("Drop ignored"))
        .get_output()
        .stdout
        .clone();

    let after: Value = serde_json::from_slice(&output).unwrap();
    let before: Value = serde_json::from_str(&day_json()).unwrap();
    assert_eq!(after["scheduleEvents"], before["scheduleEvents"]);
    assert_eq!(after["unassignedVisits"], before["unassignedVisits"]);
}

#[test]
fn drop_past_midnight_fails() {
    planner()
        .args([
            "drop",
            "--day",
            "2026-03-16",
            "--item",
            r#"{"type":"UNASSIGNED_VISIT","visitId":"v2"}"#,
            "--target",
            r#"{"type":"EMPLOYEE_SLOT","employeeId":1,"timeSlot":"23:30"}"#,
        ])
        .write_stdin(day_json())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Drop rejected"))
        .stderr(predicate::str::contains("past the end of the day"));
}

#[test]
fn drop_with_unknown_visit_fails() {
    planner()
        .args([
            "drop",
            "--day",
            "2026-03-16",
            "--item",
            r#"{"type":"UNASSIGNED_VISIT","visitId":"nope"}"#,
            "--target",
            r#"{"type":"EMPLOYEE_SLOT","employeeId":1,"timeSlot":"10:00"}"#,
        ])
        .write_stdin(day_json())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown unassigned visit: nope"));
}

#[test]
fn drop_on_slot_without_employee_is_ignored() {
    let output = planner()
        .args([
            "drop",
            "--day",
            "2026-03-16",
            "--item",
            r#"{"type":"UNASSIGNED_VISIT","visitId":"v1"}"#,
            "--target",
            r#"{"type":"EMPLOYEE_SLOT","timeSlot":"09:00"}"#,
        ])
        .write_stdin(day_json())
        .assert()
        .success()
        .stderr(predicate::str::contains("Drop ignored: MissingEmployee"))
        .get_output()
        .stdout
        .clone();

    let snapshot: Value = serde_json::from_slice(&output).expect("stdout must be JSON");
    assert_eq!(snapshot["scheduleEvents"].as_array().unwrap().len(), 2);
    assert_eq!(event(&snapshot, "e1")["startTime"], "09:00");
    assert_eq!(snapshot["unassignedVisits"].as_array().unwrap().len(), 3);
}

#[test]
fn drop_with_bad_item_json_fails() {
    planner()
        .args(["drop", "--item", "{not json", "--target", r#"{"type":"INVALID"}"#])
        .write_stdin(day_json())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse --item JSON"));
}

#[test]
fn drop_with_bad_day_fails() {
    planner()
        .args([
            "drop",
            "--day",
            "16/03/2026",
            "--item",
            r#"{"type":"UNASSIGNED_VISIT","visitId":"v1"}"#,
            "--target",
            r#"{"type":"INVALID"}"#,
        ])
        .write_stdin(day_json())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --day"));
}

// ─────────────────────────────────────────────────────────────────────────────
// audit
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn audit_clean_schedule() {
    planner()
        .args(["audit", "-i", &fixture("day.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("No conflicts"));
}

#[test]
fn audit_reports_overlaps_and_fails() {
    planner()
        .args(["audit", "-i", &fixture("conflicts.json")])
        .assert()
        .failure()
        .stdout(predicate::str::contains("a 08:00-08:45 overlaps b 08:30-09:00 by 15 min"))
        .stderr(predicate::str::contains("1 conflict(s) found"));
}

#[test]
fn audit_missing_file_fails() {
    planner()
        .args(["audit", "-i", "/nonexistent/day.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn audit_invalid_snapshot_fails() {
    planner()
        .arg("audit")
        .write_stdin(r#"{"scheduleEvents": [{"id": 1}]}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse schedule snapshot"));
}

// ─────────────────────────────────────────────────────────────────────────────
// pool
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn pool_lists_urgent_first() {
    let output = planner()
        .args(["pool", "-i", &fixture("day.json")])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("urgent  v2"));
    assert!(lines[0].contains("Greta Lind"));
    assert!(lines[0].contains("Meal"));
    assert!(lines[1].starts_with("high    v1"));
    assert!(lines[2].starts_with("low     v3"));
    assert!(lines[2].ends_with("[evening]"));
}

#[test]
fn pool_filters_by_priority() {
    planner()
        .args(["pool", "-i", &fixture("day.json"), "--priority", "HIGH"])
        .assert()
        .success()
        .stdout(predicate::str::contains("v1"))
        .stdout(predicate::str::contains("v2").not());
}

#[test]
fn pool_rejects_unknown_priority() {
    planner()
        .args(["pool", "-i", &fixture("day.json"), "--priority", "someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'someday'"))
        .stderr(predicate::str::contains("urgent"));
}

// ─────────────────────────────────────────────────────────────────────────────
// lanes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn lanes_list_each_employee_with_booked_minutes() {
    let output = planner()
        .args(["lanes", "-i", &fixture("day.json"), "--day", "2026-03-16"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Anna Berg (1): 30 min booked",
            "  09:00-09:30 e1",
            "Bo Ek (2): 30 min booked",
            "  09:00-09:30 e2",
        ]
    );
}

#[test]
fn lanes_on_empty_day_show_no_events() {
    planner()
        .args(["lanes", "-i", &fixture("day.json"), "--day", "2026-03-17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Anna Berg (1): 0 min booked"))
        .stdout(predicate::str::contains("e1").not());
}

// ─────────────────────────────────────────────────────────────────────────────
// slots / config
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn slots_default_grid() {
    planner()
        .arg("slots")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("06:00\n06:30\n"))
        .stdout(predicate::str::contains("22:30"));
}

#[test]
fn slots_with_config_file() {
    planner()
        .args(["slots", "--config", &fixture("quarter_hours.json")])
        .assert()
        .success()
        .stdout("08:00\n08:15\n08:30\n08:45\n");
}

#[test]
fn missing_config_file_fails() {
    planner()
        .args(["slots", "--config", "/nonexistent/planner.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn no_subcommand_shows_usage() {
    planner()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
