//! Black-box tests for the `gos` binary.

use predicates::prelude::*;

mod helpers;
use helpers::{strip_ansi, CliTestHarness};

fn stdout_of(assert: assert_cmd::assert::Assert) -> String {
    strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout))
}

#[test]
fn test_cli_help_and_version() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["--help"])
        .stdout(predicate::str::contains("battlefront"))
        .stdout(predicate::str::contains("today"));

    harness
        .run_success(&["--version"])
        .stdout(predicate::str::contains("gos"));

    harness
        .run_failure(&["invalid-command"])
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_database_created_in_nested_directory() {
    let harness = CliTestHarness::new();
    harness.run_success(&["battlefront", "list"]);
    assert!(harness.db_path().exists());
}

#[test]
fn test_battlefront_add_and_list() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["battlefront", "add", "Health", "--color", "green"])
        .stdout(predicate::str::contains("Created battlefront"));
    harness.run_success(&["bf", "add", "Work", "--description", "Day job"]);

    let listing = stdout_of(harness.run_success(&["battlefront", "list"]));
    assert!(listing.contains("Health"));
    assert!(listing.contains("#22c55e"));
    assert!(listing.contains("Day job"));

    harness
        .run_failure(&["battlefront", "add", "Health"])
        .stderr(predicate::str::contains("already exists"));
    harness
        .run_failure(&["battlefront", "add", "Art", "--color", "chartreuse"])
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_mission_add_with_duration() {
    let harness = CliTestHarness::new();
    harness.run_success(&["battlefront", "add", "Work"]);

    let out = stdout_of(harness.run_success(&[
        "mission",
        "add",
        "Write report",
        "--due",
        "today",
        "--at",
        "9am",
        "--duration",
        "1h30",
        "--battlefront",
        "Work",
    ]));
    assert!(out.contains("Created mission"));
    assert!(out.contains("Duration: 1h 30m"));

    let listing = stdout_of(harness.run_success(&["mission", "list"]));
    assert!(listing.contains("Write report"));
    assert!(listing.contains("09:00"));
    assert!(listing.contains("1h 30m"));
    assert!(listing.contains("Work"));
}

#[test]
fn test_mission_add_rejects_invalid_durations() {
    let harness = CliTestHarness::new();

    harness
        .run_failure(&["mission", "add", "Bad", "--duration", "-5"])
        .stderr(predicate::str::contains("Invalid duration format"));
    harness
        .run_failure(&["mission", "add", "Short", "--duration", "3"])
        .stderr(predicate::str::contains("at least 5 minutes"));
    harness
        .run_failure(&["mission", "add", "Long", "--duration", "13h"])
        .stderr(predicate::str::contains("720"));

    let listing = stdout_of(harness.run_success(&["mission", "list", "--all"]));
    assert!(listing.contains("No missions found."));
}

#[test]
fn test_duration_bounds_follow_configuration() {
    let harness = CliTestHarness::new();

    harness
        .command()
        .env("GOS_DURATION_MAX", "60")
        .args(["mission", "add", "Capped", "--duration", "2h"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 hour"));
}

#[test]
fn test_mission_duration_command() {
    let harness = CliTestHarness::new();
    let id = harness.add_mission(&["Stretch"]);

    harness
        .run_success(&["mission", "duration", &id, "45m"])
        .stdout(predicate::str::contains("Duration set to"));
    harness
        .run_success(&["mission", "duration", &id, "1:30"])
        .stdout(predicate::str::contains("1h 30m"));
    harness
        .run_failure(&["mission", "duration", &id, "1:3:0"])
        .stderr(predicate::str::contains("Invalid duration format"));

    let listing = stdout_of(harness.run_success(&["mission", "list"]));
    assert!(listing.contains("1h 30m"));
}

#[test]
fn test_mission_lifecycle() {
    let harness = CliTestHarness::new();
    let done = harness.add_mission(&["Finish"]);
    let dropped = harness.add_mission(&["Drop"]);

    harness
        .run_success(&["mission", "done", &done])
        .stdout(predicate::str::contains("Completed mission: 'Finish'"));
    harness
        .run_success(&["m", "abandon", &dropped])
        .stdout(predicate::str::contains("Abandoned mission: 'Drop'"));
    harness
        .run_failure(&["mission", "done", &done])
        .stderr(predicate::str::contains("already completed"));

    let pending = stdout_of(harness.run_success(&["mission", "list"]));
    assert!(!pending.contains("Finish"));

    let all = stdout_of(harness.run_success(&["mission", "list", "--all"]));
    assert!(all.contains("Finish"));
    assert!(all.contains("Drop"));

    harness
        .run_success(&["mission", "delete", &done, "--force"])
        .stdout(predicate::str::contains("Deleted mission"));
    harness
        .run_failure(&["mission", "done", &done])
        .stderr(predicate::str::contains("No mission found"));
}

#[test]
fn test_mission_edit() {
    let harness = CliTestHarness::new();
    let id = harness.add_mission(&["Draft", "--duration", "30"]);

    harness
        .run_success(&["mission", "edit", &id, "--title", "Final draft", "--at", "14:30"])
        .stdout(predicate::str::contains("Updated mission: 'Final draft'"));
    harness
        .run_failure(&["mission", "edit", &id])
        .stderr(predicate::str::contains("Nothing to change"));

    let listing = stdout_of(harness.run_success(&["mission", "list"]));
    assert!(listing.contains("Final draft"));
    assert!(listing.contains("14:30"));
}

#[test]
fn test_checkpoints() {
    let harness = CliTestHarness::new();
    harness.run_success(&["battlefront", "add", "Thesis"]);

    harness
        .run_success(&["checkpoint", "add", "Thesis", "Outline"])
        .stdout(predicate::str::contains("#1"));
    harness
        .run_success(&["cp", "add", "Thesis", "Draft"])
        .stdout(predicate::str::contains("#2"));

    let listing = stdout_of(harness.run_success(&["checkpoint", "list", "Thesis"]));
    let outline = listing.find("Outline").expect("Outline listed");
    let draft = listing.find("Draft").expect("Draft listed");
    assert!(outline < draft);

    harness
        .run_failure(&["checkpoint", "add", "Nowhere", "Ghost"])
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_today_and_week() {
    let harness = CliTestHarness::new();
    harness.add_mission(&["Morning run", "--duration", "45m"]);

    let today = stdout_of(harness.run_success(&["today"]));
    assert!(today.contains("UTC"));
    assert!(today.contains("Morning run"));
    assert!(today.contains("45m planned"));

    let week = stdout_of(harness.run_success(&["week"]));
    assert!(week.contains("Morning run"));
    assert!(week.contains("Today"));
    assert!(week.contains("1 missions"));
}

#[test]
fn test_invalid_timezone_is_reported() {
    let harness = CliTestHarness::new();

    harness
        .command()
        .env("GOS_TIMEZONE", "Mars/Olympus_Mons")
        .arg("today")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown timezone"));
}

#[test]
fn test_wildcard_short_ids_are_rejected() {
    let harness = CliTestHarness::new();
    harness.add_mission(&["Keep me"]);
    harness.run_success(&["battlefront", "add", "Thesis"]);
    harness.run_success(&["checkpoint", "add", "Thesis", "Outline"]);

    harness
        .run_failure(&["mission", "done", "%%"])
        .stderr(predicate::str::contains("Short ID"));
    harness
        .run_failure(&["mission", "delete", "%%", "--force"])
        .stderr(predicate::str::contains("Short ID"));
    harness
        .run_failure(&["checkpoint", "done", "__"])
        .stderr(predicate::str::contains("Short ID"));

    let listing = stdout_of(harness.run_success(&["mission", "list"]));
    assert!(listing.contains("Keep me"));
}
