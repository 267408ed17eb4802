//! End-to-end session tests: seed, review, rank, export, reload.
//!
//! Each test drives the binary the way a real session would and then
//! inspects the data file, report file, and session log it left behind.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn schoolmark(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("schoolmark").unwrap();
    cmd.current_dir(dir.path())
        .arg("--data")
        .arg(dir.path().join("data.json"))
        .arg("--log")
        .arg(dir.path().join("session.log"));
    cmd
}

fn seed(dir: &TempDir) {
    for args in [
        vec!["add-user", "admin", "pw", "--role", "admin"],
        vec!["add-user", "casey", "pw"],
        vec![
            "add-school",
            "Northgate",
            "--level",
            "primary",
            "--location",
            "Leeds",
        ],
        vec![
            "add-school",
            "Westfield",
            "--level",
            "primary",
            "--location",
            "Hull",
        ],
        vec![
            "add-school",
            "Southbank",
            "--level",
            "secondary",
            "--location",
            "York",
        ],
    ] {
        schoolmark(dir).args(&args).assert().success();
    }
}

#[test]
fn full_session_flow() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    // rate: casey gives Northgate 5, Westfield 3 then revises to 4
    schoolmark(&dir)
        .args(["rate", "1", "5", "--user", "casey"])
        .assert()
        .success();
    schoolmark(&dir)
        .args(["rate", "2", "3", "--user", "casey"])
        .assert()
        .success();
    schoolmark(&dir)
        .args(["rate", "2", "4", "--user", "casey"])
        .assert()
        .success();

    schoolmark(&dir)
        .args(["comment", "add", "1", "Lovely staff", "--user", "casey"])
        .assert()
        .success();

    // the revised rating holds, the original is gone (upsert)
    let data = std::fs::read_to_string(dir.path().join("data.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&data).unwrap();
    assert_eq!(json["ratings"].as_array().unwrap().len(), 2);
    assert_eq!(json["ratings"][1]["value"], 4);
    assert_eq!(json["ratings"][1]["school_id"], "2");

    schoolmark(&dir)
        .arg("rankings")
        .assert()
        .success()
        .stdout(predicate::str::contains("Primary Schools:"))
        .stdout(predicate::str::contains("Northgate (Leeds) - Avg Rating: 5.00"))
        .stdout(predicate::str::contains("Southbank (York) - Avg Rating: 0.00"));

    // unrated school reads differently in its profile view
    schoolmark(&dir)
        .args(["school", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No ratings yet"));

    schoolmark(&dir)
        .arg("trending")
        .assert()
        .success()
        .stdout(predicate::str::contains("Northgate (Leeds) - activity: 2"))
        .stdout(predicate::str::contains("Southbank (York) - No recent activity"));

    schoolmark(&dir)
        .arg("contributors")
        .assert()
        .success()
        .stdout(predicate::str::contains("casey - 3 contributions"));

    schoolmark(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Users: 2"))
        .stdout(predicate::str::contains("Ratings: 2"));

    let report = dir.path().join("reports/top.txt");
    schoolmark(&dir)
        .args(["export", "--out"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to"));

    let content = std::fs::read_to_string(&report).unwrap();
    assert_eq!(content.matches("Avg Rating").count(), 3);

    // the session log recorded the saves in the fixed line format
    let log = std::fs::read_to_string(dir.path().join("session.log")).unwrap();
    assert!(log.lines().any(|l| l.starts_with("[INFO] ") && l.contains(" - ")));
}

#[test]
fn favourite_add_is_idempotent_across_runs() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    schoolmark(&dir)
        .args(["favourite", "add", "1", "--user", "casey"])
        .assert()
        .success();
    schoolmark(&dir)
        .args(["favourite", "add", "1", "--user", "casey"])
        .assert()
        .success();

    let data = std::fs::read_to_string(dir.path().join("data.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&data).unwrap();
    assert_eq!(json["favourites"].as_array().unwrap().len(), 1);

    schoolmark(&dir)
        .args(["favourite", "list", "--user", "casey"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Northgate"));
}

#[test]
fn legacy_data_file_without_favourites_loads() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("data.json"),
        r#"{
            "users": [{"id": 1, "username": "casey", "password": "pw", "role": "student"}],
            "schools": [{"id": 1, "name": "Northgate", "level": "primary", "location": "Leeds"}],
            "ratings": [{"user_id": 1, "school_id": "1", "value": 4}],
            "comments": []
        }"#,
    )
    .unwrap();

    schoolmark(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Users: 1"))
        .stdout(predicate::str::contains("Ratings: 1"));
}

#[test]
fn data_file_missing_required_key_fails_loudly() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("data.json"),
        r#"{"users": [], "schools": [], "comments": []}"#,
    )
    .unwrap();

    schoolmark(&dir)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn comment_lifecycle_with_permissions() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    schoolmark(&dir)
        .args(["comment", "add", "1", "First impressions", "--user", "casey"])
        .assert()
        .success();

    // another student cannot touch casey's comment
    schoolmark(&dir)
        .args(["add-user", "drew", "pw"])
        .assert()
        .success();
    schoolmark(&dir)
        .args(["comment", "delete", "0", "--user", "drew"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not permitted"));

    schoolmark(&dir)
        .args(["comment", "edit", "0", "Revised view", "--user", "casey"])
        .assert()
        .success();

    schoolmark(&dir)
        .args(["comment", "list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Revised view"));

    // admins may remove any comment
    schoolmark(&dir)
        .args(["comment", "delete", "0", "--user", "admin"])
        .assert()
        .success();
    schoolmark(&dir)
        .args(["comment", "list", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No comments"));
}
