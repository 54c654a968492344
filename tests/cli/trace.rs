// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Tests for log options of the asbackup CLI.

use super::*;

#[test]
fn debug_shows_trace() {
    let dir = TempDir::new().unwrap();
    run_asbackup()
        .args(["-D", "backup", "-n", "test", "-d"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "TRACE asbackup::ui: Tracing enabled",
        ));
}

#[test]
fn info_by_default() {
    let dir = TempDir::new().unwrap();
    run_asbackup()
        .args(["backup", "-n", "test", "-d"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("initializing Aerospike client"))
        .stderr(predicate::str::contains("Tracing enabled").not());
}

#[test]
fn verbose_debug_level() {
    let dir = TempDir::new().unwrap();
    run_asbackup()
        .args(["restore", "-n", "test", "-v", "--log-level", "debug", "-d"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn json_console() {
    let dir = TempDir::new().unwrap();
    run_asbackup()
        .args(["backup", "-n", "test", "--log-json-console", "-d"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("\"message\":\"initializing Aerospike client\""));
}
