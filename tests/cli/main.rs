// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

//! Run the asbackup CLI as a subprocess and test it.

use std::process::Command;

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use assert_fs::{NamedTempFile, TempDir};
use predicates::prelude::*;
use serde_json::Value;

mod config_file;
mod trace;
mod validate;

fn run_asbackup() -> Command {
    Command::cargo_bin("asbackup").expect("locate asbackup binary")
}

/// Run to success and parse the plan printed on stdout.
fn plan(command: &mut Command) -> Value {
    let output = command.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is a json plan")
}

#[test]
fn no_args() {
    run_asbackup()
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn help() {
    run_asbackup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("backup-xdr"))
        .stdout(predicate::str::contains("restore"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn backup_help_describes_backup() {
    run_asbackup()
        .args(["backup", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--host"))
        .stdout(predicate::str::contains("Namespace to back up."))
        .stdout(predicate::str::contains("Number of partition scans to run at once."))
        .stdout(predicate::str::contains("Number of restore workers").not());
}

#[test]
fn restore_help_describes_restore() {
    run_asbackup()
        .args(["restore", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Number of restore workers"))
        .stdout(predicate::str::contains("Namespace to back up.").not());
}

#[test]
fn short_h_is_the_host() {
    let dir = TempDir::new().unwrap();
    let plan = plan(
        run_asbackup()
            .args(["backup", "-h", "10.0.0.1", "-p", "3100", "-n", "test", "-d"])
            .arg(dir.path()),
    );
    assert_eq!(plan["client"]["seeds"][0]["host"], "10.0.0.1");
    assert_eq!(plan["client"]["seeds"][0]["port"], 3100);
}

#[test]
fn backup_to_directory() {
    let dir = TempDir::new().unwrap();
    let plan = plan(
        run_asbackup()
            .args(["backup", "-n", "test", "-s", "set1,set2", "-d"])
            .arg(dir.path()),
    );
    assert_eq!(plan["storage"], "local disk");
    assert_eq!(plan["backup"]["namespace"], "test");
    assert_eq!(plan["backup"]["directory"], dir.path().to_str().unwrap());
    assert_eq!(plan["backup"]["output_file"], Value::Null);
    assert_eq!(plan["backup"]["set_list"], serde_json::json!(["set1", "set2"]));
    assert_eq!(plan["client"]["seeds"][0]["host"], "127.0.0.1");
    assert_eq!(plan["client"]["seeds"][0]["port"], 3000);
    assert!(plan.get("xdr").is_none());
    // Nothing is written before the engine runs.
    dir.assert(predicate::path::is_dir());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn largest_file_limit_is_not_zero() {
    let dir = TempDir::new().unwrap();
    let plan = plan(
        run_asbackup()
            .args(["backup", "-n", "test", "--file-limit", "18446744073709551615", "-d"])
            .arg(dir.path()),
    );
    assert_eq!(plan["backup"]["file_limit"], u64::MAX);

    let plan = self::plan(
        run_asbackup()
            .args(["backup", "-n", "test", "--file-limit", "0", "-d"])
            .arg(dir.path()),
    );
    assert_eq!(plan["backup"]["file_limit"], Value::Null);
}

#[test]
fn password_is_not_printed() {
    let dir = TempDir::new().unwrap();
    run_asbackup()
        .args(["backup", "-n", "test", "-U", "admin", "-P", "hunter2", "-d"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("admin"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn backup_xdr() {
    let dir = TempDir::new().unwrap();
    let plan = plan(
        run_asbackup()
            .args(["backup-xdr", "-n", "test", "--dc", "dc1", "-d"])
            .arg(dir.path()),
    );
    assert_eq!(plan["xdr"]["namespace"], "test");
    assert_eq!(plan["xdr"]["dc"], "dc1");
    assert_eq!(plan["xdr"]["directory"], dir.path().to_str().unwrap());
    assert_eq!(plan["storage"], "local disk");
}

#[test]
fn restore_from_directory() {
    let dir = TempDir::new().unwrap();
    let plan = plan(
        run_asbackup()
            .args(["restore", "-n", "source,destination", "-d"])
            .arg(dir.path()),
    );
    assert_eq!(plan["restore"]["namespace"]["source"], "source");
    assert_eq!(plan["restore"]["namespace"]["destination"], "destination");
    assert_eq!(plan["restore"]["directory"], dir.path().to_str().unwrap());
    assert_eq!(plan["storage"], "local disk");
}

#[test]
fn restore_from_directory_list() {
    let plan = plan(run_asbackup().args([
        "restore",
        "-n",
        "test",
        "--directory-list",
        "a,b",
        "--parent-directory",
        "/backups",
    ]));
    assert_eq!(
        plan["restore"]["directory_list"],
        serde_json::json!(["/backups/a", "/backups/b"])
    );
    assert_eq!(plan["restore"]["directory"], Value::Null);
}

#[test]
fn missing_gcp_key_file() {
    let dir = TempDir::new().unwrap();
    let key = dir.child("no-such-key.json");
    run_asbackup()
        .args(["restore", "-n", "test", "-d", "backups", "--gcp-bucket-name", "bucket"])
        .arg("--gcp-key-path")
        .arg(key.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to create gcp storage client"))
        .stderr(predicate::str::contains("caused by:"));
}

#[test]
fn json_log_file() {
    let dir = TempDir::new().unwrap();
    let log = NamedTempFile::new("asbackup.log").unwrap();
    run_asbackup()
        .args(["backup", "-n", "test", "-d"])
        .arg(dir.path())
        .arg("--log-json")
        .arg(log.path())
        .assert()
        .success();
    log.assert(predicate::str::contains("\"level\":\"INFO\""));
}

#[test]
fn bad_log_level() {
    run_asbackup()
        .args(["backup", "-n", "test", "-d", "out", "-v", "--log-level", "loud"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}
