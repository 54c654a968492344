// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Settings that are refused before anything connects.

use super::*;

fn fails_with(args: &[&str], message: &str) {
    run_asbackup()
        .args(args)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(message));
}

#[test]
fn backup_needs_a_destination() {
    fails_with(
        &["backup", "-n", "test"],
        "must specify either output-file or directory",
    );
}

#[test]
fn backup_has_one_destination() {
    fails_with(
        &["backup", "-n", "test", "-d", "dir", "-o", "file.asb"],
        "only one of output-file and directory may be configured at the same time",
    );
}

#[test]
fn continue_conflicts_with_state_file() {
    fails_with(
        &[
            "backup",
            "-n",
            "test",
            "-d",
            "dir",
            "--continue",
            "state",
            "--state-file-dst",
            "state",
        ],
        "continue and state-file-dst are mutually exclusive",
    );
}

#[test]
fn estimate_refuses_destination() {
    fails_with(
        &["backup", "-n", "test", "-e", "-d", "dir"],
        "estimate with output-file or directory is not allowed",
    );
}

#[test]
fn restore_needs_input() {
    fails_with(&["restore", "-n", "test"], "input file or directory required");
}

#[test]
fn one_storage_provider() {
    fails_with(
        &[
            "restore",
            "-n",
            "test",
            "-d",
            "dir",
            "--gcp-bucket-name",
            "bucket",
            "--azure-container-name",
            "container",
        ],
        "only one storage provider can be configured",
    );
}

#[test]
fn xdr_dc_name() {
    fails_with(
        &["backup-xdr", "-n", "test", "-d", "dir", "--dc", "bad name!"],
        "dc name must be 1-31 characters",
    );
}

#[test]
fn bad_rack_list() {
    fails_with(
        &["backup", "-n", "test", "-d", "dir", "--prefer-racks", "1,x"],
        "invalid rack id 'x'",
    );
}
