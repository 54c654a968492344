// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Tests for reading settings from `--config`.

use indoc::indoc;

use super::*;

fn config_file(content: &str) -> NamedTempFile {
    let config = NamedTempFile::new("asbackup.yaml").unwrap();
    config.write_str(content).unwrap();
    config
}

#[test]
fn config_file_replaces_flags() {
    let config = config_file(indoc! {"
        cluster:
          seeds:
            - host: 192.168.0.1
              port: 3000
        backup:
          namespace: from-file
          directory: backups
    "});
    let plan = plan(
        run_asbackup()
            .args(["backup", "-n", "from-flags", "--config"])
            .arg(config.path()),
    );
    assert_eq!(plan["backup"]["namespace"], "from-file");
    assert_eq!(plan["client"]["seeds"][0]["host"], "192.168.0.1");
}

#[test]
fn restore_config_file() {
    let config = config_file(indoc! {"
        cluster:
          seeds:
            - host: 127.0.0.1
              port: 3000
        restore:
          namespace: source,destination
          directory: backups
          set-list: [set1, set2]
        compression:
          mode: zstd
    "});
    let plan = plan(run_asbackup().args(["restore", "--config"]).arg(config.path()));
    assert_eq!(plan["restore"]["namespace"]["destination"], "destination");
    assert_eq!(plan["restore"]["set_list"], serde_json::json!(["set1", "set2"]));
}

#[test]
fn unknown_key_is_an_error() {
    let config = config_file(indoc! {"
        backup:
          namespace: test
          directory: backups
          no-such-setting: 1
    "});
    run_asbackup()
        .args(["backup", "--config"])
        .arg(config.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to load config file"));
}

#[test]
fn empty_config_file() {
    let config = config_file("");
    run_asbackup()
        .args(["backup", "--config"])
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected EOF"));
}

#[test]
fn missing_config_file() {
    let dir = TempDir::new().unwrap();
    run_asbackup()
        .args(["restore", "--config"])
        .arg(dir.child("absent.yaml").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open config file"));
}
