// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Backup configs from a file through to engine and client settings.

use std::error::Error as _;
use std::time::Duration;

use indoc::indoc;
use pretty_assertions::assert_eq;

use asbackup::clients::{new_aerospike_client, new_storage_client, StorageClient};
use asbackup::engine::{CompressionMode, EncoderType};
use asbackup::options::{AppOptions, Provider};
use asbackup::*;

use super::*;

const BACKUP: &str = indoc! {r#"
    app:
      log-level: debug
    cluster:
      seeds:
        - host: 10.0.0.1
          port: 3000
        - host: 10.0.0.2
          tls-name: db
          port: 4333
      user: admin
      password: secrets:db:password
    backup:
      namespace: test
      directory: backups
      set-list: [one, two]
      parallel: 4
      prefer-racks: ["1", "2"]
    compression:
      mode: zstd
      level: 3
"#};

fn load(content: &str) -> BackupServiceConfig {
    let (_dir, path) = config_file(content);
    BackupServiceConfig::new(BackupServiceConfig {
        app: AppOptions {
            config_file: Some(path),
            ..Default::default()
        },
        ..Default::default()
    })
    .expect("load config file")
}

#[test]
fn file_to_engine_config() {
    let service = load(BACKUP);
    assert_eq!(service.app.log_level, "debug");
    assert!(!service.is_xdr());
    service.validate().unwrap();

    let (backup, xdr) = new_backup_configs(&service).unwrap();
    assert_eq!(xdr, None);
    assert_eq!(backup.namespace, "test");
    assert_eq!(backup.directory.as_deref(), Some("backups"));
    assert_eq!(backup.set_list, ["one", "two"]);
    assert_eq!(backup.parallel_read, 4);
    assert_eq!(backup.compression.mode, CompressionMode::Zstd);
    assert_eq!(backup.compression.level, 3);
    assert_eq!(backup.encryption, None);
    assert_eq!(backup.encoder, EncoderType::Asb);
}

#[test]
fn client_resolves_secrets() {
    let service = load(BACKUP);
    let agent = FakeAgent::default().with("db", "password", "hunter2");
    let racks = &service.backup.as_ref().unwrap().prefer_racks;
    let client = new_aerospike_client(
        &service.cluster,
        &service.client_policy,
        racks,
        0,
        Some(&agent),
    )
    .unwrap();
    assert_eq!(client.user, "admin");
    assert_eq!(client.password, "hunter2");
    assert_eq!(client.rack_ids, [1, 2]);
    assert!(client.rack_aware);
    assert_eq!(client.seeds.len(), 2);
    assert_eq!(client.seeds[1].to_string(), "10.0.0.2:db:4333");
    assert!(client.timeout > Duration::ZERO);
}

#[test]
fn secret_without_agent() {
    let service = load(BACKUP);
    let err = new_aerospike_client(&service.cluster, &service.client_policy, "", 0, None)
        .unwrap_err();
    assert_eq!(err.to_string(), "failed to create aerospike client");
    let cause = err.source().expect("setup error");
    assert_eq!(cause.to_string(), "failed to parse secret for password");
    let root = cause.source().expect("secret error");
    assert_eq!(root.to_string(), "secret agent is not configured");
}

#[test]
fn local_storage_by_default() {
    let service = load(BACKUP);
    assert_eq!(service.storage_provider(), Provider::Local);
    let storage = new_storage_client(
        service.storage_provider(),
        &service.s3,
        &service.gcs,
        &service.azure,
        None,
    )
    .unwrap();
    assert!(matches!(storage, StorageClient::Local));
}

#[test]
fn invalid_file_settings_are_refused() {
    let service = load(indoc! {"
        backup:
          namespace: test
          directory: backups
          output-file: backup.asb
    "});
    assert!(matches!(
        service.validate(),
        Err(ValidationError::ConflictingDestination)
    ));
}

#[test]
fn unknown_compression_fails_assembly() {
    let service = load(indoc! {"
        backup:
          namespace: test
          directory: backups
        compression:
          mode: lz4
    "});
    service.validate().unwrap();
    let err = new_backup_configs(&service).unwrap_err();
    assert_eq!(err.to_string(), "unsupported compression mode \"lz4\"");
}
