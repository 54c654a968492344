// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Restore configs from a file.

use std::time::Duration;

use indoc::indoc;
use pretty_assertions::assert_eq;

use asbackup::clients::new_aerospike_client;
use asbackup::engine::{GenerationPolicy, RecordExistsAction};
use asbackup::options::AppOptions;
use asbackup::*;

use super::*;

fn load(content: &str) -> RestoreServiceConfig {
    let (_dir, path) = config_file(content);
    RestoreServiceConfig::new(RestoreServiceConfig {
        app: AppOptions {
            config_file: Some(path),
            ..Default::default()
        },
        ..Default::default()
    })
    .expect("load config file")
}

#[test]
fn restore_into_another_namespace() {
    let service = load(indoc! {"
        cluster:
          seeds:
            - host: 127.0.0.1
              port: 3000
        restore:
          namespace: source,destination
          directory: backups
          replace: true
          no-generation: true
          total-timeout: 5000
          retry-base-interval: 100
          retry-multiplier: 2.0
          retry-max-attempts: 3
          warm-up: 8
    "});
    service.validate().unwrap();
    assert!(!service.is_stdin());
    let restore = new_restore_config(&service).unwrap();
    assert_eq!(restore.namespace.source, "source");
    assert_eq!(restore.namespace.destination, "destination");
    assert_eq!(restore.directory.as_deref(), Some("backups"));
    assert_eq!(
        restore.write_policy.record_exists_action,
        RecordExistsAction::Replace
    );
    assert_eq!(restore.write_policy.generation_policy, GenerationPolicy::None);
    assert_eq!(restore.write_policy.total_timeout, Duration::from_secs(5));
    assert_eq!(restore.retry_policy.base_timeout, Duration::from_millis(100));
    assert_eq!(restore.retry_policy.max_retries, 3);

    let client = new_aerospike_client(
        &service.cluster,
        &service.client_policy,
        "",
        service.restore.warm_up,
        None,
    )
    .unwrap();
    assert_eq!(client.warm_up, 8);
    assert!(!client.rack_aware);
}

#[test]
fn restore_from_stdin() {
    let service = load(indoc! {"
        restore:
          namespace: test
          input-file: '-'
    "});
    service.validate().unwrap();
    assert!(service.is_stdin());
}

#[test]
fn restore_needs_input() {
    let service = load(indoc! {"
        restore:
          namespace: test
    "});
    assert!(matches!(service.validate(), Err(ValidationError::MissingRestoreSource)));
}

#[test]
fn user_secret_from_agent() {
    let service = load(indoc! {"
        cluster:
          seeds:
            - host: 127.0.0.1
              port: 3000
          user: secrets:db:user
        restore:
          namespace: test
          directory: backups
    "});
    let agent = FakeAgent::default().with("db", "user", "restorer");
    let client =
        new_aerospike_client(&service.cluster, &service.client_policy, "", 0, Some(&agent))
            .unwrap();
    assert_eq!(client.user, "restorer");
}
