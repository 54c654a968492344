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

//! Turn validated options into engine configuration.
//!
//! Sizes given in MiB become bytes, milliseconds become durations, and
//! comma-joined lists are split. Nothing here touches the network.

use std::num::NonZeroUsize;
use std::path::Path;
use std::str::FromStr;
use std::thread::available_parallelism;
use std::time::Duration;

use thiserror::Error;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use tracing::info;

use crate::defaults::{MAX_RACK, STD_PLACEHOLDER};
use crate::engine::{
    BackupConfig, CompressionMode, CompressionPolicy, EncoderType, EncryptionMode,
    EncryptionPolicy, GenerationPolicy, InfoPolicy, RecordExistsAction, RestoreConfig,
    RestoreNamespace, RetryPolicy, ScanPolicy, SecretAgentConfig, WritePolicy, XdrConfig,
};
use crate::options::{
    BackupOptions, BackupXdrOptions, CommonOptions, CompressionOptions, EncryptionOptions,
    RestoreOptions, SecretAgentOptions,
};
use crate::partition::{PartitionError, PartitionFilter};
use crate::service::{BackupServiceConfig, RestoreServiceConfig};
use crate::validate::{validate_partition_filters, ValidationError};

const MIB: u64 = 1024 * 1024;

/// Logged in place of a disabled compression or encryption mode.
const NONE_VALUE: &str = "NONE";

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("neither backup nor xdr options are configured")]
    NothingToBackUp,

    #[error("failed to parse racks: {0}")]
    Racks(RackError),

    #[error("failed to parse modified before date: {0}")]
    ModifiedBefore(time::error::Parse),

    #[error("failed to parse modified after date: {0}")]
    ModifiedAfter(time::error::Parse),

    #[error("failed to parse partition list: {0}")]
    PartitionList(PartitionError),

    #[error("failed to parse after digest: {0}")]
    AfterDigest(PartitionError),

    #[error("invalid partition filters: {0}")]
    PartitionFilters(ValidationError),

    #[error("unsupported compression mode {0:?}")]
    CompressionMode(String),

    #[error("unsupported encryption mode {0:?}")]
    EncryptionMode(String),
}

type Result<T> = std::result::Result<T, AssembleError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RackError {
    #[error("invalid rack id '{0}'")]
    InvalidId(String),

    #[error("rack id {0} is out of range 0-1000000")]
    OutOfRange(i64),
}

/// Split a comma-joined list. An empty string is an empty list.
pub fn split_by_comma(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(',').map(str::to_owned).collect()
}

/// Parse a comma-joined list of rack ids.
pub fn parse_racks(racks: &str) -> std::result::Result<Vec<i64>, RackError> {
    split_by_comma(racks)
        .into_iter()
        .map(|token| {
            let id: i64 = token
                .trim()
                .parse()
                .map_err(|_| RackError::InvalidId(token.clone()))?;
            if !(0..=MAX_RACK).contains(&id) {
                return Err(RackError::OutOfRange(id));
            }
            Ok(id)
        })
        .collect()
}

/// Parse `YYYY-MM-DD_HH:MM:SS` or `YYYY-MM-DD`, as UTC.
pub fn parse_date(s: &str) -> std::result::Result<OffsetDateTime, time::error::Parse> {
    let with_time = format_description!("[year]-[month]-[day]_[hour]:[minute]:[second]");
    match PrimitiveDateTime::parse(s, with_time) {
        Ok(datetime) => Ok(datetime.assume_utc()),
        Err(with_time_err) => match Date::parse(s, format_description!("[year]-[month]-[day]")) {
            Ok(date) => Ok(date.midnight().assume_utc()),
            // The full format is the documented one, so report against that.
            Err(_) => Err(with_time_err),
        },
    }
}

fn parse_optional_date(
    s: &str,
    wrap: fn(time::error::Parse) -> AssembleError,
) -> Result<Option<OffsetDateTime>> {
    if s.is_empty() {
        Ok(None)
    } else {
        parse_date(s).map(Some).map_err(wrap)
    }
}

pub fn new_retry_policy(base_interval_ms: i64, multiplier: f64, max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        base_timeout: millis(base_interval_ms),
        multiplier,
        max_retries: max_attempts,
    }
}

/// Build the engine configuration for a backup.
///
/// A scan backup gives no [XdrConfig]. An XDR backup gives both: the
/// backup config then only carries metadata (indexes and UDFs).
pub fn new_backup_configs(
    service: &BackupServiceConfig,
) -> Result<(BackupConfig, Option<XdrConfig>)> {
    let compression = new_compression_policy(&service.compression)?;
    let encryption = new_encryption_policy(&service.encryption)?;
    let secret_agent = service.secret_agent.as_ref().map(new_secret_agent_config);
    if service.is_xdr() {
        let Some(xdr) = &service.xdr else {
            return Err(AssembleError::NothingToBackUp);
        };
        let mut backup = metadata_backup_config(&xdr.namespace, &xdr.directory);
        backup.compression = compression.clone();
        backup.encryption = encryption.clone();
        backup.secret_agent = secret_agent.clone();
        let xdr_config = XdrConfig {
            namespace: xdr.namespace.clone(),
            directory: xdr.directory.clone(),
            dc: xdr.dc.clone(),
            local_address: xdr.local_address.clone(),
            local_port: xdr.local_port,
            rewind: xdr.rewind.clone(),
            forward: xdr.forward,
            max_throughput: xdr.max_throughput,
            parallel_write: parallel_or_cpus(xdr.parallel_write),
            file_limit: xdr.file_limit.saturating_mul(MIB),
            read_timeout: millis(xdr.read_timeout),
            write_timeout: millis(xdr.write_timeout),
            info_polling_period: millis(xdr.info_poling_period),
            start_timeout: millis(xdr.start_timeout),
            result_queue_size: xdr.result_queue_size,
            ack_queue_size: xdr.ack_queue_size,
            max_connections: xdr.max_connections,
            info_policy: InfoPolicy {
                timeout: millis(xdr.info_timeout),
                retry: new_retry_policy(
                    xdr.info_retry_interval,
                    xdr.info_retries_multiplier,
                    xdr.info_max_retries,
                ),
            },
            compression,
            encryption,
            secret_agent,
            encoder: EncoderType::Asbx,
            metrics_enabled: true,
        };
        log_xdr_config(xdr, &service.compression, &service.encryption, &xdr_config);
        return Ok((backup, Some(xdr_config)));
    }
    let Some(options) = &service.backup else {
        return Err(AssembleError::NothingToBackUp);
    };
    let config = scan_backup_config(options, compression, encryption, secret_agent)?;
    log_backup_config(&service.compression, &service.encryption, &config);
    Ok((config, None))
}

fn scan_backup_config(
    options: &BackupOptions,
    compression: CompressionPolicy,
    encryption: Option<EncryptionPolicy>,
    secret_agent: Option<SecretAgentConfig>,
) -> Result<BackupConfig> {
    let common = &options.common;
    let stdout = options.output_file == STD_PLACEHOLDER;
    let parallel_read = parallel_or_cpus(common.parallel);
    let partition_filters = if !options.partition_list.is_empty() {
        PartitionFilter::parse_list(&options.partition_list)
            .map_err(AssembleError::PartitionList)?
    } else if !options.after_digest.is_empty() {
        vec![PartitionFilter::after_digest(&options.after_digest)
            .map_err(AssembleError::AfterDigest)?]
    } else {
        Vec::new()
    };
    validate_partition_filters(&partition_filters).map_err(AssembleError::PartitionFilters)?;
    let state_file = options.should_save_state().then(|| {
        let name = if options.continue_from.is_empty() {
            &options.state_file_dst
        } else {
            &options.continue_from
        };
        Path::new(&common.directory)
            .join(name)
            .to_string_lossy()
            .into_owned()
    });
    Ok(BackupConfig {
        namespace: common.namespace.clone(),
        directory: non_empty(&common.directory),
        output_file: non_empty(&options.output_file),
        set_list: split_by_comma(&common.set_list),
        bin_list: split_by_comma(&common.bin_list),
        node_list: split_by_comma(&options.node_list),
        rack_list: parse_racks(&options.rack_list).map_err(AssembleError::Racks)?,
        partition_filters,
        parallel_read,
        parallel_write: if stdout { 1 } else { parallel_read },
        records_per_second: common.records_per_second,
        bandwidth: mib_to_bytes(common.bandwidth),
        file_limit: match options.file_limit {
            _ if stdout => None,
            0 => None,
            mib => Some(mib.saturating_mul(MIB)),
        },
        no_records: common.no_records,
        no_indexes: common.no_indexes,
        no_udfs: common.no_udfs,
        no_bins: options.no_bins,
        no_ttl_only: options.no_ttl_only,
        compact: options.compact,
        output_file_prefix: options.output_file_prefix.clone(),
        modified_before: parse_optional_date(
            &options.modified_before,
            AssembleError::ModifiedBefore,
        )?,
        modified_after: parse_optional_date(&options.modified_after, AssembleError::ModifiedAfter)?,
        filter_expression: non_empty(&options.filter_expression),
        state_file,
        continue_backup: !options.continue_from.is_empty(),
        page_size: options.scan_page_size,
        scan_policy: ScanPolicy {
            max_retries: common.max_retries,
            total_timeout: millis(common.total_timeout),
            socket_timeout: millis(common.socket_timeout),
            sleep_between_retries: millis(options.sleep_between_retries),
            max_records: options.max_records,
        },
        info_policy: new_info_policy(common),
        compression,
        encryption,
        secret_agent,
        encoder: EncoderType::Asb,
        metrics_enabled: true,
    })
}

/// Backs up only indexes and UDFs, alongside an XDR stream.
fn metadata_backup_config(namespace: &str, directory: &str) -> BackupConfig {
    BackupConfig {
        namespace: namespace.to_owned(),
        directory: non_empty(directory),
        output_file: None,
        set_list: Vec::new(),
        bin_list: Vec::new(),
        node_list: Vec::new(),
        rack_list: Vec::new(),
        partition_filters: Vec::new(),
        parallel_read: 1,
        parallel_write: 1,
        records_per_second: 0,
        bandwidth: 0,
        file_limit: None,
        no_records: true,
        no_indexes: false,
        no_udfs: false,
        no_bins: false,
        no_ttl_only: false,
        compact: false,
        output_file_prefix: String::new(),
        modified_before: None,
        modified_after: None,
        filter_expression: None,
        state_file: None,
        continue_backup: false,
        page_size: 0,
        scan_policy: ScanPolicy {
            max_retries: 0,
            total_timeout: Duration::ZERO,
            socket_timeout: Duration::ZERO,
            sleep_between_retries: Duration::ZERO,
            max_records: 0,
        },
        info_policy: new_info_policy(&CommonOptions::default()),
        compression: CompressionPolicy {
            mode: CompressionMode::None,
            level: 0,
        },
        encryption: None,
        secret_agent: None,
        encoder: EncoderType::Asb,
        metrics_enabled: true,
    }
}

/// Build the engine configuration for a restore.
pub fn new_restore_config(service: &RestoreServiceConfig) -> Result<RestoreConfig> {
    let restore = &service.restore;
    let common = &restore.common;
    let config = RestoreConfig {
        namespace: new_restore_namespace(&common.namespace),
        directory: non_empty(&common.directory),
        input_file: non_empty(&restore.input_file),
        directory_list: new_directory_list(&restore.directory_list, &restore.parent_directory),
        set_list: split_by_comma(&common.set_list),
        bin_list: split_by_comma(&common.bin_list),
        no_records: common.no_records,
        no_indexes: common.no_indexes,
        no_udfs: common.no_udfs,
        records_per_second: common.records_per_second,
        parallel: parallel_or_cpus(common.parallel),
        write_policy: new_write_policy(restore),
        bandwidth: mib_to_bytes(common.bandwidth),
        extra_ttl: restore.extra_ttl,
        ignore_record_error: restore.ignore_record_error,
        disable_batch_writes: restore.disable_batch_writes,
        batch_size: restore.batch_size,
        max_async_batches: restore.max_async_batches,
        warm_up: restore.warm_up,
        info_policy: new_info_policy(common),
        compression: new_compression_policy(&service.compression)?,
        encryption: new_encryption_policy(&service.encryption)?,
        secret_agent: service.secret_agent.as_ref().map(new_secret_agent_config),
        retry_policy: new_retry_policy(
            restore.retry_base_interval,
            restore.retry_multiplier,
            restore.retry_max_attempts,
        ),
        validate_only: restore.validate_only,
        apply_metadata_last: restore.apply_metadata_last,
        metrics_enabled: true,
    };
    if !config.validate_only {
        log_restore_config(&service.compression, &service.encryption, &config);
    }
    Ok(config)
}

/// `source,destination`, or one namespace for both.
fn new_restore_namespace(namespace: &str) -> RestoreNamespace {
    match namespace.split_once(',') {
        Some((source, destination)) => RestoreNamespace {
            source: source.to_owned(),
            destination: destination.to_owned(),
        },
        None => RestoreNamespace {
            source: namespace.to_owned(),
            destination: namespace.to_owned(),
        },
    }
}

/// Split `list` on commas, joining each entry onto `parent` when it is set.
pub fn new_directory_list(list: &str, parent: &str) -> Vec<String> {
    split_by_comma(list)
        .into_iter()
        .map(|dir| {
            if parent.is_empty() {
                dir
            } else {
                Path::new(parent).join(dir).to_string_lossy().into_owned()
            }
        })
        .collect()
}

fn new_write_policy(restore: &RestoreOptions) -> WritePolicy {
    let record_exists_action = if restore.replace {
        RecordExistsAction::Replace
    } else if restore.unique {
        RecordExistsAction::CreateOnly
    } else {
        RecordExistsAction::Update
    };
    WritePolicy {
        record_exists_action,
        generation_policy: if restore.no_generation {
            GenerationPolicy::None
        } else {
            GenerationPolicy::ExpectGenGt
        },
        total_timeout: millis(restore.common.total_timeout),
        socket_timeout: millis(restore.common.socket_timeout),
        max_retries: restore.common.max_retries,
        send_key: true,
    }
}

fn new_info_policy(common: &CommonOptions) -> InfoPolicy {
    InfoPolicy {
        timeout: millis(common.info_timeout),
        retry: new_retry_policy(
            common.info_retry_interval,
            common.info_retries_multiplier,
            common.info_max_retries,
        ),
    }
}

fn new_compression_policy(compression: &CompressionOptions) -> Result<CompressionPolicy> {
    let mode = if compression.mode.is_empty() {
        CompressionMode::None
    } else {
        CompressionMode::from_str(&compression.mode)
            .map_err(|_| AssembleError::CompressionMode(compression.mode.clone()))?
    };
    Ok(CompressionPolicy {
        mode,
        level: compression.level,
    })
}

/// No policy when encryption is off.
fn new_encryption_policy(encryption: &EncryptionOptions) -> Result<Option<EncryptionPolicy>> {
    if is_none_mode(&encryption.mode) {
        return Ok(None);
    }
    let mode = EncryptionMode::from_str(&encryption.mode)
        .map_err(|_| AssembleError::EncryptionMode(encryption.mode.clone()))?;
    Ok(Some(EncryptionPolicy {
        mode,
        key_file: non_empty(&encryption.key_file),
        key_env: non_empty(&encryption.key_env),
        key_secret: non_empty(&encryption.key_secret),
    }))
}

fn new_secret_agent_config(agent: &SecretAgentOptions) -> SecretAgentConfig {
    SecretAgentConfig {
        connection_type: agent.connection_type.to_ascii_lowercase(),
        address: agent.address.clone(),
        port: agent.port,
        timeout: millis(agent.timeout),
        ca_file: non_empty(&agent.ca_file),
        is_base64: agent.is_base64,
    }
}

fn is_none_mode(mode: &str) -> bool {
    mode.is_empty() || mode.eq_ignore_ascii_case(NONE_VALUE)
}

/// How compression is described in logs.
pub fn compression_summary(compression: &CompressionOptions) -> String {
    if is_none_mode(&compression.mode) {
        NONE_VALUE.to_owned()
    } else {
        format!("{} level {}", compression.mode, compression.level)
    }
}

/// How encryption is described in logs.
pub fn encryption_summary(encryption: &EncryptionOptions) -> String {
    if is_none_mode(&encryption.mode) {
        NONE_VALUE.to_owned()
    } else {
        encryption.mode.clone()
    }
}

fn log_backup_config(
    compression: &CompressionOptions,
    encryption: &EncryptionOptions,
    config: &BackupConfig,
) {
    info!(
        namespace = %config.namespace,
        directory = ?config.directory,
        output_file = ?config.output_file,
        encryption = %encryption_summary(encryption),
        compression = %compression_summary(compression),
        sets = ?config.set_list,
        bins = ?config.bin_list,
        parallel_read = config.parallel_read,
        parallel_write = config.parallel_write,
        bandwidth = config.bandwidth,
        file_limit = ?config.file_limit,
        no_records = config.no_records,
        no_indexes = config.no_indexes,
        no_udfs = config.no_udfs,
        continue_backup = config.continue_backup,
        "initialized backup config"
    );
}

fn log_xdr_config(
    xdr: &BackupXdrOptions,
    compression: &CompressionOptions,
    encryption: &EncryptionOptions,
    config: &XdrConfig,
) {
    info!(
        namespace = %config.namespace,
        encryption = %encryption_summary(encryption),
        compression = %compression_summary(compression),
        directory = %config.directory,
        dc = %config.dc,
        listen = %format!("{}:{}", config.local_address, config.local_port),
        rewind = %config.rewind,
        parallel_write = config.parallel_write,
        file_limit = config.file_limit,
        forward = config.forward,
        stop_xdr = xdr.stop_xdr,
        unblock_mrt = xdr.unblock_mrt,
        "initialized xdr backup config"
    );
}

fn log_restore_config(
    compression: &CompressionOptions,
    encryption: &EncryptionOptions,
    config: &RestoreConfig,
) {
    info!(
        namespace.source = %config.namespace.source,
        namespace.destination = %config.namespace.destination,
        directory = ?config.directory,
        input_file = ?config.input_file,
        directory_list = ?config.directory_list,
        encryption = %encryption_summary(encryption),
        compression = %compression_summary(compression),
        retry = ?config.retry_policy,
        sets = ?config.set_list,
        bins = ?config.bin_list,
        parallel = config.parallel,
        bandwidth = config.bandwidth,
        no_records = config.no_records,
        no_indexes = config.no_indexes,
        no_udfs = config.no_udfs,
        disable_batch_writes = config.disable_batch_writes,
        batch_size = config.batch_size,
        max_async_batches = config.max_async_batches,
        extra_ttl = config.extra_ttl,
        ignore_record_error = config.ignore_record_error,
        "initialized restore config"
    );
}

/// The number of CPUs when `parallel` is zero or less.
fn parallel_or_cpus(parallel: i64) -> usize {
    match usize::try_from(parallel) {
        Ok(n) if n > 0 => n,
        _ => available_parallelism().map_or(1, NonZeroUsize::get),
    }
}

fn mib_to_bytes(mib: i64) -> u64 {
    u64::try_from(mib).unwrap_or(0).saturating_mul(MIB)
}

fn millis(ms: i64) -> Duration {
    Duration::from_millis(u64::try_from(ms).unwrap_or(0))
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use tracing_test::traced_test;

    use super::*;

    fn cpus() -> usize {
        available_parallelism().map_or(1, NonZeroUsize::get)
    }

    fn scan(backup: BackupOptions) -> BackupServiceConfig {
        BackupServiceConfig {
            backup: Some(backup),
            ..Default::default()
        }
    }

    fn xdr(xdr: BackupXdrOptions) -> BackupServiceConfig {
        BackupServiceConfig {
            xdr: Some(xdr),
            ..Default::default()
        }
    }

    fn common(common: CommonOptions) -> BackupOptions {
        BackupOptions {
            common,
            ..Default::default()
        }
    }

    #[test]
    fn split_lists() {
        assert!(split_by_comma("").is_empty());
        assert_eq!(split_by_comma("a,b,c"), ["a", "b", "c"]);
        assert_eq!(split_by_comma("solo"), ["solo"]);
    }

    proptest! {
        #[test]
        fn split_then_join(items in proptest::collection::vec("[a-z0-9_]{1,8}", 0..8)) {
            let joined = items.join(",");
            prop_assert_eq!(split_by_comma(&joined), items);
        }

        #[test]
        fn bandwidth_is_mib(mib in 0i64..1_000_000) {
            let (config, _) = new_backup_configs(&scan(common(CommonOptions {
                bandwidth: mib,
                ..Default::default()
            })))
            .unwrap();
            prop_assert_eq!(config.bandwidth, mib as u64 * 1024 * 1024);
        }
    }

    #[test]
    fn racks() {
        assert_eq!(parse_racks("1,2,3").unwrap(), [1, 2, 3]);
        assert!(parse_racks("").unwrap().is_empty());
        assert_eq!(
            parse_racks("1,x").unwrap_err(),
            RackError::InvalidId("x".into())
        );
        assert_eq!(
            parse_racks("1000001").unwrap_err(),
            RackError::OutOfRange(1_000_001)
        );
    }

    #[test]
    fn dates() {
        let parsed = parse_date("2024-01-02_03:04:05").unwrap();
        assert_eq!(
            (parsed.year(), u8::from(parsed.month()), parsed.day()),
            (2024, 1, 2)
        );
        assert_eq!((parsed.hour(), parsed.minute(), parsed.second()), (3, 4, 5));
        assert!(parsed.offset().is_utc());
        assert_eq!(
            parse_date("2024-01-02").unwrap(),
            parse_date("2024-01-02_00:00:00").unwrap()
        );
        assert!(parse_date("invalid-date").is_err());
    }

    #[test]
    fn regular_backup() {
        let (config, xdr_config) = new_backup_configs(&scan(common(CommonOptions {
            namespace: "test-namespace".into(),
            parallel: 4,
            ..Default::default()
        })))
        .unwrap();
        assert!(xdr_config.is_none());
        assert_eq!(config.namespace, "test-namespace");
        assert_eq!(config.parallel_read, 4);
        assert_eq!(config.parallel_write, 4);
        assert!(config.metrics_enabled);
        assert_eq!(config.encoder, EncoderType::Asb);
        assert!(config.set_list.is_empty());
        assert!(config.bin_list.is_empty());
        assert!(config.encryption.is_none());
    }

    #[test]
    fn zero_parallel_uses_cpus() {
        let (config, _) = new_backup_configs(&scan(BackupOptions::default())).unwrap();
        assert_eq!(config.parallel_read, cpus());
    }

    #[test]
    fn stdout_writes_one_unlimited_stream() {
        let (config, _) = new_backup_configs(&scan(BackupOptions {
            output_file: "-".into(),
            file_limit: 1000,
            common: CommonOptions {
                parallel: 8,
                ..Default::default()
            },
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(config.file_limit, None);
        assert_eq!(config.parallel_write, 1);
        assert_eq!(config.parallel_read, 8);
    }

    #[test]
    fn all_backup_options() {
        let service = BackupServiceConfig {
            backup: Some(BackupOptions {
                common: CommonOptions {
                    namespace: "test-namespace".into(),
                    set_list: "set1,set2,set3".into(),
                    bin_list: "bin1,bin2,bin3".into(),
                    no_records: true,
                    no_indexes: true,
                    no_udfs: true,
                    records_per_second: 5000,
                    parallel: 8,
                    bandwidth: 100,
                    directory: "/tmp".into(),
                    ..Default::default()
                },
                file_limit: 100,
                compact: true,
                no_ttl_only: true,
                output_file_prefix: "backup-".into(),
                state_file_dst: "state.asb".into(),
                scan_page_size: 10000,
                ..Default::default()
            }),
            compression: CompressionOptions {
                mode: "zstd".into(),
                level: 3,
            },
            encryption: EncryptionOptions {
                mode: "aes256".into(),
                key_file: "key.pem".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let (config, _) = new_backup_configs(&service).unwrap();
        assert_eq!(config.set_list, ["set1", "set2", "set3"]);
        assert_eq!(config.bin_list, ["bin1", "bin2", "bin3"]);
        assert!(config.no_records && config.no_indexes && config.no_udfs);
        assert_eq!(config.records_per_second, 5000);
        assert_eq!(config.file_limit, Some(100 * 1024 * 1024));
        assert_eq!(config.bandwidth, 100 * 1024 * 1024);
        assert!(config.compact);
        assert!(config.no_ttl_only);
        assert_eq!(config.output_file_prefix, "backup-");
        assert_eq!(config.state_file.as_deref(), Some("/tmp/state.asb"));
        assert!(!config.continue_backup);
        assert_eq!(config.page_size, 10000);
        assert_eq!(
            config.compression,
            CompressionPolicy {
                mode: CompressionMode::Zstd,
                level: 3
            }
        );
        let encryption = config.encryption.unwrap();
        assert_eq!(encryption.mode, EncryptionMode::Aes256);
        assert_eq!(encryption.key_file.as_deref(), Some("key.pem"));
    }

    #[test]
    fn backup_destination_is_carried() {
        let (config, _) = new_backup_configs(&scan(common(CommonOptions {
            directory: "/backups/today".into(),
            ..Default::default()
        })))
        .unwrap();
        assert_eq!(config.directory.as_deref(), Some("/backups/today"));
        assert_eq!(config.output_file, None);

        let (config, _) = new_backup_configs(&scan(BackupOptions {
            output_file: "backup.asb".into(),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(config.directory, None);
        assert_eq!(config.output_file.as_deref(), Some("backup.asb"));
    }

    #[rstest]
    #[case::unlimited(0, None)]
    #[case::one_mib(1, Some(1024 * 1024))]
    #[case::saturates(u64::MAX, Some(u64::MAX))]
    fn file_limits(#[case] mib: u64, #[case] expected: Option<u64>) {
        let (config, _) = new_backup_configs(&scan(BackupOptions {
            file_limit: mib,
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(config.file_limit, expected);
    }

    #[test]
    fn xdr_file_limit_saturates() {
        let (_, xdr_config) = new_backup_configs(&xdr(BackupXdrOptions {
            namespace: "test".into(),
            file_limit: u64::MAX,
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(xdr_config.unwrap().file_limit, u64::MAX);
    }

    #[test]
    fn continue_backup() {
        let (config, _) = new_backup_configs(&scan(BackupOptions {
            common: CommonOptions {
                directory: "/backup/dir".into(),
                ..Default::default()
            },
            continue_from: "continue.state".into(),
            scan_page_size: 5000,
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(
            config.state_file.as_deref(),
            Some("/backup/dir/continue.state")
        );
        assert!(config.continue_backup);
        assert_eq!(config.page_size, 5000);
    }

    #[test]
    fn node_and_rack_lists() {
        let (config, _) = new_backup_configs(&scan(BackupOptions {
            node_list: "node1,node2,node3".into(),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(config.node_list, ["node1", "node2", "node3"]);

        let (config, _) = new_backup_configs(&scan(BackupOptions {
            rack_list: "1,2,3".into(),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(config.rack_list, [1, 2, 3]);

        let err = new_backup_configs(&scan(BackupOptions {
            rack_list: "invalid,rack,list".into(),
            ..Default::default()
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to parse racks: invalid rack id 'invalid'"
        );
    }

    #[rstest]
    #[case::before(
        BackupOptions { modified_before: "invalid-date".into(), ..Default::default() },
        "failed to parse modified before date"
    )]
    #[case::after(
        BackupOptions { modified_after: "invalid-date".into(), ..Default::default() },
        "failed to parse modified after date"
    )]
    fn bad_modified_dates(#[case] backup: BackupOptions, #[case] prefix: &str) {
        let message = new_backup_configs(&scan(backup)).unwrap_err().to_string();
        assert!(message.starts_with(prefix), "{message}");
    }

    #[test]
    fn modified_dates() {
        let (config, _) = new_backup_configs(&scan(BackupOptions {
            modified_before: "2024-01-01".into(),
            modified_after: "2023-06-01_12:00:00".into(),
            ..Default::default()
        }))
        .unwrap();
        assert!(config.modified_before.is_some());
        assert!(config.modified_after.is_some());
    }

    #[test]
    fn partition_list_and_digest() {
        let (config, _) = new_backup_configs(&scan(BackupOptions {
            partition_list: "0-1000,1000-3000".into(),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(
            config.partition_filters,
            [
                PartitionFilter::range(0, 1000),
                PartitionFilter::range(1000, 3000)
            ]
        );

        let err = new_backup_configs(&scan(BackupOptions {
            partition_list: "0-10,5-10".into(),
            ..Default::default()
        }))
        .unwrap_err();
        assert!(matches!(err, AssembleError::PartitionFilters(_)));

        let err = new_backup_configs(&scan(BackupOptions {
            after_digest: "???".into(),
            ..Default::default()
        }))
        .unwrap_err();
        assert!(matches!(err, AssembleError::AfterDigest(_)));
    }

    #[test]
    fn unknown_compression_mode() {
        let service = BackupServiceConfig {
            compression: CompressionOptions {
                mode: "lz4".into(),
                level: 1,
            },
            ..scan(BackupOptions::default())
        };
        assert_eq!(
            new_backup_configs(&service).unwrap_err().to_string(),
            "unsupported compression mode \"lz4\""
        );
    }

    #[test]
    fn xdr_backup() {
        let (config, xdr_config) = new_backup_configs(&xdr(BackupXdrOptions {
            namespace: "test-namespace".into(),
            directory: "xdr-dir".into(),
            parallel_write: 4,
            ..Default::default()
        }))
        .unwrap();
        let xdr_config = xdr_config.unwrap();
        assert!(config.no_records);
        assert_eq!(config.namespace, "test-namespace");
        assert_eq!(xdr_config.namespace, "test-namespace");
        assert_eq!(xdr_config.directory, "xdr-dir");
        assert_eq!(config.directory.as_deref(), Some("xdr-dir"));
        assert_eq!(xdr_config.parallel_write, 4);
        assert!(xdr_config.metrics_enabled);
        assert_eq!(xdr_config.encoder, EncoderType::Asbx);
    }

    #[test]
    fn xdr_defaults_and_timeouts() {
        let (_, xdr_config) = new_backup_configs(&xdr(BackupXdrOptions {
            namespace: "test-namespace".into(),
            read_timeout: 5000,
            write_timeout: 3000,
            info_poling_period: 1000,
            start_timeout: 10000,
            file_limit: 200,
            ..Default::default()
        }))
        .unwrap();
        let xdr_config = xdr_config.unwrap();
        assert_eq!(xdr_config.parallel_write, cpus());
        assert_eq!(xdr_config.read_timeout, Duration::from_millis(5000));
        assert_eq!(xdr_config.write_timeout, Duration::from_millis(3000));
        assert_eq!(xdr_config.info_polling_period, Duration::from_millis(1000));
        assert_eq!(xdr_config.start_timeout, Duration::from_millis(10000));
        assert_eq!(xdr_config.file_limit, 200 * 1024 * 1024);
    }

    #[test]
    fn scan_wins_when_both_are_set() {
        let service = BackupServiceConfig {
            xdr: Some(BackupXdrOptions::default()),
            ..scan(BackupOptions::default())
        };
        let (_, xdr_config) = new_backup_configs(&service).unwrap();
        assert!(xdr_config.is_none());
    }

    #[test]
    fn nothing_to_back_up() {
        assert!(matches!(
            new_backup_configs(&BackupServiceConfig::default()),
            Err(AssembleError::NothingToBackUp)
        ));
    }

    fn restore(restore: RestoreOptions) -> RestoreServiceConfig {
        RestoreServiceConfig {
            restore,
            ..Default::default()
        }
    }

    #[test]
    fn default_restore() {
        let config = new_restore_config(&restore(RestoreOptions::default())).unwrap();
        assert_eq!(config.parallel, cpus());
        assert!(config.metrics_enabled);
        assert_eq!(config.bandwidth, 0);
        assert!(!config.validate_only);
        assert_eq!(
            config.write_policy.record_exists_action,
            RecordExistsAction::Update
        );
        assert_eq!(
            config.write_policy.generation_policy,
            GenerationPolicy::ExpectGenGt
        );
    }

    #[test]
    fn restore_options_carry_over() {
        let config = new_restore_config(&restore(RestoreOptions {
            common: CommonOptions {
                namespace: "source,destination".into(),
                set_list: "set1,set2,set3".into(),
                records_per_second: 1000,
                parallel: 4,
                bandwidth: 50,
                ..Default::default()
            },
            extra_ttl: 3600,
            ignore_record_error: true,
            disable_batch_writes: true,
            batch_size: 128,
            max_async_batches: 32,
            unique: true,
            no_generation: true,
            retry_base_interval: 1000,
            retry_multiplier: 2.0,
            retry_max_attempts: 5,
            apply_metadata_last: true,
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(
            config.namespace,
            RestoreNamespace {
                source: "source".into(),
                destination: "destination".into()
            }
        );
        assert_eq!(config.set_list.len(), 3);
        assert_eq!(config.records_per_second, 1000);
        assert_eq!(config.parallel, 4);
        assert_eq!(config.bandwidth, 50 * 1024 * 1024);
        assert_eq!(config.extra_ttl, 3600);
        assert_eq!(config.batch_size, 128);
        assert_eq!(config.max_async_batches, 32);
        assert_eq!(
            config.write_policy.record_exists_action,
            RecordExistsAction::CreateOnly
        );
        assert_eq!(config.write_policy.generation_policy, GenerationPolicy::None);
        assert_eq!(config.retry_policy, new_retry_policy(1000, 2.0, 5));
        assert!(config.apply_metadata_last);
    }

    #[rstest]
    #[case::empty("", "/backups", &[])]
    #[case::with_parent("a,b", "/backups", &["/backups/a", "/backups/b"])]
    #[case::no_parent("a,b", "", &["a", "b"])]
    fn directory_lists(#[case] list: &str, #[case] parent: &str, #[case] expected: &[&str]) {
        assert_eq!(new_directory_list(list, parent), expected);
    }

    #[test]
    fn restore_sources_are_carried() {
        let config = new_restore_config(&restore(RestoreOptions {
            directory_list: "a,b".into(),
            parent_directory: "/backups".into(),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(config.directory_list, ["/backups/a", "/backups/b"]);
        assert_eq!(config.directory, None);
        assert_eq!(config.input_file, None);

        let config = new_restore_config(&restore(RestoreOptions {
            input_file: "-".into(),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(config.input_file.as_deref(), Some("-"));
        assert!(config.directory_list.is_empty());

        let config = new_restore_config(&restore(RestoreOptions {
            common: CommonOptions {
                directory: "/backups/today".into(),
                ..Default::default()
            },
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(config.directory.as_deref(), Some("/backups/today"));
    }

    #[test]
    fn replace_beats_unique() {
        let config = new_restore_config(&restore(RestoreOptions {
            replace: true,
            unique: true,
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(
            config.write_policy.record_exists_action,
            RecordExistsAction::Replace
        );
    }

    #[test]
    fn one_namespace_is_both_ends() {
        assert_eq!(
            new_restore_namespace("test"),
            RestoreNamespace {
                source: "test".into(),
                destination: "test".into()
            }
        );
    }

    #[test]
    fn retry_policy_is_unchanged() {
        let policy = new_retry_policy(1500, 1.5, 7);
        assert_eq!(policy.base_timeout, Duration::from_millis(1500));
        assert_eq!(policy.multiplier, 1.5);
        assert_eq!(policy.max_retries, 7);
    }

    #[rstest]
    #[case("", "NONE")]
    #[case("none", "NONE")]
    #[case("None", "NONE")]
    #[case("AES256", "AES256")]
    fn encryption_summaries(#[case] mode: &str, #[case] expected: &str) {
        let encryption = EncryptionOptions {
            mode: mode.into(),
            ..Default::default()
        };
        assert_eq!(encryption_summary(&encryption), expected);
    }

    #[rstest]
    #[case("", 3, "NONE")]
    #[case("NONE", 3, "NONE")]
    #[case("ZSTD", 3, "ZSTD level 3")]
    fn compression_summaries(#[case] mode: &str, #[case] level: i64, #[case] expected: &str) {
        let compression = CompressionOptions {
            mode: mode.into(),
            level,
        };
        assert_eq!(compression_summary(&compression), expected);
    }

    #[test]
    #[traced_test]
    fn restore_summary_is_logged() {
        new_restore_config(&restore(RestoreOptions::default())).unwrap();
        assert!(logs_contain("initialized restore config"));
    }

    #[test]
    #[traced_test]
    fn validate_only_restore_is_quiet() {
        new_restore_config(&restore(RestoreOptions {
            validate_only: true,
            ..Default::default()
        }))
        .unwrap();
        assert!(!logs_contain("initialized restore config"));
    }
}
