// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Configuration handed to the backup engine.
//!
//! These are the engine's own terms: byte counts rather than MiB, durations
//! rather than milliseconds, parsed lists rather than comma-joined strings.
//! They're built by [crate::assemble] and serialize to JSON for inspection.

use std::time::Duration;

use serde::{Serialize, Serializer};
use strum_macros::{Display, EnumString};
use time::OffsetDateTime;

use crate::partition::PartitionFilter;

/// Serialize a [Duration] as whole milliseconds.
pub(crate) fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

/// How failed operations are retried.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetryPolicy {
    /// Delay before the first retry.
    #[serde(rename = "base_timeout_ms", serialize_with = "as_millis")]
    pub base_timeout: Duration,
    /// Each later delay is the previous one times this.
    pub multiplier: f64,
    pub max_retries: u32,
}

/// Limits on info commands sent to cluster nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPolicy {
    #[serde(rename = "timeout_ms", serialize_with = "as_millis")]
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanPolicy {
    pub max_retries: i64,
    /// Zero means no limit.
    #[serde(rename = "total_timeout_ms", serialize_with = "as_millis")]
    pub total_timeout: Duration,
    #[serde(rename = "socket_timeout_ms", serialize_with = "as_millis")]
    pub socket_timeout: Duration,
    #[serde(rename = "sleep_between_retries_ms", serialize_with = "as_millis")]
    pub sleep_between_retries: Duration,
    /// Zero means the whole set.
    pub max_records: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompressionMode {
    None,
    Zstd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompressionPolicy {
    pub mode: CompressionMode,
    pub level: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum EncryptionMode {
    None,
    Aes128,
    Aes256,
}

/// Where the encryption key comes from: exactly one of the sources is
/// normally set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncryptionPolicy {
    pub mode: EncryptionMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_env: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretAgentConfig {
    pub connection_type: String,
    pub address: String,
    pub port: i64,
    #[serde(rename = "timeout_ms", serialize_with = "as_millis")]
    pub timeout: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_file: Option<String>,
    pub is_base64: bool,
}

/// Backup file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum EncoderType {
    /// Text records, from a scan.
    Asb,
    /// Binary change records, from XDR.
    Asbx,
}

/// A scan backup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackupConfig {
    pub namespace: String,
    /// Where backup files are written, unless `output_file` is set.
    pub directory: Option<String>,
    /// A single output file, or `-` for stdout.
    pub output_file: Option<String>,
    pub set_list: Vec<String>,
    pub bin_list: Vec<String>,
    pub node_list: Vec<String>,
    pub rack_list: Vec<i64>,
    pub partition_filters: Vec<PartitionFilter>,
    pub parallel_read: usize,
    pub parallel_write: usize,
    pub records_per_second: i64,
    /// Bytes per second; zero is unlimited.
    pub bandwidth: u64,
    /// Bytes per output file, or no limit.
    pub file_limit: Option<u64>,
    pub no_records: bool,
    pub no_indexes: bool,
    pub no_udfs: bool,
    pub no_bins: bool,
    pub no_ttl_only: bool,
    pub compact: bool,
    pub output_file_prefix: String,
    pub modified_before: Option<OffsetDateTime>,
    pub modified_after: Option<OffsetDateTime>,
    /// Base64 encoded filter expression.
    pub filter_expression: Option<String>,
    pub state_file: Option<String>,
    pub continue_backup: bool,
    pub page_size: i64,
    pub scan_policy: ScanPolicy,
    pub info_policy: InfoPolicy,
    pub compression: CompressionPolicy,
    pub encryption: Option<EncryptionPolicy>,
    pub secret_agent: Option<SecretAgentConfig>,
    pub encoder: EncoderType,
    pub metrics_enabled: bool,
}

/// A change-stream backup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XdrConfig {
    pub namespace: String,
    pub directory: String,
    pub dc: String,
    pub local_address: String,
    pub local_port: i64,
    pub rewind: String,
    pub forward: bool,
    pub max_throughput: i64,
    pub parallel_write: usize,
    /// Bytes per output file.
    pub file_limit: u64,
    #[serde(rename = "read_timeout_ms", serialize_with = "as_millis")]
    pub read_timeout: Duration,
    #[serde(rename = "write_timeout_ms", serialize_with = "as_millis")]
    pub write_timeout: Duration,
    #[serde(rename = "info_polling_period_ms", serialize_with = "as_millis")]
    pub info_polling_period: Duration,
    #[serde(rename = "start_timeout_ms", serialize_with = "as_millis")]
    pub start_timeout: Duration,
    pub result_queue_size: i64,
    pub ack_queue_size: i64,
    pub max_connections: i64,
    pub info_policy: InfoPolicy,
    pub compression: CompressionPolicy,
    pub encryption: Option<EncryptionPolicy>,
    pub secret_agent: Option<SecretAgentConfig>,
    pub encoder: EncoderType,
    pub metrics_enabled: bool,
}

/// What happens when a restored record already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordExistsAction {
    Update,
    Replace,
    CreateOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationPolicy {
    None,
    /// Only overwrite records older than the backup copy.
    ExpectGenGt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WritePolicy {
    pub record_exists_action: RecordExistsAction,
    pub generation_policy: GenerationPolicy,
    #[serde(rename = "total_timeout_ms", serialize_with = "as_millis")]
    pub total_timeout: Duration,
    #[serde(rename = "socket_timeout_ms", serialize_with = "as_millis")]
    pub socket_timeout: Duration,
    pub max_retries: i64,
    pub send_key: bool,
}

/// Restore from one namespace into another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreNamespace {
    pub source: String,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestoreConfig {
    pub namespace: RestoreNamespace,
    pub directory: Option<String>,
    /// A single backup file, or `-` for stdin.
    pub input_file: Option<String>,
    /// Backup directories, already joined onto the parent directory.
    pub directory_list: Vec<String>,
    pub set_list: Vec<String>,
    pub bin_list: Vec<String>,
    pub no_records: bool,
    pub no_indexes: bool,
    pub no_udfs: bool,
    pub records_per_second: i64,
    pub parallel: usize,
    pub write_policy: WritePolicy,
    /// Bytes per second; zero is unlimited.
    pub bandwidth: u64,
    /// Seconds.
    pub extra_ttl: i64,
    pub ignore_record_error: bool,
    pub disable_batch_writes: bool,
    pub batch_size: i64,
    pub max_async_batches: i64,
    pub warm_up: i64,
    pub info_policy: InfoPolicy,
    pub compression: CompressionPolicy,
    pub encryption: Option<EncryptionPolicy>,
    pub secret_agent: Option<SecretAgentConfig>,
    pub retry_policy: RetryPolicy,
    pub validate_only: bool,
    pub apply_metadata_last: bool,
    pub metrics_enabled: bool,
}
