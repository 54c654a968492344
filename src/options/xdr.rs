// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Options for a change-stream (XDR) backup.

use crate::validate::ValidationError;

/// Longest accepted datacenter name, in bytes.
const MAX_DC_NAME_LEN: usize = 31;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackupXdrOptions {
    pub namespace: String,
    pub directory: String,
    pub remove_files: bool,
    /// MiB.
    pub file_limit: u64,
    /// 0 means one writer per CPU.
    pub parallel_write: i64,
    pub dc: String,
    pub forward: bool,
    pub local_address: String,
    pub local_port: i64,
    /// `all`, or a number of seconds.
    pub rewind: String,
    pub max_throughput: i64,
    /// Milliseconds.
    pub read_timeout: i64,
    /// Milliseconds.
    pub write_timeout: i64,
    pub result_queue_size: i64,
    pub ack_queue_size: i64,
    pub max_connections: i64,
    /// Milliseconds.
    pub info_poling_period: i64,
    /// Milliseconds.
    pub info_retry_interval: i64,
    pub info_retries_multiplier: f64,
    pub info_max_retries: u32,
    /// Milliseconds.
    pub start_timeout: i64,
    pub stop_xdr: bool,
    pub unblock_mrt: bool,
    /// Milliseconds.
    pub info_timeout: i64,
}

impl BackupXdrOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.namespace.is_empty() {
            return Err(ValidationError::Required("namespace"));
        }
        if self.directory.is_empty() {
            return Err(ValidationError::Required("directory"));
        }
        if !valid_rewind(&self.rewind) {
            return Err(ValidationError::InvalidRewind(self.rewind.clone()));
        }
        if !(0..=i64::from(u16::MAX)).contains(&self.local_port) {
            return Err(ValidationError::LocalPortOutOfRange(self.local_port));
        }
        if !valid_dc_name(&self.dc) {
            return Err(ValidationError::InvalidDcName(self.dc.clone()));
        }
        for (name, value) in [
            ("read timeout", self.read_timeout),
            ("write timeout", self.write_timeout),
            ("start timeout", self.start_timeout),
        ] {
            if value < 0 {
                return Err(ValidationError::Negative(name));
            }
        }
        if self.max_throughput % 100 != 0 {
            return Err(ValidationError::MaxThroughputGranularity(
                self.max_throughput,
            ));
        }
        Ok(())
    }
}

fn valid_rewind(rewind: &str) -> bool {
    rewind.eq_ignore_ascii_case("all") || rewind.parse::<u64>().is_ok_and(|secs| secs > 0)
}

fn valid_dc_name(dc: &str) -> bool {
    !dc.is_empty()
        && dc.len() <= MAX_DC_NAME_LEN
        && dc
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'$')
}
