// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Options shared by backup and restore.

use std::path::PathBuf;

use crate::validate::ValidationError;

/// Highest accepted `--parallel`.
const MAX_PARALLEL: i64 = 1024;

/// Application-level settings: logging and where configuration came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub verbose: bool,
    pub log_level: String,
    pub log_json: bool,
    /// If set, all other options are read from this YAML file.
    pub config_file: Option<PathBuf>,
}

/// Scan and write options with the same shape for backup and restore.
///
/// Some meanings differ by direction: for example `parallel` falls back to
/// the CPU count on restore, and `namespace` may be `source,destination` on
/// restore.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonOptions {
    pub directory: String,
    pub namespace: String,
    /// Comma-separated set names.
    pub set_list: String,
    /// Comma-separated bin names.
    pub bin_list: String,
    pub parallel: i64,
    pub no_records: bool,
    pub no_indexes: bool,
    pub no_udfs: bool,
    pub records_per_second: i64,
    pub max_retries: i64,
    /// Milliseconds.
    pub total_timeout: i64,
    /// Milliseconds.
    pub socket_timeout: i64,
    /// MiB per second; 0 is unlimited.
    pub bandwidth: i64,
    /// Milliseconds.
    pub info_timeout: i64,
    pub info_max_retries: u32,
    pub info_retries_multiplier: f64,
    /// Milliseconds.
    pub info_retry_interval: i64,
    /// MiB.
    pub std_buffer_size: i64,
}

impl CommonOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0..=MAX_PARALLEL).contains(&self.parallel) {
            return Err(ValidationError::ParallelOutOfRange(self.parallel));
        }
        if self.total_timeout < 0 {
            return Err(ValidationError::Negative("total timeout"));
        }
        if self.socket_timeout < 0 {
            return Err(ValidationError::Negative("socket timeout"));
        }
        if self.bandwidth < 0 {
            return Err(ValidationError::Negative("bandwidth"));
        }
        if self.records_per_second < 0 {
            return Err(ValidationError::Negative("records per second"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_common_options_are_valid() {
        assert!(CommonOptions::default().validate().is_ok());
    }

    #[test]
    fn parallel_is_bounded() {
        let common = CommonOptions {
            parallel: 1025,
            ..Default::default()
        };
        assert_eq!(
            common.validate().unwrap_err().to_string(),
            "parallel must be between 0 and 1024, not 1025"
        );
        let common = CommonOptions {
            parallel: 1024,
            ..Default::default()
        };
        assert!(common.validate().is_ok());
    }

    #[test]
    fn negative_timeouts_are_rejected() {
        let common = CommonOptions {
            socket_timeout: -1,
            ..Default::default()
        };
        assert_eq!(
            common.validate().unwrap_err().to_string(),
            "socket timeout must be non-negative"
        );
    }
}
