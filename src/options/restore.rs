// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Options for a restore.

use super::{is_std_placeholder, CommonOptions};
use crate::validate::ValidationError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoreOptions {
    pub common: CommonOptions,

    pub input_file: String,
    /// Comma-separated directories, each holding a backup.
    pub directory_list: String,
    /// Prefix joined to every entry of `directory_list`.
    pub parent_directory: String,
    pub disable_batch_writes: bool,
    pub batch_size: i64,
    pub max_async_batches: i64,
    pub warm_up: i64,
    /// Seconds added to every record's TTL.
    pub extra_ttl: i64,
    pub ignore_record_error: bool,
    pub unique: bool,
    pub replace: bool,
    pub no_generation: bool,
    /// Milliseconds.
    pub retry_base_interval: i64,
    pub retry_multiplier: f64,
    pub retry_max_attempts: u32,
    pub validate_only: bool,
    pub apply_metadata_last: bool,
}

impl RestoreOptions {
    pub fn is_stdin(&self) -> bool {
        is_std_placeholder(&self.input_file)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let directory = !self.common.directory.is_empty();
        let input_file = !self.input_file.is_empty();
        let directory_list = !self.directory_list.is_empty();
        if !directory && !input_file && !directory_list {
            return Err(ValidationError::MissingRestoreSource);
        }
        if directory && input_file {
            return Err(ValidationError::ConflictingRestoreSource);
        }
        if directory_list && (directory || input_file) {
            return Err(ValidationError::ConflictingDirectoryList);
        }
        if !self.parent_directory.is_empty() && !directory_list {
            return Err(ValidationError::ParentWithoutDirectoryList);
        }
        self.common.validate()
    }
}
