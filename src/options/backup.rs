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

//! Options for a scan backup.

use super::{is_std_placeholder, CommonOptions};
use crate::validate::{self, ValidationError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackupOptions {
    pub common: CommonOptions,

    pub output_file: String,
    pub output_file_prefix: String,
    pub remove_files: bool,
    pub remove_artifacts: bool,
    pub modified_before: String,
    pub modified_after: String,
    /// MiB; 0 means files are never rotated.
    pub file_limit: u64,
    /// Base64 digest to resume scanning after.
    pub after_digest: String,
    pub max_records: i64,
    pub no_bins: bool,
    /// Milliseconds.
    pub sleep_between_retries: i64,
    /// Base64 encoded filter expression.
    pub filter_expression: String,
    pub compact: bool,
    pub node_list: String,
    pub no_ttl_only: bool,
    pub prefer_racks: String,
    pub partition_list: String,
    pub rack_list: String,
    pub estimate: bool,
    pub estimate_samples: i64,
    /// State file name to write, relative to the directory.
    pub state_file_dst: String,
    /// State file name to resume from, relative to the directory.
    pub continue_from: String,
    pub scan_page_size: i64,
}

impl BackupOptions {
    /// True if the destination should be emptied before writing.
    ///
    /// Never when resuming, because the existing files are part of the backup.
    pub fn should_clear_target(&self) -> bool {
        (self.remove_files || self.remove_artifacts) && self.continue_from.is_empty()
    }

    pub fn should_save_state(&self) -> bool {
        !self.state_file_dst.is_empty() || !self.continue_from.is_empty()
    }

    pub fn is_stdout(&self) -> bool {
        is_std_placeholder(&self.output_file)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::validate_backup_destination(self)?;
        validate::validate_backup_filters(self)?;
        validate::validate_continuation(self)?;
        validate::validate_estimate_constraints(self)?;
        self.common.validate()
    }
}
