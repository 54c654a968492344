// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

use clap::Args;

use crate::defaults::restore;
use crate::options::{CommonOptions, RestoreOptions};

/// Flags only used by a restore.
#[derive(Debug, Clone, Args)]
pub struct RestoreFlags {
    /// Restore from one backup file, or `-` for stdin.
    #[arg(long, short = 'i', default_value = "")]
    pub input_file: String,

    /// Comma-separated backup directories to restore together.
    #[arg(long, default_value = "")]
    pub directory_list: String,

    /// Parent of every directory in the directory list.
    #[arg(long, default_value = "")]
    pub parent_directory: String,

    /// Write records one at a time.
    #[arg(long)]
    pub disable_batch_writes: bool,

    #[arg(long, default_value_t = restore::BATCH_SIZE)]
    pub batch_size: i64,

    #[arg(long, default_value_t = restore::MAX_ASYNC_BATCHES)]
    pub max_async_batches: i64,

    /// Connections to open before writing; 0 is automatic.
    #[arg(long, default_value_t = restore::WARM_UP)]
    pub warm_up: i64,

    /// Seconds added to every record's TTL.
    #[arg(long, default_value_t = restore::EXTRA_TTL)]
    pub extra_ttl: i64,

    /// Skip records the server rejects, rather than failing.
    #[arg(long)]
    pub ignore_record_error: bool,

    /// Never overwrite existing records.
    #[arg(long)]
    pub unique: bool,

    /// Replace existing records entirely, rather than updating their bins.
    #[arg(long)]
    pub replace: bool,

    /// Overwrite records whatever their generation.
    #[arg(long)]
    pub no_generation: bool,

    /// Milliseconds before the first write retry.
    #[arg(long, default_value_t = restore::RETRY_BASE_INTERVAL)]
    pub retry_base_interval: i64,

    #[arg(long, default_value_t = restore::RETRY_MULTIPLIER)]
    pub retry_multiplier: f64,

    #[arg(long, default_value_t = restore::RETRY_MAX_ATTEMPTS)]
    pub retry_max_attempts: u32,

    /// Read and check the backup files without writing.
    #[arg(long)]
    pub validate_only: bool,

    /// Restore indexes and UDFs after the records.
    #[arg(long)]
    pub apply_metadata_last: bool,
}

impl RestoreFlags {
    pub fn to_options(&self, common: CommonOptions) -> RestoreOptions {
        RestoreOptions {
            common,
            input_file: self.input_file.clone(),
            directory_list: self.directory_list.clone(),
            parent_directory: self.parent_directory.clone(),
            disable_batch_writes: self.disable_batch_writes,
            batch_size: self.batch_size,
            max_async_batches: self.max_async_batches,
            warm_up: self.warm_up,
            extra_ttl: self.extra_ttl,
            ignore_record_error: self.ignore_record_error,
            unique: self.unique,
            replace: self.replace,
            no_generation: self.no_generation,
            retry_base_interval: self.retry_base_interval,
            retry_multiplier: self.retry_multiplier,
            retry_max_attempts: self.retry_max_attempts,
            validate_only: self.validate_only,
            apply_metadata_last: self.apply_metadata_last,
        }
    }
}
