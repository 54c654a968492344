// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Flags shared by backup and restore.
//!
//! Help and defaults for some of these are set per operation by
//! [super::describe].

use clap::Args;

use crate::defaults::{self, common};
use crate::options::CommonOptions;

#[derive(Debug, Clone, Args)]
pub struct CommonFlags {
    #[arg(long, short = 'd', default_value = "")]
    pub directory: String,

    #[arg(long, short = 'n', default_value = "")]
    pub namespace: String,

    /// Comma-separated set names.
    #[arg(long, short = 's', default_value = "")]
    pub set_list: String,

    /// Comma-separated bin names.
    #[arg(long, short = 'B', default_value = "")]
    pub bin_list: String,

    #[arg(long, short = 'w', default_value_t = defaults::backup::PARALLEL)]
    pub parallel: i64,

    /// Skip records; only metadata is included.
    #[arg(long, short = 'R')]
    pub no_records: bool,

    /// Skip secondary index definitions.
    #[arg(long, short = 'I')]
    pub no_indexes: bool,

    /// Skip UDF modules.
    #[arg(long)]
    pub no_udfs: bool,

    /// Limit to this many records per second; 0 is unlimited.
    #[arg(long, short = 'L', default_value_t = common::RECORDS_PER_SECOND)]
    pub records_per_second: i64,

    /// Retries for each failed read or write.
    #[arg(long, default_value_t = common::MAX_RETRIES)]
    pub max_retries: i64,

    #[arg(long, default_value_t = defaults::backup::TOTAL_TIMEOUT)]
    pub total_timeout: i64,

    /// Socket idle timeout in milliseconds.
    #[arg(long, default_value_t = common::SOCKET_TIMEOUT)]
    pub socket_timeout: i64,

    #[arg(long, short = 'N', default_value_t = common::BANDWIDTH)]
    pub bandwidth: i64,

    /// Timeout for info commands in milliseconds.
    #[arg(long, short = 'T', default_value_t = common::INFO_TIMEOUT)]
    pub info_timeout: i64,

    #[arg(long, default_value_t = common::INFO_MAX_RETRIES)]
    pub info_max_retries: u32,

    /// Each info retry waits this many times longer than the last.
    #[arg(long, default_value_t = common::INFO_RETRIES_MULTIPLIER)]
    pub info_retry_multiplier: f64,

    /// Wait before the first info retry, in milliseconds.
    #[arg(long, default_value_t = common::INFO_RETRY_INTERVAL)]
    pub info_retry_interval: i64,

    /// Buffer for standard input or output, in MiB.
    #[arg(long, default_value_t = common::STD_BUFFER_SIZE)]
    pub std_buffer_size: i64,
}

impl CommonFlags {
    pub fn to_options(&self) -> CommonOptions {
        CommonOptions {
            directory: self.directory.clone(),
            namespace: self.namespace.clone(),
            set_list: self.set_list.clone(),
            bin_list: self.bin_list.clone(),
            parallel: self.parallel,
            no_records: self.no_records,
            no_indexes: self.no_indexes,
            no_udfs: self.no_udfs,
            records_per_second: self.records_per_second,
            max_retries: self.max_retries,
            total_timeout: self.total_timeout,
            socket_timeout: self.socket_timeout,
            bandwidth: self.bandwidth,
            info_timeout: self.info_timeout,
            info_max_retries: self.info_max_retries,
            info_retries_multiplier: self.info_retry_multiplier,
            info_retry_interval: self.info_retry_interval,
            std_buffer_size: self.std_buffer_size,
        }
    }
}
