// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

use clap::Args;

use crate::defaults::xdr;
use crate::options::BackupXdrOptions;

/// Flags for a change-stream backup, which receives records from the
/// cluster's XDR replication rather than scanning.
#[derive(Debug, Clone, Args)]
pub struct BackupXdrFlags {
    #[arg(long, short = 'n', default_value = "")]
    pub namespace: String,

    /// Directory to write change files into.
    #[arg(long, short = 'd', default_value = "")]
    pub directory: String,

    /// Clear the directory before writing.
    #[arg(long, short = 'r')]
    pub remove_files: bool,

    /// Start a new file after this many MiB.
    #[arg(long, short = 'F', default_value_t = xdr::FILE_LIMIT)]
    pub file_limit: u64,

    /// File writers; 0 uses the number of CPUs.
    #[arg(long, default_value_t = xdr::PARALLEL_WRITE)]
    pub parallel_write: i64,

    /// Name of the XDR datacenter to create.
    #[arg(long, default_value = xdr::DC)]
    pub dc: String,

    /// Forward received changes on to other datacenters.
    #[arg(long)]
    pub forward: bool,

    /// Address the cluster sends changes to.
    #[arg(long, default_value = xdr::LOCAL_ADDRESS)]
    pub local_address: String,

    #[arg(long, default_value_t = xdr::LOCAL_PORT)]
    pub local_port: i64,

    /// Ship changes from this many seconds ago, or `all`.
    #[arg(long, default_value = xdr::REWIND)]
    pub rewind: String,

    /// Records per second, in multiples of 100; 0 is unlimited.
    #[arg(long, default_value_t = xdr::MAX_THROUGHPUT)]
    pub max_throughput: i64,

    /// Milliseconds.
    #[arg(long, default_value_t = xdr::READ_TIMEOUT)]
    pub read_timeout: i64,

    /// Milliseconds.
    #[arg(long, default_value_t = xdr::WRITE_TIMEOUT)]
    pub write_timeout: i64,

    #[arg(long, default_value_t = xdr::RESULT_QUEUE_SIZE)]
    pub results_queue_size: i64,

    #[arg(long, default_value_t = xdr::ACK_QUEUE_SIZE)]
    pub ack_queue_size: i64,

    /// Incoming connections to accept.
    #[arg(long, default_value_t = xdr::MAX_CONNECTIONS)]
    pub max_connections: i64,

    /// Milliseconds between checks of replication progress.
    #[arg(long, default_value_t = xdr::INFO_POLING_PERIOD)]
    pub info_poling_period: i64,

    #[arg(long, default_value_t = xdr::INFO_RETRY_INTERVAL)]
    pub info_retry_interval: i64,

    #[arg(long, default_value_t = xdr::INFO_RETRIES_MULTIPLIER)]
    pub info_retry_multiplier: f64,

    #[arg(long, default_value_t = xdr::INFO_MAX_RETRIES)]
    pub info_max_retries: u32,

    /// Milliseconds to wait for the cluster to connect.
    #[arg(long, default_value_t = xdr::START_TIMEOUT)]
    pub start_timeout: i64,

    /// Remove the XDR configuration left by an interrupted run, then stop.
    #[arg(long)]
    pub stop_xdr: bool,

    /// Unblock writes left blocked by an interrupted run, then stop.
    #[arg(long)]
    pub unblock_mrt: bool,

    #[arg(long, short = 'T', default_value_t = xdr::INFO_TIMEOUT)]
    pub info_timeout: i64,
}

impl BackupXdrFlags {
    pub fn to_options(&self) -> BackupXdrOptions {
        BackupXdrOptions {
            namespace: self.namespace.clone(),
            directory: self.directory.clone(),
            remove_files: self.remove_files,
            file_limit: self.file_limit,
            parallel_write: self.parallel_write,
            dc: self.dc.clone(),
            forward: self.forward,
            local_address: self.local_address.clone(),
            local_port: self.local_port,
            rewind: self.rewind.clone(),
            max_throughput: self.max_throughput,
            read_timeout: self.read_timeout,
            write_timeout: self.write_timeout,
            result_queue_size: self.results_queue_size,
            ack_queue_size: self.ack_queue_size,
            max_connections: self.max_connections,
            info_poling_period: self.info_poling_period,
            info_retry_interval: self.info_retry_interval,
            info_retries_multiplier: self.info_retry_multiplier,
            info_max_retries: self.info_max_retries,
            start_timeout: self.start_timeout,
            stop_xdr: self.stop_xdr,
            unblock_mrt: self.unblock_mrt,
            info_timeout: self.info_timeout,
        }
    }
}
