// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

use clap::Args;

use crate::defaults::backup;
use crate::options::{BackupOptions, CommonOptions};

/// Flags only used by a scan backup.
#[derive(Debug, Clone, Args)]
pub struct BackupFlags {
    /// Write one backup file here, or `-` for stdout.
    #[arg(long, short = 'o', default_value = "")]
    pub output_file: String,

    /// Prefix for backup file names in the directory.
    #[arg(long, default_value = "")]
    pub output_file_prefix: String,

    /// Clear the directory before writing.
    #[arg(long, short = 'r')]
    pub remove_files: bool,

    /// Remove backup files left in the directory, then stop.
    #[arg(long)]
    pub remove_artifacts: bool,

    /// Only records last changed before this time: `YYYY-MM-DD_HH:MM:SS` or `YYYY-MM-DD`.
    #[arg(long, default_value = "")]
    pub modified_before: String,

    /// Only records last changed after this time.
    #[arg(long, default_value = "")]
    pub modified_after: String,

    /// Start a new file after this many MiB.
    #[arg(long, short = 'F', default_value_t = backup::FILE_LIMIT)]
    pub file_limit: u64,

    /// Resume after the record with this base64 digest.
    #[arg(long, short = 'a', default_value = "")]
    pub after_digest: String,

    /// Back up at most this many records; 0 is all.
    #[arg(long, default_value_t = backup::MAX_RECORDS)]
    pub max_records: i64,

    /// Only record metadata, no bins.
    #[arg(long)]
    pub no_bins: bool,

    /// Milliseconds between scan retries.
    #[arg(long, default_value_t = backup::SLEEP_BETWEEN_RETRIES)]
    pub sleep_between_retries: i64,

    /// Base64 encoded filter expression.
    #[arg(long, short = 'x', default_value = "")]
    pub filter_exp: String,

    /// Don't base64 encode blob values.
    #[arg(long)]
    pub compact: bool,

    /// Comma-separated nodes to scan.
    #[arg(long, default_value = "")]
    pub node_list: String,

    /// Only records without a TTL.
    #[arg(long)]
    pub no_ttl_only: bool,

    /// Comma-separated rack ids to prefer when reading.
    #[arg(long, default_value = "")]
    pub prefer_racks: String,

    /// Comma-separated partition ranges, ids, or digests.
    #[arg(long, default_value = "")]
    pub partition_list: String,

    /// Comma-separated rack ids to scan.
    #[arg(long, default_value = "")]
    pub rack_list: String,

    /// Estimate the backup size from a sample, without writing anything.
    #[arg(long, short = 'e')]
    pub estimate: bool,

    #[arg(long, default_value_t = backup::ESTIMATE_SAMPLES)]
    pub estimate_samples: i64,

    /// Save progress to this file in the directory, so the backup can be continued.
    #[arg(long, default_value = "")]
    pub state_file_dst: String,

    /// Continue the backup recorded in this state file.
    #[arg(long = "continue", default_value = "")]
    pub continue_from: String,

    /// Records per scan page.
    #[arg(long, default_value_t = backup::SCAN_PAGE_SIZE)]
    pub scan_page_size: i64,
}

impl BackupFlags {
    pub fn to_options(&self, common: CommonOptions) -> BackupOptions {
        BackupOptions {
            common,
            output_file: self.output_file.clone(),
            output_file_prefix: self.output_file_prefix.clone(),
            remove_files: self.remove_files,
            remove_artifacts: self.remove_artifacts,
            modified_before: self.modified_before.clone(),
            modified_after: self.modified_after.clone(),
            file_limit: self.file_limit,
            after_digest: self.after_digest.clone(),
            max_records: self.max_records,
            no_bins: self.no_bins,
            sleep_between_retries: self.sleep_between_retries,
            filter_expression: self.filter_exp.clone(),
            compact: self.compact,
            node_list: self.node_list.clone(),
            no_ttl_only: self.no_ttl_only,
            prefer_racks: self.prefer_racks.clone(),
            partition_list: self.partition_list.clone(),
            rack_list: self.rack_list.clone(),
            estimate: self.estimate,
            estimate_samples: self.estimate_samples,
            state_file_dst: self.state_file_dst.clone(),
            continue_from: self.continue_from.clone(),
            scan_page_size: self.scan_page_size,
        }
    }
}
