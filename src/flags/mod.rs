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

//! Command-line flags, grouped the same way as [crate::options].
//!
//! Each group is a clap `Args` struct that converts into its option record.
//! [BackupArgs], [BackupXdrArgs] and [RestoreArgs] gather the groups used by
//! each subcommand.

use clap::{Args, Command};

use crate::options::Operation;
use crate::service::{BackupServiceConfig, RestoreServiceConfig};
use crate::validate::ValidationError;

mod app;
mod backup;
mod cluster;
mod common;
mod restore;
mod security;
mod storage;
mod xdr;

pub use app::AppFlags;
pub use backup::BackupFlags;
pub use cluster::ClusterFlags;
pub use common::CommonFlags;
pub use restore::RestoreFlags;
pub use security::{CompressionFlags, EncryptionFlags, SecretAgentFlags};
pub use storage::{AzureFlags, GcsFlags, LocalFlags, S3Flags};
pub use xdr::BackupXdrFlags;

/// Set the help text and defaults of the shared flags that read differently
/// for backup and restore.
pub fn describe(command: Command, operation: Operation) -> Command {
    let (parallel_default, total_timeout_default) = match operation {
        Operation::Backup => ("1", "0"),
        Operation::Restore => ("0", "10000"),
    };
    let (directory, namespace, parallel, bandwidth) = match operation {
        Operation::Backup => (
            "Directory to write backup files into.",
            "Namespace to back up.",
            "Number of partition scans to run at once.",
            "Limit reads to this many MiB per second; 0 is unlimited.",
        ),
        Operation::Restore => (
            "Directory holding the backup files to restore.",
            "Namespace to restore, or `source,destination` to restore into another namespace.",
            "Number of restore workers; 0 uses the number of CPUs.",
            "Limit writes to this many MiB per second; 0 is unlimited.",
        ),
    };
    let total_timeout = match operation {
        Operation::Backup => "Total scan timeout in milliseconds; 0 is no limit.",
        Operation::Restore => "Total write timeout in milliseconds; 0 is no limit.",
    };
    command
        .mut_arg("directory", |arg| arg.help(directory))
        .mut_arg("namespace", |arg| arg.help(namespace))
        .mut_arg("parallel", |arg| {
            arg.help(parallel).default_value(parallel_default)
        })
        .mut_arg("bandwidth", |arg| arg.help(bandwidth))
        .mut_arg("total_timeout", |arg| {
            arg.help(total_timeout)
                .default_value(total_timeout_default)
        })
}

/// Flags for a scan backup.
#[derive(Debug, Clone, Args)]
pub struct BackupArgs {
    #[command(flatten)]
    pub app: AppFlags,
    #[command(flatten)]
    pub cluster: ClusterFlags,
    #[command(flatten)]
    pub common: CommonFlags,
    #[command(flatten)]
    pub backup: BackupFlags,
    #[command(flatten)]
    pub compression: CompressionFlags,
    #[command(flatten)]
    pub encryption: EncryptionFlags,
    #[command(flatten)]
    pub secret_agent: SecretAgentFlags,
    #[command(flatten)]
    pub s3: S3Flags,
    #[command(flatten)]
    pub gcs: GcsFlags,
    #[command(flatten)]
    pub azure: AzureFlags,
    #[command(flatten)]
    pub local: LocalFlags,
}

impl BackupArgs {
    pub fn to_service_config(&self) -> Result<BackupServiceConfig, ValidationError> {
        Ok(BackupServiceConfig {
            app: self.app.to_options(),
            cluster: self.cluster.to_options()?,
            client_policy: self.cluster.to_client_policy(),
            backup: Some(self.backup.to_options(self.common.to_options())),
            xdr: None,
            compression: self.compression.to_options(),
            encryption: self.encryption.to_options(),
            secret_agent: self.secret_agent.to_options(),
            s3: self.s3.to_options(),
            gcs: self.gcs.to_options(),
            azure: self.azure.to_options(),
            local: self.local.to_options(),
        })
    }
}

/// Flags for a change-stream backup.
#[derive(Debug, Clone, Args)]
pub struct BackupXdrArgs {
    #[command(flatten)]
    pub app: AppFlags,
    #[command(flatten)]
    pub cluster: ClusterFlags,
    #[command(flatten)]
    pub xdr: BackupXdrFlags,
    #[command(flatten)]
    pub compression: CompressionFlags,
    #[command(flatten)]
    pub encryption: EncryptionFlags,
    #[command(flatten)]
    pub secret_agent: SecretAgentFlags,
    #[command(flatten)]
    pub s3: S3Flags,
    #[command(flatten)]
    pub gcs: GcsFlags,
    #[command(flatten)]
    pub azure: AzureFlags,
    #[command(flatten)]
    pub local: LocalFlags,
}

impl BackupXdrArgs {
    pub fn to_service_config(&self) -> Result<BackupServiceConfig, ValidationError> {
        Ok(BackupServiceConfig {
            app: self.app.to_options(),
            cluster: self.cluster.to_options()?,
            client_policy: self.cluster.to_client_policy(),
            backup: None,
            xdr: Some(self.xdr.to_options()),
            compression: self.compression.to_options(),
            encryption: self.encryption.to_options(),
            secret_agent: self.secret_agent.to_options(),
            s3: self.s3.to_options(),
            gcs: self.gcs.to_options(),
            azure: self.azure.to_options(),
            local: self.local.to_options(),
        })
    }
}

/// Flags for a restore.
#[derive(Debug, Clone, Args)]
pub struct RestoreArgs {
    #[command(flatten)]
    pub app: AppFlags,
    #[command(flatten)]
    pub cluster: ClusterFlags,
    #[command(flatten)]
    pub common: CommonFlags,
    #[command(flatten)]
    pub restore: RestoreFlags,
    #[command(flatten)]
    pub compression: CompressionFlags,
    #[command(flatten)]
    pub encryption: EncryptionFlags,
    #[command(flatten)]
    pub secret_agent: SecretAgentFlags,
    #[command(flatten)]
    pub s3: S3Flags,
    #[command(flatten)]
    pub gcs: GcsFlags,
    #[command(flatten)]
    pub azure: AzureFlags,
    #[command(flatten)]
    pub local: LocalFlags,
}

impl RestoreArgs {
    pub fn to_service_config(&self) -> Result<RestoreServiceConfig, ValidationError> {
        Ok(RestoreServiceConfig {
            app: self.app.to_options(),
            cluster: self.cluster.to_options()?,
            client_policy: self.cluster.to_client_policy(),
            restore: self.restore.to_options(self.common.to_options()),
            compression: self.compression.to_options(),
            encryption: self.encryption.to_options(),
            secret_agent: self.secret_agent.to_options(),
            s3: self.s3.to_options(),
            gcs: self.gcs.to_options(),
            azure: self.azure.to_options(),
            local: self.local.to_options(),
        })
    }
}

#[cfg(test)]
mod test {
    use clap::{CommandFactory, FromArgMatches, Parser};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::defaults;

    #[derive(Debug, Parser)]
    #[command(disable_help_flag = true)]
    struct BackupCli {
        #[command(flatten)]
        args: BackupArgs,
    }

    #[derive(Debug, Parser)]
    #[command(disable_help_flag = true)]
    struct RestoreCli {
        #[command(flatten)]
        args: RestoreArgs,
    }

    #[derive(Debug, Parser)]
    #[command(disable_help_flag = true)]
    struct XdrCli {
        #[command(flatten)]
        args: BackupXdrArgs,
    }

    fn parse_backup(argv: &[&str]) -> BackupServiceConfig {
        let command = describe(BackupCli::command(), Operation::Backup);
        let matches = command
            .try_get_matches_from(std::iter::once("asbackup").chain(argv.iter().copied()))
            .unwrap();
        BackupCli::from_arg_matches(&matches)
            .unwrap()
            .args
            .to_service_config()
            .unwrap()
    }

    fn parse_restore(argv: &[&str]) -> RestoreServiceConfig {
        let command = describe(RestoreCli::command(), Operation::Restore);
        let matches = command
            .try_get_matches_from(std::iter::once("asbackup").chain(argv.iter().copied()))
            .unwrap();
        RestoreCli::from_arg_matches(&matches)
            .unwrap()
            .args
            .to_service_config()
            .unwrap()
    }

    #[test]
    fn clap_definitions_are_consistent() {
        describe(BackupCli::command(), Operation::Backup).debug_assert();
        describe(RestoreCli::command(), Operation::Restore).debug_assert();
        XdrCli::command().debug_assert();
    }

    #[test]
    fn backup_defaults_match_the_table() {
        let config = parse_backup(&["-n", "test", "-d", "out"]);
        let backup = config.backup.unwrap();
        assert_eq!(backup.common.parallel, defaults::backup::PARALLEL);
        assert_eq!(backup.common.total_timeout, defaults::backup::TOTAL_TIMEOUT);
        assert_eq!(backup.common.socket_timeout, defaults::common::SOCKET_TIMEOUT);
        assert_eq!(backup.file_limit, defaults::backup::FILE_LIMIT);
        assert_eq!(config.cluster.seeds[0].to_string(), "127.0.0.1:3000");
        assert_eq!(config.local.buffer_size, defaults::local::BUFFER_SIZE);
        assert_eq!(config.compression.mode, "NONE");
        assert_eq!(config.secret_agent, None);
        assert_eq!(config.app.log_level, defaults::app::LOG_LEVEL);
    }

    #[test]
    fn restore_defaults_match_the_table() {
        let config = parse_restore(&["-n", "test", "-d", "in"]);
        assert_eq!(config.restore.common.parallel, defaults::restore::PARALLEL);
        assert_eq!(
            config.restore.common.total_timeout,
            defaults::restore::TOTAL_TIMEOUT
        );
        assert_eq!(config.restore.batch_size, defaults::restore::BATCH_SIZE);
    }

    #[test]
    fn short_flags() {
        let config = parse_backup(&[
            "-h", "db1,db2:3100", "-p", "3200", "-U", "admin", "-P", "secret", "-n", "test",
            "-s", "set1,set2", "-B", "bin1", "-w", "8", "-R", "-L", "1000", "-N", "10", "-o",
            "out.asb", "-F", "100", "-x", "AAEC", "-v",
        ]);
        let seeds: Vec<String> = config.cluster.seeds.iter().map(ToString::to_string).collect();
        assert_eq!(seeds, ["db1:3200", "db2:3100"]);
        assert_eq!(config.cluster.user, "admin");
        assert_eq!(config.cluster.password, "secret");
        assert!(config.app.verbose);
        let backup = config.backup.unwrap();
        assert_eq!(backup.common.set_list, "set1,set2");
        assert_eq!(backup.common.bin_list, "bin1");
        assert_eq!(backup.common.parallel, 8);
        assert!(backup.common.no_records);
        assert_eq!(backup.common.records_per_second, 1000);
        assert_eq!(backup.common.bandwidth, 10);
        assert_eq!(backup.output_file, "out.asb");
        assert_eq!(backup.file_limit, 100);
        assert_eq!(backup.filter_expression, "AAEC");
    }

    #[test]
    fn restore_flags() {
        let config = parse_restore(&[
            "-n",
            "source,destination",
            "-i",
            "-",
            "--replace",
            "--no-generation",
            "--batch-size",
            "64",
        ]);
        assert!(config.is_stdin());
        assert!(config.restore.replace);
        assert!(config.restore.no_generation);
        assert_eq!(config.restore.batch_size, 64);
    }

    #[test]
    fn secret_agent_needs_an_address() {
        let config = parse_backup(&["-n", "test", "-d", "out", "--sa-port", "3005"]);
        assert_eq!(config.secret_agent, None);
        let config = parse_backup(&["-n", "test", "-d", "out", "--sa-address", "localhost"]);
        let agent = config.secret_agent.unwrap();
        assert_eq!(agent.address, "localhost");
        assert_eq!(agent.connection_type, defaults::secret_agent::CONNECTION_TYPE);
    }

    #[test]
    fn xdr_flags() {
        let matches = XdrCli::command()
            .try_get_matches_from(["asbackup", "-n", "test", "-d", "out", "--dc", "dc2"])
            .unwrap();
        let config = XdrCli::from_arg_matches(&matches)
            .unwrap()
            .args
            .to_service_config()
            .unwrap();
        assert!(config.is_xdr());
        let xdr = config.xdr.unwrap();
        assert_eq!(xdr.dc, "dc2");
        assert_eq!(xdr.rewind, defaults::xdr::REWIND);
        assert_eq!(xdr.local_port, defaults::xdr::LOCAL_PORT);
    }

    #[test]
    fn help_reads_differently_by_operation() {
        let backup = describe(BackupCli::command(), Operation::Backup);
        let restore = describe(RestoreCli::command(), Operation::Restore);
        let help = |command: &Command, id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_help())
                .map(ToString::to_string)
                .unwrap()
        };
        assert_eq!(help(&backup, "namespace"), "Namespace to back up.");
        assert!(help(&restore, "namespace").contains("source,destination"));
    }
}
