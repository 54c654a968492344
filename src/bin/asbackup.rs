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

//! Command-line entry point for asbackup.

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use serde::Serialize;
#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn, Level};

use asbackup::clients::{new_aerospike_client, new_storage_client, AerospikeClientConfig};
use asbackup::flags::{describe, BackupArgs, BackupXdrArgs, RestoreArgs};
use asbackup::options::{AppOptions, SecretAgentOptions};
use asbackup::ui::{self, TraceTimeStyle};
use asbackup::*;

#[derive(Debug, Parser)]
#[command(author, about, version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Show debug trace on stderr.
    #[arg(long, short = 'D', global = true)]
    debug: bool,

    /// Control timestamps prefixes on stderr.
    #[arg(long, value_enum, global = true, default_value_t = TraceTimeStyle::None)]
    trace_time: TraceTimeStyle,

    /// Append a json formatted log to this file.
    #[arg(long, global = true)]
    log_json: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Back up a namespace by scanning it.
    #[command(disable_help_flag = true)]
    Backup(BackupArgs),

    /// Back up changes as the cluster ships them over XDR.
    #[command(disable_help_flag = true)]
    BackupXdr(BackupXdrArgs),

    /// Restore backup files into a namespace.
    #[command(disable_help_flag = true)]
    Restore(RestoreArgs),
}

enum ExitCode {
    Success = 0,
    Failure = 1,
    NonFatalErrors = 2,
}

impl std::process::Termination for ExitCode {
    fn report(self) -> std::process::ExitCode {
        (self as u8).into()
    }
}

/// What a backup run would hand to the engine.
#[derive(Serialize)]
struct BackupPlan<'a> {
    client: &'a AerospikeClientConfig,
    storage: String,
    backup: &'a BackupConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    xdr: Option<&'a XdrConfig>,
}

/// What a restore run would hand to the engine.
#[derive(Serialize)]
struct RestorePlan<'a> {
    client: &'a AerospikeClientConfig,
    storage: String,
    restore: &'a RestoreConfig,
}

impl Command {
    /// App settings from the command line, used until a config file is read.
    fn app_flags(&self) -> AppOptions {
        match self {
            Command::Backup(args) => args.app.to_options(),
            Command::BackupXdr(args) => args.app.to_options(),
            Command::Restore(args) => args.app.to_options(),
        }
    }

    fn load(&self) -> Result<Service> {
        Ok(match self {
            Command::Backup(args) => {
                Service::Backup(BackupServiceConfig::new(args.to_service_config()?)?)
            }
            Command::BackupXdr(args) => {
                Service::Backup(BackupServiceConfig::new(args.to_service_config()?)?)
            }
            Command::Restore(args) => {
                Service::Restore(RestoreServiceConfig::new(args.to_service_config()?)?)
            }
        })
    }
}

enum Service {
    Backup(BackupServiceConfig),
    Restore(RestoreServiceConfig),
}

impl Service {
    fn app(&self) -> &AppOptions {
        match self {
            Service::Backup(service) => &service.app,
            Service::Restore(service) => &service.app,
        }
    }

    fn run(&self) -> Result<ExitCode> {
        let mut stdout = io::stdout().lock();
        match self {
            Service::Backup(service) => {
                service.validate()?;
                let (backup, xdr) = new_backup_configs(service)?;
                let resolver = secret_agent(service.secret_agent.as_ref())?;
                let resolver = resolver.as_ref().map(|r| r as &dyn SecretResolver);
                let racks = service
                    .backup
                    .as_ref()
                    .map_or("", |backup| backup.prefer_racks.as_str());
                let client = new_aerospike_client(
                    &service.cluster,
                    &service.client_policy,
                    racks,
                    0,
                    resolver,
                )?;
                let provider = service.storage_provider();
                if service.skip_writer_init() {
                    new_storage_client(
                        provider,
                        &service.s3,
                        &service.gcs,
                        &service.azure,
                        resolver,
                    )?;
                }
                if service.is_stop_xdr() || service.is_unblock_mrt() {
                    info!("cleanup requested; no backup will be written");
                }
                let plan = BackupPlan {
                    client: &client,
                    storage: provider.to_string(),
                    backup: &backup,
                    xdr: xdr.as_ref(),
                };
                serde_json::to_writer_pretty(&mut stdout, &plan)?;
            }
            Service::Restore(service) => {
                service.validate()?;
                let restore = new_restore_config(service)?;
                let resolver = secret_agent(service.secret_agent.as_ref())?;
                let resolver = resolver.as_ref().map(|r| r as &dyn SecretResolver);
                let client = new_aerospike_client(
                    &service.cluster,
                    &service.client_policy,
                    "",
                    service.restore.warm_up,
                    resolver,
                )?;
                let provider = service.storage_provider();
                new_storage_client(
                    provider,
                    &service.s3,
                    &service.gcs,
                    &service.azure,
                    resolver,
                )?;
                let plan = RestorePlan {
                    client: &client,
                    storage: provider.to_string(),
                    restore: &restore,
                };
                serde_json::to_writer_pretty(&mut stdout, &plan)?;
            }
        }
        writeln!(stdout)?;
        Ok(ExitCode::Success)
    }
}

fn secret_agent(options: Option<&SecretAgentOptions>) -> Result<Option<SecretAgentClient>> {
    Ok(options.map(SecretAgentClient::new).transpose()?)
}

fn main() -> Result<ExitCode> {
    let matches = Args::command()
        .mut_subcommand("backup", |c| describe(c, Operation::Backup))
        .mut_subcommand("restore", |c| describe(c, Operation::Restore))
        .get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    let start_time = Instant::now();

    // Logging follows the config file when there is one, so load it first.
    let service = args.command.load();
    let app = match &service {
        Ok(service) => service.app().clone(),
        Err(_) => args.command.app_flags(),
    };
    let _flush_guard = ui::enable_tracing(
        &args.trace_time,
        ui::console_level(&app, args.debug)?,
        app.log_json,
        &args.log_json,
    )?;
    debug!(version = asbackup::version(), "starting");

    let result = service.and_then(|service| service.run());
    debug!(elapsed = ?start_time.elapsed());
    let counts = LogCounts::now();
    match result {
        Err(err) => {
            error!("{err}");
            let mut err: &dyn Error = &err;
            while let Some(source) = err.source() {
                error!("caused by: {source}");
                err = source;
            }
            debug!(counts = ?LogCounts::now());
            Ok(ExitCode::Failure)
        }
        Ok(ExitCode::Success) if !counts.is_clean() => {
            debug!(?counts);
            Ok(ExitCode::NonFatalErrors)
        }
        Ok(exit_code) => Ok(exit_code),
    }
}

#[test]
fn verify_clap() {
    Args::command()
        .mut_subcommand("backup", |c| describe(c, Operation::Backup))
        .mut_subcommand("restore", |c| describe(c, Operation::Restore))
        .debug_assert()
}
