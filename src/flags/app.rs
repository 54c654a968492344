// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

use std::path::PathBuf;

use clap::{ArgAction, Args};

use crate::defaults;
use crate::options::AppOptions;

#[derive(Debug, Clone, Args)]
pub struct AppFlags {
    /// Print help; `-h` is the host.
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Log at `--log-level`; otherwise at most info.
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Lowest level to log: debug, info, warn or error.
    #[arg(long, default_value = defaults::app::LOG_LEVEL)]
    pub log_level: String,

    /// Write console logs as JSON.
    #[arg(long)]
    pub log_json_console: bool,

    /// Read every setting from this YAML file instead of the command line.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl AppFlags {
    pub fn to_options(&self) -> AppOptions {
        AppOptions {
            verbose: self.verbose,
            log_level: self.log_level.clone(),
            log_json: self.log_json_console,
            config_file: self.config.clone(),
        }
    }
}
