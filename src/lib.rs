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

//! asbackup: read backup and restore settings from the command line or a
//! YAML file, check them, and turn them into engine configuration and
//! client settings.
//!
//! The flow is flags or [yaml] into [service] configs, then
//! [service::BackupServiceConfig::validate], then [assemble], then
//! [clients]. Running the backup itself is left to the engine.

pub mod assemble;
pub mod clients;
pub mod defaults;
pub mod dto;
pub mod engine;
pub mod errors;
pub mod flags;
pub mod options;
pub mod partition;
pub mod progress;
pub mod secrets;
pub mod service;
pub mod stats;
mod trace_counter;
pub mod ui;
pub mod validate;
pub mod yaml;

pub use crate::assemble::{new_backup_configs, new_restore_config, AssembleError};
pub use crate::clients::ClientError;
pub use crate::engine::{BackupConfig, RestoreConfig, XdrConfig};
pub use crate::errors::{Error, Result};
pub use crate::options::Operation;
pub use crate::secrets::{parse_secret, SecretAgentClient, SecretError, SecretResolver};
pub use crate::service::{BackupServiceConfig, RestoreServiceConfig};
pub use crate::trace_counter::LogCounts;
pub use crate::validate::ValidationError;
pub use crate::yaml::ConfigFileError;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> &'static str {
    VERSION
}
