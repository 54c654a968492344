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

//! Plain option records, one per concern.
//!
//! These are filled either from command-line flags ([crate::flags]) or from
//! a YAML file ([crate::dto]). `Default` gives all-zero values, like an
//! unset field; the tool's real defaults live in [crate::defaults] and are
//! applied by those two layers.

use derive_more::Display;

mod backup;
mod cluster;
mod common;
mod restore;
mod security;
mod storage;
mod xdr;

pub use backup::BackupOptions;
pub use cluster::{AuthMode, ClientPolicy, ClusterOptions, HostTlsPort, TlsOptions};
pub use common::{AppOptions, CommonOptions};
pub use restore::RestoreOptions;
pub use security::{CompressionOptions, EncryptionOptions, SecretAgentOptions};
pub use storage::{
    AzureOptions, GcsOptions, LocalOptions, Provider, S3Options, StorageCommon, StorageProblem,
};
pub use xdr::BackupXdrOptions;

/// Which direction data is moving.
///
/// Some flags have different help, defaults, or validation rules depending
/// on the operation.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    #[display(fmt = "backup")]
    Backup,
    #[display(fmt = "restore")]
    Restore,
}

impl Operation {
    pub fn is_backup(self) -> bool {
        self == Operation::Backup
    }
}

/// True if this file name means standard input or output.
pub fn is_std_placeholder(name: &str) -> bool {
    name == crate::defaults::STD_PLACEHOLDER
}
