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

//! The YAML configuration file, as it's written on disk.
//!
//! Every field is optional: a key left out of the file takes the same
//! default as the matching command-line flag, from [crate::defaults].
//! Unknown keys are rejected when the file is decoded.

use thiserror::Error;

mod backup;
mod common;
mod restore;

pub use backup::{BackupConfigFile, BackupSection};
pub use common::{
    AppSection, AwsSection, AzureBlobSection, AzureSection, ClusterSection, CompressionSection,
    EncryptionSection, GcpSection, GcpStorageSection, LocalDiskSection, LocalSection,
    S3Section, SecretAgentSection, SeedSection, TlsSection,
};
pub use restore::{RestoreConfigFile, RestoreSection};

/// A value in the file that decoded but doesn't make sense.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DtoError {
    #[error("invalid auth mode {0:?}")]
    AuthMode(String),

    #[error("seed {index} has no host")]
    EmptySeedHost { index: usize },
}

/// Lists are written as YAML sequences but carried as comma-joined strings.
fn join_list(list: &Option<Vec<String>>) -> String {
    list.as_deref().unwrap_or_default().join(",")
}
