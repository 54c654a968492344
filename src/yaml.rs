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

//! Read and write YAML configuration files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::dto::{BackupConfigFile, DtoError, RestoreConfigFile};
use crate::service::{BackupServiceConfig, RestoreServiceConfig};

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("config path is empty")]
    EmptyPath,

    #[error("failed to open config file {}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to decode config file {}", .path.display())]
    Decode {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("failed to decode config file {}: unexpected EOF", .path.display())]
    EmptyFile { path: PathBuf },

    #[error("invalid value in config file {}", .path.display())]
    Convert { path: PathBuf, source: DtoError },

    #[error("failed to load config file {}", .path.display())]
    Load {
        path: PathBuf,
        source: Box<ConfigFileError>,
    },

    #[error("failed to encode config")]
    Encode { source: serde_yaml::Error },

    #[error("failed to write config file {}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

type Result<T> = std::result::Result<T, ConfigFileError>;

/// Read a backup configuration file, with defaults for every key it leaves out.
pub fn decode_backup_service_config(path: &Path) -> Result<BackupServiceConfig> {
    let file: BackupConfigFile = decode_from_file(path)?;
    file.to_service_config()
        .map_err(|source| ConfigFileError::Convert {
            path: path.to_owned(),
            source,
        })
}

/// Read a restore configuration file, with defaults for every key it leaves out.
pub fn decode_restore_service_config(path: &Path) -> Result<RestoreServiceConfig> {
    let file: RestoreConfigFile = decode_from_file(path)?;
    file.to_service_config()
        .map_err(|source| ConfigFileError::Convert {
            path: path.to_owned(),
            source,
        })
}

/// Decode any YAML file strictly: the target type decides whether unknown
/// keys are errors.
pub fn decode_from_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if path.as_os_str().is_empty() {
        return Err(ConfigFileError::EmptyPath);
    }
    let text = fs::read_to_string(path).map_err(|source| ConfigFileError::Open {
        path: path.to_owned(),
        source,
    })?;
    if text.trim().is_empty() {
        return Err(ConfigFileError::EmptyFile {
            path: path.to_owned(),
        });
    }
    let value = serde_yaml::from_str(&text).map_err(|source| ConfigFileError::Decode {
        path: path.to_owned(),
        source,
    })?;
    debug!(path = %path.display(), "decoded config file");
    Ok(value)
}

/// Write a value as YAML, replacing any existing file.
pub fn dump_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let text = serde_yaml::to_string(value).map_err(|source| ConfigFileError::Encode { source })?;
    fs::write(path, text).map_err(|source| ConfigFileError::Write {
        path: path.to_owned(),
        source,
    })
}
