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

//! asbackup error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::assemble::AssembleError;
use crate::clients::ClientError;
use crate::secrets::SecretError;
use crate::validate::ValidationError;
use crate::yaml::ConfigFileError;

/// Any error from preparing a backup or restore.
///
/// All of these are configuration problems: none are retried, and each one
/// stops the run before the engine is invoked.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Assemble(#[from] AssembleError),

    #[error(transparent)]
    ConfigFile(#[from] ConfigFileError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Failed to serialize engine configuration")]
    SerializeJson {
        #[from]
        source: serde_json::Error,
    },

    #[error("invalid log level {0:?}")]
    LogLevel(String),

    #[error("failed to open log file {path:?}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("tracing is already enabled")]
    TracingAlreadyEnabled,

    #[error(transparent)]
    IOError {
        #[from]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
