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

//! Build the database and cloud storage clients from validated options.
//!
//! Credential fields may be secret references, which are resolved here
//! before the client is built. Building a client doesn't contact the
//! service.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::assemble::RackError;
use crate::options::{AzureOptions, GcsOptions, Provider, S3Options};
use crate::secrets::{self, SecretError, SecretResolver};

pub mod aerospike;
pub mod azure;
pub mod gcs;
pub mod http;
#[cfg(feature = "s3")]
pub mod s3;

pub use aerospike::{new_aerospike_client, AerospikeClientConfig};
pub use azure::{new_azure_client, AzureBlobClient, AzureCredentialKind};
pub use gcs::{new_gcs_client, GcsClient};
pub use http::HttpTransport;
#[cfg(feature = "s3")]
pub use s3::{new_s3_client, S3Client};

/// A client could not be built; the source says why.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to create {provider} client")]
    Storage {
        provider: Provider,
        #[source]
        source: SetupError,
    },

    #[error("failed to create aerospike client")]
    Aerospike {
        #[source]
        source: SetupError,
    },
}

impl ClientError {
    fn storage(provider: Provider) -> impl FnOnce(SetupError) -> ClientError {
        move |source| ClientError::Storage { provider, source }
    }
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("at least one seed must be provided")]
    NoSeeds,

    #[error("failed to parse secret for {field}")]
    ParseSecret {
        field: &'static str,
        #[source]
        source: SecretError,
    },

    #[error("failed to load {field} from secret agent")]
    LoadSecret {
        field: &'static str,
        #[source]
        source: SecretError,
    },

    #[error("failed to parse racks")]
    Racks(#[from] RackError),

    #[error("{field} {value} is out of range")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("failed to read key file {path:?}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start async runtime")]
    Runtime(#[source] io::Error),

    #[error("invalid client setting: {0}")]
    Setting(String),

    #[error(transparent)]
    ObjectStore(#[from] object_store::Error),
}

type Result<T> = std::result::Result<T, SetupError>;

/// A client for wherever backup files are kept.
#[derive(Debug)]
pub enum StorageClient {
    #[cfg(feature = "s3")]
    S3(S3Client),
    Gcs(GcsClient),
    Azure(AzureBlobClient),
    /// Local files need no client.
    Local,
}

/// Build the client for `provider`, from its own options.
pub fn new_storage_client(
    provider: Provider,
    s3: &S3Options,
    gcs: &GcsOptions,
    azure: &AzureOptions,
    resolver: Option<&dyn SecretResolver>,
) -> std::result::Result<StorageClient, ClientError> {
    match provider {
        #[cfg(feature = "s3")]
        Provider::S3 => new_s3_client(s3, resolver).map(StorageClient::S3),
        #[cfg(not(feature = "s3"))]
        Provider::S3 => {
            let _ = s3;
            Err(ClientError::storage(Provider::S3)(SetupError::Setting(
                "asbackup was built without s3 support".to_owned(),
            )))
        }
        Provider::Gcs => new_gcs_client(gcs, resolver).map(StorageClient::Gcs),
        Provider::Azure => new_azure_client(azure, resolver).map(StorageClient::Azure),
        Provider::Local => Ok(StorageClient::Local),
    }
}

/// Resolve a credential-like field, naming it in the error.
fn load_secret(
    resolver: Option<&dyn SecretResolver>,
    field: &'static str,
    value: &str,
) -> Result<String> {
    secrets::parse_secret(resolver, value).map_err(|source| SetupError::LoadSecret { field, source })
}

/// Convert a non-negative count from the options.
fn to_usize(field: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| SetupError::OutOfRange { field, value })
}
