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

//! Storage provider options: AWS S3, Google Cloud Storage, Azure Blob, and
//! local disk.

use derive_more::Display;
use thiserror::Error;

use super::Operation;
use crate::defaults;

/// A problem with the settings of one storage provider.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageProblem {
    #[error("bucket name is required")]
    MissingBucket,

    #[error("container name is required")]
    MissingContainer,

    #[error("{0} must be non-negative")]
    Negative(&'static str),

    #[error("{0} must be positive")]
    NotPositive(&'static str),

    #[error("restore poll duration can't be less than 1")]
    RestorePollDuration,

    #[error("buffer size can't be less than 1")]
    BufferSize,
}

type Result<T> = std::result::Result<T, StorageProblem>;

fn non_negative(value: i64, name: &'static str) -> Result<()> {
    if value < 0 {
        Err(StorageProblem::Negative(name))
    } else {
        Ok(())
    }
}

/// Names a storage provider in messages.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    #[display(fmt = "aws s3")]
    S3,
    #[display(fmt = "gcp storage")]
    Gcs,
    #[display(fmt = "azure blob")]
    Azure,
    #[display(fmt = "local disk")]
    Local,
}

/// Settings every cloud provider has.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageCommon {
    pub calculate_checksum: bool,
    /// Initial delay before re-reading an object after a connection error, in milliseconds.
    pub retry_read_backoff: i64,
    pub retry_read_multiplier: f64,
    pub retry_read_max_attempts: u32,
    /// 0 is unlimited.
    pub max_conns_per_host: i64,
    /// Milliseconds; 0 is unlimited.
    pub request_timeout: i64,
}

impl StorageCommon {
    /// Read retries are only used when restoring, so they're only checked then.
    pub fn validate(&self, operation: Operation) -> Result<()> {
        non_negative(self.max_conns_per_host, "max connections per host")?;
        non_negative(self.request_timeout, "request timeout")?;
        if operation == Operation::Restore {
            if self.retry_read_multiplier < 1.0 {
                return Err(StorageProblem::NotPositive("retry read multiplier"));
            }
            if self.retry_read_backoff < 1 {
                return Err(StorageProblem::NotPositive("retry read timeout"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct S3Options {
    pub bucket_name: String,
    pub region: String,
    pub profile: String,
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub storage_class: String,
    pub access_tier: String,
    pub retry_max_attempts: i64,
    /// Seconds.
    pub retry_max_backoff: i64,
    /// Seconds.
    pub retry_backoff: i64,
    /// MiB.
    pub chunk_size: i64,
    pub upload_concurrency: i64,
    /// Milliseconds between checks on an object being restored from an archive tier.
    pub restore_poll_duration: i64,
    pub common: StorageCommon,
}

impl S3Options {
    pub fn is_configured(&self) -> bool {
        !self.bucket_name.is_empty() || !self.endpoint.is_empty()
    }

    pub fn validate(&self, operation: Operation) -> Result<()> {
        if self.bucket_name.is_empty() {
            return Err(StorageProblem::MissingBucket);
        }
        non_negative(self.retry_max_attempts, "retry maximum attempts")?;
        non_negative(self.retry_max_backoff, "retry max backoff")?;
        non_negative(self.retry_backoff, "retry backoff")?;
        non_negative(self.chunk_size, "chunk size")?;
        if operation == Operation::Restore && self.restore_poll_duration < 1 {
            return Err(StorageProblem::RestorePollDuration);
        }
        self.common.validate(operation)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GcsOptions {
    /// Path to a service account JSON key.
    pub key_file: String,
    pub bucket_name: String,
    pub endpoint: String,
    pub retry_max_attempts: i64,
    /// Milliseconds.
    pub retry_backoff_max: i64,
    /// Milliseconds.
    pub retry_backoff_init: i64,
    pub retry_backoff_multiplier: f64,
    /// MiB.
    pub chunk_size: i64,
    pub common: StorageCommon,
}

impl GcsOptions {
    pub fn is_configured(&self) -> bool {
        !self.bucket_name.is_empty() || !self.endpoint.is_empty()
    }

    pub fn validate(&self, operation: Operation) -> Result<()> {
        if self.bucket_name.is_empty() {
            return Err(StorageProblem::MissingBucket);
        }
        non_negative(self.retry_max_attempts, "retry maximum attempts")?;
        non_negative(self.retry_backoff_max, "retry max backoff")?;
        non_negative(self.retry_backoff_init, "retry backoff")?;
        if self.retry_backoff_multiplier < 1.0 {
            return Err(StorageProblem::NotPositive("retry backoff multiplier"));
        }
        non_negative(self.chunk_size, "chunk size")?;
        self.common.validate(operation)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AzureOptions {
    pub account_name: String,
    pub account_key: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub endpoint: String,
    pub container_name: String,
    pub access_tier: String,
    /// MiB.
    pub block_size: i64,
    pub upload_concurrency: i64,
    /// Milliseconds between checks on a blob being rehydrated.
    pub restore_poll_duration: i64,
    pub retry_max_attempts: i64,
    /// Seconds allowed for any single try; 0 disables.
    pub retry_timeout: i64,
    /// Seconds.
    pub retry_delay: i64,
    /// Seconds.
    pub retry_max_delay: i64,
    pub common: StorageCommon,
}

impl AzureOptions {
    pub fn is_configured(&self) -> bool {
        !self.container_name.is_empty() || !self.endpoint.is_empty()
    }

    pub fn validate(&self, operation: Operation) -> Result<()> {
        if self.container_name.is_empty() {
            return Err(StorageProblem::MissingContainer);
        }
        non_negative(self.retry_max_attempts, "retry maximum attempts")?;
        non_negative(self.retry_timeout, "retry try timeout")?;
        non_negative(self.retry_delay, "retry delay")?;
        non_negative(self.retry_max_delay, "retry max delay")?;
        non_negative(self.block_size, "block size")?;
        if operation == Operation::Restore && self.restore_poll_duration < 1 {
            return Err(StorageProblem::RestorePollDuration);
        }
        self.common.validate(operation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalOptions {
    /// Write buffer, in MiB.
    pub buffer_size: i64,
}

impl Default for LocalOptions {
    fn default() -> LocalOptions {
        LocalOptions {
            buffer_size: defaults::local::BUFFER_SIZE,
        }
    }
}

impl LocalOptions {
    /// Only writes are buffered, so restores accept any size.
    pub fn validate(&self, operation: Operation) -> Result<()> {
        if operation == Operation::Backup && self.buffer_size < 1 {
            return Err(StorageProblem::BufferSize);
        }
        Ok(())
    }
}
