// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Storage provider flags. A cloud provider is used when its bucket,
//! container, or endpoint is given; otherwise files go to local disk.

use clap::Args;

use crate::defaults::{azure, cloud, gcp, local, s3};
use crate::options::{AzureOptions, GcsOptions, LocalOptions, S3Options, StorageCommon};

#[derive(Debug, Clone, Args)]
pub struct S3Flags {
    #[arg(long, default_value = "")]
    pub s3_bucket_name: String,

    #[arg(long, default_value = "")]
    pub s3_region: String,

    /// Profile from the AWS shared configuration.
    #[arg(long, default_value = "")]
    pub s3_profile: String,

    /// Use this endpoint instead of AWS, with path-style addressing.
    #[arg(long, default_value = "")]
    pub s3_endpoint_override: String,

    /// Access key id, or a `secrets:resource:key` reference.
    #[arg(long, default_value = "")]
    pub s3_access_key_id: String,

    #[arg(long, default_value = "")]
    pub s3_secret_access_key: String,

    /// Storage class for written objects.
    #[arg(long, default_value = "")]
    pub s3_storage_class: String,

    /// Tier to restore archived objects from: Standard, Bulk or Expedited.
    #[arg(long, default_value = "")]
    pub s3_access_tier: String,

    #[arg(long, default_value_t = s3::RETRY_MAX_ATTEMPTS)]
    pub s3_retry_max_attempts: i64,

    /// Seconds.
    #[arg(long, default_value_t = s3::RETRY_MAX_BACKOFF)]
    pub s3_retry_max_backoff: i64,

    /// Seconds.
    #[arg(long, default_value_t = s3::RETRY_BACKOFF)]
    pub s3_retry_backoff: i64,

    /// Upload part size in MiB.
    #[arg(long, default_value_t = s3::CHUNK_SIZE)]
    pub s3_chunk_size: i64,

    /// Parts uploaded at once.
    #[arg(long, default_value_t = s3::UPLOAD_CONCURRENCY)]
    pub s3_upload_concurrency: i64,

    /// Milliseconds between checks on archived objects being restored.
    #[arg(long, default_value_t = cloud::RESTORE_POLL_DURATION)]
    pub s3_restore_poll_duration: i64,

    #[arg(long)]
    pub s3_calculate_checksum: bool,

    /// Milliseconds.
    #[arg(long, default_value_t = cloud::RETRY_READ_BACKOFF)]
    pub s3_retry_read_backoff: i64,

    #[arg(long, default_value_t = cloud::RETRY_READ_MULTIPLIER)]
    pub s3_retry_read_multiplier: f64,

    #[arg(long, default_value_t = cloud::RETRY_READ_MAX_ATTEMPTS)]
    pub s3_retry_read_max_attempts: u32,

    #[arg(long, default_value_t = cloud::MAX_CONNS_PER_HOST)]
    pub s3_max_conns_per_host: i64,

    /// Milliseconds.
    #[arg(long, default_value_t = cloud::REQUEST_TIMEOUT)]
    pub s3_request_timeout: i64,
}

impl S3Flags {
    pub fn to_options(&self) -> S3Options {
        S3Options {
            bucket_name: self.s3_bucket_name.clone(),
            region: self.s3_region.clone(),
            profile: self.s3_profile.clone(),
            endpoint: self.s3_endpoint_override.clone(),
            access_key_id: self.s3_access_key_id.clone(),
            secret_access_key: self.s3_secret_access_key.clone(),
            storage_class: self.s3_storage_class.clone(),
            access_tier: self.s3_access_tier.clone(),
            retry_max_attempts: self.s3_retry_max_attempts,
            retry_max_backoff: self.s3_retry_max_backoff,
            retry_backoff: self.s3_retry_backoff,
            chunk_size: self.s3_chunk_size,
            upload_concurrency: self.s3_upload_concurrency,
            restore_poll_duration: self.s3_restore_poll_duration,
            common: StorageCommon {
                calculate_checksum: self.s3_calculate_checksum,
                retry_read_backoff: self.s3_retry_read_backoff,
                retry_read_multiplier: self.s3_retry_read_multiplier,
                retry_read_max_attempts: self.s3_retry_read_max_attempts,
                max_conns_per_host: self.s3_max_conns_per_host,
                request_timeout: self.s3_request_timeout,
            },
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct GcsFlags {
    /// Service account key file.
    #[arg(long, default_value = "")]
    pub gcp_key_path: String,

    #[arg(long, default_value = "")]
    pub gcp_bucket_name: String,

    /// Use this endpoint instead of Google, without authentication.
    #[arg(long, default_value = "")]
    pub gcp_endpoint_override: String,

    #[arg(long, default_value_t = gcp::RETRY_MAX_ATTEMPTS)]
    pub gcp_retry_max_attempts: i64,

    /// Milliseconds.
    #[arg(long, default_value_t = gcp::RETRY_BACKOFF_MAX)]
    pub gcp_retry_max_backoff: i64,

    /// Milliseconds.
    #[arg(long, default_value_t = gcp::RETRY_BACKOFF_INIT)]
    pub gcp_retry_init_backoff: i64,

    #[arg(long, default_value_t = gcp::RETRY_BACKOFF_MULTIPLIER)]
    pub gcp_retry_backoff_multiplier: f64,

    /// Upload chunk size in MiB.
    #[arg(long, default_value_t = gcp::CHUNK_SIZE)]
    pub gcp_chunk_size: i64,

    #[arg(long)]
    pub gcp_calculate_checksum: bool,

    #[arg(long, default_value_t = cloud::RETRY_READ_BACKOFF)]
    pub gcp_retry_read_backoff: i64,

    #[arg(long, default_value_t = cloud::RETRY_READ_MULTIPLIER)]
    pub gcp_retry_read_multiplier: f64,

    #[arg(long, default_value_t = cloud::RETRY_READ_MAX_ATTEMPTS)]
    pub gcp_retry_read_max_attempts: u32,

    #[arg(long, default_value_t = cloud::MAX_CONNS_PER_HOST)]
    pub gcp_max_conns_per_host: i64,

    #[arg(long, default_value_t = cloud::REQUEST_TIMEOUT)]
    pub gcp_request_timeout: i64,
}

impl GcsFlags {
    pub fn to_options(&self) -> GcsOptions {
        GcsOptions {
            key_file: self.gcp_key_path.clone(),
            bucket_name: self.gcp_bucket_name.clone(),
            endpoint: self.gcp_endpoint_override.clone(),
            retry_max_attempts: self.gcp_retry_max_attempts,
            retry_backoff_max: self.gcp_retry_max_backoff,
            retry_backoff_init: self.gcp_retry_init_backoff,
            retry_backoff_multiplier: self.gcp_retry_backoff_multiplier,
            chunk_size: self.gcp_chunk_size,
            common: StorageCommon {
                calculate_checksum: self.gcp_calculate_checksum,
                retry_read_backoff: self.gcp_retry_read_backoff,
                retry_read_multiplier: self.gcp_retry_read_multiplier,
                retry_read_max_attempts: self.gcp_retry_read_max_attempts,
                max_conns_per_host: self.gcp_max_conns_per_host,
                request_timeout: self.gcp_request_timeout,
            },
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct AzureFlags {
    #[arg(long, default_value = "")]
    pub azure_account_name: String,

    /// Shared key; used with the account name.
    #[arg(long, default_value = "")]
    pub azure_account_key: String,

    #[arg(long, default_value = "")]
    pub azure_tenant_id: String,

    #[arg(long, default_value = "")]
    pub azure_client_id: String,

    #[arg(long, default_value = "")]
    pub azure_client_secret: String,

    #[arg(long, default_value = "")]
    pub azure_endpoint: String,

    #[arg(long, default_value = "")]
    pub azure_container_name: String,

    /// Tier for written blobs, or to rehydrate archived blobs into.
    #[arg(long, default_value = "")]
    pub azure_access_tier: String,

    /// Milliseconds between checks on blobs being rehydrated.
    #[arg(long, default_value_t = cloud::RESTORE_POLL_DURATION)]
    pub azure_rehydrate_poll_duration: i64,

    #[arg(long, default_value_t = azure::RETRY_MAX_ATTEMPTS)]
    pub azure_retry_max_attempts: i64,

    /// Seconds for each try; 0 is no limit.
    #[arg(long, default_value_t = azure::RETRY_TIMEOUT)]
    pub azure_retry_timeout: i64,

    /// Seconds.
    #[arg(long, default_value_t = azure::RETRY_DELAY)]
    pub azure_retry_delay: i64,

    /// Seconds.
    #[arg(long, default_value_t = azure::RETRY_MAX_DELAY)]
    pub azure_retry_max_delay: i64,

    /// Upload block size in MiB.
    #[arg(long, default_value_t = azure::BLOCK_SIZE)]
    pub azure_block_size: i64,

    #[arg(long, default_value_t = azure::UPLOAD_CONCURRENCY)]
    pub azure_upload_concurrency: i64,

    #[arg(long)]
    pub azure_calculate_checksum: bool,

    #[arg(long, default_value_t = cloud::RETRY_READ_BACKOFF)]
    pub azure_retry_read_backoff: i64,

    #[arg(long, default_value_t = cloud::RETRY_READ_MULTIPLIER)]
    pub azure_retry_read_multiplier: f64,

    #[arg(long, default_value_t = cloud::RETRY_READ_MAX_ATTEMPTS)]
    pub azure_retry_read_max_attempts: u32,

    #[arg(long, default_value_t = cloud::MAX_CONNS_PER_HOST)]
    pub azure_max_conns_per_host: i64,

    #[arg(long, default_value_t = cloud::REQUEST_TIMEOUT)]
    pub azure_request_timeout: i64,
}

impl AzureFlags {
    pub fn to_options(&self) -> AzureOptions {
        AzureOptions {
            account_name: self.azure_account_name.clone(),
            account_key: self.azure_account_key.clone(),
            tenant_id: self.azure_tenant_id.clone(),
            client_id: self.azure_client_id.clone(),
            client_secret: self.azure_client_secret.clone(),
            endpoint: self.azure_endpoint.clone(),
            container_name: self.azure_container_name.clone(),
            access_tier: self.azure_access_tier.clone(),
            block_size: self.azure_block_size,
            upload_concurrency: self.azure_upload_concurrency,
            restore_poll_duration: self.azure_rehydrate_poll_duration,
            retry_max_attempts: self.azure_retry_max_attempts,
            retry_timeout: self.azure_retry_timeout,
            retry_delay: self.azure_retry_delay,
            retry_max_delay: self.azure_retry_max_delay,
            common: StorageCommon {
                calculate_checksum: self.azure_calculate_checksum,
                retry_read_backoff: self.azure_retry_read_backoff,
                retry_read_multiplier: self.azure_retry_read_multiplier,
                retry_read_max_attempts: self.azure_retry_read_max_attempts,
                max_conns_per_host: self.azure_max_conns_per_host,
                request_timeout: self.azure_request_timeout,
            },
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct LocalFlags {
    /// Write buffer for local files, in MiB.
    #[arg(long, default_value_t = local::BUFFER_SIZE)]
    pub local_buffer_size: i64,
}

impl LocalFlags {
    pub fn to_options(&self) -> LocalOptions {
        LocalOptions {
            buffer_size: self.local_buffer_size,
        }
    }
}
