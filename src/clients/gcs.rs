// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Google Cloud Storage client.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use object_store::gcp::{GcpCredential, GoogleCloudStorage, GoogleCloudStorageBuilder};
use object_store::{BackoffConfig, RetryConfig, StaticCredentialProvider};
use tracing::{debug, info};

use super::{load_secret, to_usize, ClientError, HttpTransport, Result, SetupError};
use crate::options::{GcsOptions, Provider};
use crate::secrets::SecretResolver;

#[derive(Debug)]
pub struct GcsClient {
    pub store: GoogleCloudStorage,
    pub bucket: String,
    /// Set when talking to an emulator or other non-Google endpoint.
    pub endpoint: Option<String>,
    pub retry: RetryConfig,
}

/// Build a GCS client.
///
/// The key file, bucket name and endpoint may all be secret references.
/// With a custom endpoint, requests are not signed.
pub fn new_gcs_client(
    options: &GcsOptions,
    resolver: Option<&dyn SecretResolver>,
) -> std::result::Result<GcsClient, ClientError> {
    build(options, resolver).map_err(ClientError::storage(Provider::Gcs))
}

fn build(options: &GcsOptions, resolver: Option<&dyn SecretResolver>) -> Result<GcsClient> {
    let key_file = load_secret(resolver, "key file", &options.key_file)?;
    let bucket = load_secret(resolver, "bucket name", &options.bucket_name)?;
    let endpoint = load_secret(resolver, "endpoint", &options.endpoint)?;

    let retry = retry_config(options)?;
    let transport = HttpTransport::from_common(&options.common);
    let mut builder = GoogleCloudStorageBuilder::new()
        .with_bucket_name(&bucket)
        .with_retry(retry.clone())
        .with_client_options(transport.client_options());
    if !key_file.is_empty() {
        let key = fs::read_to_string(&key_file).map_err(|source| SetupError::KeyFile {
            path: PathBuf::from(&key_file),
            source,
        })?;
        builder = builder.with_service_account_key(key);
        debug!(%key_file, "using service account key");
    }
    if !endpoint.is_empty() {
        builder = builder.with_credentials(Arc::new(StaticCredentialProvider::new(
            GcpCredential {
                bearer: String::new(),
            },
        )));
    }
    let store = builder.build()?;
    info!(%bucket, endpoint = %endpoint, "created gcp storage client");
    Ok(GcsClient {
        store,
        bucket,
        endpoint: Some(endpoint).filter(|e| !e.is_empty()),
        retry,
    })
}

fn retry_config(options: &GcsOptions) -> Result<RetryConfig> {
    let millis = |field, value: i64| {
        u64::try_from(value)
            .map(Duration::from_millis)
            .map_err(|_| SetupError::OutOfRange { field, value })
    };
    Ok(RetryConfig {
        backoff: BackoffConfig {
            init_backoff: millis("retry backoff", options.retry_backoff_init)?,
            max_backoff: millis("retry max backoff", options.retry_backoff_max)?,
            base: options.retry_backoff_multiplier,
        },
        max_retries: to_usize("retry maximum attempts", options.retry_max_attempts)?,
        ..Default::default()
    })
}
