// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Azure Blob Storage client.

use std::time::Duration;

use object_store::azure::{MicrosoftAzure, MicrosoftAzureBuilder};
use object_store::{BackoffConfig, RetryConfig};
use strum_macros::Display;
use tracing::info;

use super::{load_secret, to_usize, ClientError, HttpTransport, Result, SetupError};
use crate::options::{AzureOptions, Provider};
use crate::secrets::SecretResolver;

/// HTTP statuses worth retrying: timeouts, throttling, and server errors.
pub const RETRYABLE_STATUSES: [u16; 6] = [408, 429, 500, 502, 503, 504];

/// How the client authenticates, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum AzureCredentialKind {
    /// Account name and key.
    SharedKey,
    /// Tenant, client id and client secret.
    ClientSecret,
    /// No credential; the endpoint may carry a SAS token.
    Anonymous,
}

impl AzureCredentialKind {
    pub fn choose(options: &AzureOptions) -> AzureCredentialKind {
        if !options.account_name.is_empty() && !options.account_key.is_empty() {
            AzureCredentialKind::SharedKey
        } else if !options.tenant_id.is_empty()
            && !options.client_id.is_empty()
            && !options.client_secret.is_empty()
        {
            AzureCredentialKind::ClientSecret
        } else {
            AzureCredentialKind::Anonymous
        }
    }
}

#[derive(Debug)]
pub struct AzureBlobClient {
    pub store: MicrosoftAzure,
    pub container: String,
    pub credential: AzureCredentialKind,
    pub retry: RetryConfig,
}

/// True if a request that failed with this status should be tried again.
pub fn is_retryable(status: u16) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

pub fn new_azure_client(
    options: &AzureOptions,
    resolver: Option<&dyn SecretResolver>,
) -> std::result::Result<AzureBlobClient, ClientError> {
    build(options, resolver).map_err(ClientError::storage(Provider::Azure))
}

fn build(options: &AzureOptions, resolver: Option<&dyn SecretResolver>) -> Result<AzureBlobClient> {
    let resolved = AzureOptions {
        account_name: load_secret(resolver, "account name", &options.account_name)?,
        account_key: load_secret(resolver, "account key", &options.account_key)?,
        tenant_id: load_secret(resolver, "tenant id", &options.tenant_id)?,
        client_id: load_secret(resolver, "client id", &options.client_id)?,
        client_secret: load_secret(resolver, "client secret", &options.client_secret)?,
        endpoint: load_secret(resolver, "endpoint", &options.endpoint)?,
        container_name: load_secret(resolver, "container name", &options.container_name)?,
        ..options.clone()
    };
    let credential = AzureCredentialKind::choose(&resolved);
    let retry = retry_config(&resolved)?;
    let transport = HttpTransport::from_common(&resolved.common);

    let mut builder = MicrosoftAzureBuilder::new()
        .with_container_name(&resolved.container_name)
        .with_retry(retry.clone())
        .with_client_options(transport.client_options());
    if !resolved.account_name.is_empty() {
        builder = builder.with_account(&resolved.account_name);
    }
    if !resolved.endpoint.is_empty() {
        builder = builder.with_endpoint(resolved.endpoint.clone());
    }
    builder = match credential {
        AzureCredentialKind::SharedKey => builder.with_access_key(&resolved.account_key),
        AzureCredentialKind::ClientSecret => builder.with_client_secret_authorization(
            &resolved.client_id,
            &resolved.client_secret,
            &resolved.tenant_id,
        ),
        AzureCredentialKind::Anonymous => builder.with_skip_signature(true),
    };
    let store = builder.build()?;
    info!(container = %resolved.container_name, %credential, "created azure blob client");
    Ok(AzureBlobClient {
        store,
        container: resolved.container_name,
        credential,
        retry,
    })
}

/// Delays are in seconds.
fn retry_config(options: &AzureOptions) -> Result<RetryConfig> {
    let seconds = |field, value: i64| {
        u64::try_from(value)
            .map(Duration::from_secs)
            .map_err(|_| SetupError::OutOfRange { field, value })
    };
    let mut retry = RetryConfig {
        backoff: BackoffConfig {
            init_backoff: seconds("retry delay", options.retry_delay)?,
            max_backoff: seconds("retry max delay", options.retry_max_delay)?,
            ..Default::default()
        },
        max_retries: to_usize("retry maximum attempts", options.retry_max_attempts)?,
        ..Default::default()
    };
    if options.retry_timeout > 0 {
        retry.retry_timeout = seconds("retry try timeout", options.retry_timeout)?;
    }
    Ok(retry)
}
