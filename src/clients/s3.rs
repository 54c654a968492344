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

//! AWS S3, or compatible object storage, client.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{AppName, BehaviorVersion};
use aws_sdk_s3::config::Credentials;
use aws_types::region::Region;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use super::{load_secret, ClientError, HttpTransport, Result, SetupError};
use crate::options::{Provider, S3Options};
use crate::secrets::SecretResolver;

pub struct S3Client {
    /// Runtime the SDK's futures are driven on.
    ///
    /// The rest of asbackup is synchronous, so callers block on this
    /// runtime for each request.
    pub runtime: Arc<Runtime>,
    pub client: aws_sdk_s3::Client,
    pub bucket: String,
}

impl fmt::Debug for S3Client {
    #[mutants::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Client")
            .field("bucket", &self.bucket)
            .finish()
    }
}

/// Build an S3 client.
///
/// Static credentials are only used when both the key id and the secret
/// are given; otherwise the SDK's usual chain (environment, profile,
/// instance metadata) applies.
pub fn new_s3_client(
    options: &S3Options,
    resolver: Option<&dyn SecretResolver>,
) -> std::result::Result<S3Client, ClientError> {
    build(options, resolver).map_err(ClientError::storage(Provider::S3))
}

fn build(options: &S3Options, resolver: Option<&dyn SecretResolver>) -> Result<S3Client> {
    // Like in <https://tokio.rs/tokio/topics/bridging>.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(SetupError::Runtime)?;

    let access_key_id = load_secret(resolver, "access key id", &options.access_key_id)?;
    let secret_access_key = load_secret(resolver, "secret access key", &options.secret_access_key)?;
    let transport = HttpTransport::from_common(&options.common);

    let app_name = AppName::new(format!("asbackup-{}", crate::version()))
        .map_err(|err| SetupError::Setting(err.to_string()))?;
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .app_name(app_name)
        .retry_config(retry_config(options)?)
        .timeout_config(timeout_config(&transport));
    if !options.profile.is_empty() {
        loader = loader.profile_name(&options.profile);
    }
    if !options.region.is_empty() {
        loader = loader.region(Region::new(options.region.clone()));
    }
    if !access_key_id.is_empty() && !secret_access_key.is_empty() {
        debug!("using static credentials");
        loader = loader.credentials_provider(Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "asbackup",
        ));
    }
    let sdk_config = runtime.block_on(loader.load());

    let mut s3_config = aws_sdk_s3::config::Builder::from(&sdk_config).force_path_style(true);
    if !options.endpoint.is_empty() {
        s3_config = s3_config.endpoint_url(&options.endpoint);
    }
    let client = aws_sdk_s3::Client::from_conf(s3_config.build());
    info!(
        bucket = %options.bucket_name,
        region = ?sdk_config.region(),
        endpoint = %options.endpoint,
        "created aws s3 client"
    );
    Ok(S3Client {
        runtime: Arc::new(runtime),
        client,
        bucket: options.bucket_name.clone(),
    })
}

/// Adaptive retry; backoffs are in seconds. Zero attempts keeps the SDK default.
fn retry_config(options: &S3Options) -> Result<RetryConfig> {
    let seconds = |field, value: i64| {
        u64::try_from(value)
            .map(Duration::from_secs)
            .map_err(|_| SetupError::OutOfRange { field, value })
    };
    let mut retry = RetryConfig::adaptive()
        .with_initial_backoff(seconds("retry backoff", options.retry_backoff)?)
        .with_max_backoff(seconds("retry max backoff", options.retry_max_backoff)?);
    if options.retry_max_attempts > 0 {
        let attempts = u32::try_from(options.retry_max_attempts).map_err(|_| {
            SetupError::OutOfRange {
                field: "retry maximum attempts",
                value: options.retry_max_attempts,
            }
        })?;
        retry = retry.with_max_attempts(attempts);
    }
    Ok(retry)
}

fn timeout_config(transport: &HttpTransport) -> TimeoutConfig {
    let mut builder = TimeoutConfig::builder().connect_timeout(transport.dial_timeout);
    if let Some(timeout) = transport.request_timeout {
        builder = builder.operation_attempt_timeout(timeout);
    }
    builder.build()
}
