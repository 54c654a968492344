// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Sections shared by backup and restore files.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DtoError;
use crate::defaults;
use crate::options::{
    AppOptions, AuthMode, AzureOptions, ClientPolicy, ClusterOptions, CompressionOptions,
    EncryptionOptions, GcsOptions, HostTlsPort, LocalOptions, S3Options, SecretAgentOptions,
    StorageCommon, TlsOptions,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct AppSection {
    pub verbose: Option<bool>,
    pub log_level: Option<String>,
    pub log_json: Option<bool>,
}

impl AppSection {
    pub fn to_options(&self) -> AppOptions {
        AppOptions {
            verbose: self.verbose.unwrap_or(defaults::app::VERBOSE),
            log_level: self
                .log_level
                .clone()
                .unwrap_or_else(|| defaults::app::LOG_LEVEL.to_owned()),
            log_json: self.log_json.unwrap_or(defaults::app::LOG_JSON),
            config_file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SeedSection {
    pub host: Option<String>,
    pub tls_name: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct TlsSection {
    pub name: Option<String>,
    pub protocols: Option<String>,
    pub ca_file: Option<String>,
    pub ca_path: Option<String>,
    pub cert_file: Option<String>,
    pub key_file: Option<String>,
    pub key_file_password: Option<String>,
}

impl TlsSection {
    /// TLS is on if any setting is given a value.
    pub fn to_options(&self) -> Option<TlsOptions> {
        let set = [
            &self.name,
            &self.protocols,
            &self.ca_file,
            &self.ca_path,
            &self.cert_file,
            &self.key_file,
            &self.key_file_password,
        ]
        .into_iter()
        .any(|field| field.as_deref().is_some_and(|value| !value.is_empty()));
        if !set {
            return None;
        }
        let get = |field: &Option<String>| field.clone().unwrap_or_default();
        Some(TlsOptions {
            name: get(&self.name),
            protocols: self
                .protocols
                .clone()
                .unwrap_or_else(|| defaults::cluster::TLS_PROTOCOLS.to_owned()),
            ca_file: get(&self.ca_file),
            ca_path: get(&self.ca_path),
            cert_file: get(&self.cert_file),
            key_file: get(&self.key_file),
            key_file_password: get(&self.key_file_password),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ClusterSection {
    pub seeds: Option<Vec<SeedSection>>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub auth: Option<String>,
    pub client_timeout: Option<i64>,
    pub client_idle_timeout: Option<i64>,
    pub client_login_timeout: Option<i64>,
    pub service_alternate: Option<bool>,
    pub tls: Option<TlsSection>,
}

impl ClusterSection {
    pub fn to_options(&self) -> Result<ClusterOptions, DtoError> {
        let seeds = match &self.seeds {
            None => vec![HostTlsPort {
                host: defaults::cluster::HOST.to_owned(),
                tls_name: None,
                port: defaults::cluster::PORT,
            }],
            Some(seeds) => seeds
                .iter()
                .enumerate()
                .map(|(index, seed)| {
                    let host = seed
                        .host
                        .clone()
                        .filter(|host| !host.is_empty())
                        .ok_or(DtoError::EmptySeedHost { index })?;
                    Ok(HostTlsPort {
                        host,
                        tls_name: seed.tls_name.clone().filter(|name| !name.is_empty()),
                        port: seed.port.unwrap_or(defaults::cluster::PORT),
                    })
                })
                .collect::<Result<_, DtoError>>()?,
        };
        let auth = self.auth.as_deref().unwrap_or(defaults::cluster::AUTH);
        let auth_mode =
            AuthMode::from_str(auth).map_err(|_| DtoError::AuthMode(auth.to_owned()))?;
        Ok(ClusterOptions {
            seeds,
            user: self.user.clone().unwrap_or_default(),
            password: self.password.clone().unwrap_or_default(),
            auth_mode,
            tls: self.tls.as_ref().and_then(TlsSection::to_options),
            services_alternate: self.service_alternate.unwrap_or(false),
        })
    }

    pub fn to_client_policy(&self) -> ClientPolicy {
        ClientPolicy {
            timeout: self
                .client_timeout
                .unwrap_or(defaults::client_policy::TIMEOUT),
            idle_timeout: self
                .client_idle_timeout
                .unwrap_or(defaults::client_policy::IDLE_TIMEOUT),
            login_timeout: self
                .client_login_timeout
                .unwrap_or(defaults::client_policy::LOGIN_TIMEOUT),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct CompressionSection {
    pub mode: Option<String>,
    pub level: Option<i64>,
}

impl CompressionSection {
    pub fn to_options(&self) -> CompressionOptions {
        CompressionOptions {
            mode: self
                .mode
                .clone()
                .unwrap_or_else(|| defaults::compression::MODE.to_owned()),
            level: self.level.unwrap_or(defaults::compression::LEVEL),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct EncryptionSection {
    pub mode: Option<String>,
    pub key_file: Option<String>,
    pub key_env: Option<String>,
    pub key_secret: Option<String>,
}

impl EncryptionSection {
    pub fn to_options(&self) -> EncryptionOptions {
        EncryptionOptions {
            mode: self
                .mode
                .clone()
                .unwrap_or_else(|| defaults::encryption::MODE.to_owned()),
            key_file: self.key_file.clone().unwrap_or_default(),
            key_env: self.key_env.clone().unwrap_or_default(),
            key_secret: self.key_secret.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SecretAgentSection {
    pub connection_type: Option<String>,
    pub address: Option<String>,
    pub port: Option<i64>,
    pub timeout: Option<i64>,
    pub ca_file: Option<String>,
    pub is_base64: Option<bool>,
}

impl SecretAgentSection {
    /// The agent is only used when it has an address.
    pub fn to_options(&self) -> Option<SecretAgentOptions> {
        let address = self.address.clone().filter(|address| !address.is_empty())?;
        Some(SecretAgentOptions {
            connection_type: self
                .connection_type
                .clone()
                .unwrap_or_else(|| defaults::secret_agent::CONNECTION_TYPE.to_owned()),
            address,
            port: self.port.unwrap_or_default(),
            timeout: self.timeout.unwrap_or(defaults::secret_agent::TIMEOUT),
            ca_file: self.ca_file.clone().unwrap_or_default(),
            is_base64: self.is_base64.unwrap_or(false),
        })
    }
}

fn storage_common(
    calculate_checksum: Option<bool>,
    retry_read_backoff: Option<i64>,
    retry_read_multiplier: Option<f64>,
    retry_read_max_attempts: Option<u32>,
    max_conns_per_host: Option<i64>,
    request_timeout: Option<i64>,
) -> StorageCommon {
    use defaults::cloud;
    StorageCommon {
        calculate_checksum: calculate_checksum.unwrap_or(cloud::CALCULATE_CHECKSUM),
        retry_read_backoff: retry_read_backoff.unwrap_or(cloud::RETRY_READ_BACKOFF),
        retry_read_multiplier: retry_read_multiplier.unwrap_or(cloud::RETRY_READ_MULTIPLIER),
        retry_read_max_attempts: retry_read_max_attempts
            .unwrap_or(cloud::RETRY_READ_MAX_ATTEMPTS),
        max_conns_per_host: max_conns_per_host.unwrap_or(cloud::MAX_CONNS_PER_HOST),
        request_timeout: request_timeout.unwrap_or(cloud::REQUEST_TIMEOUT),
    }
}

/// `aws.s3`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct S3Section {
    pub bucket_name: Option<String>,
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_override: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub restore_poll_duration: Option<i64>,
    pub storage_class: Option<String>,
    pub access_tier: Option<String>,
    pub retry_max_attempts: Option<i64>,
    pub retry_max_backoff: Option<i64>,
    pub retry_backoff: Option<i64>,
    pub chunk_size: Option<i64>,
    pub upload_concurrency: Option<i64>,
    pub calculate_checksum: Option<bool>,
    pub retry_read_backoff: Option<i64>,
    pub retry_read_multiplier: Option<f64>,
    pub retry_read_max_attempts: Option<u32>,
    pub max_conns_per_host: Option<i64>,
    pub request_timeout: Option<i64>,
}

impl S3Section {
    pub fn to_options(&self) -> S3Options {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        S3Options {
            bucket_name: text(&self.bucket_name),
            region: text(&self.region),
            profile: text(&self.profile),
            endpoint: text(&self.endpoint_override),
            access_key_id: text(&self.access_key_id),
            secret_access_key: text(&self.secret_access_key),
            storage_class: text(&self.storage_class),
            access_tier: text(&self.access_tier),
            retry_max_attempts: self
                .retry_max_attempts
                .unwrap_or(defaults::s3::RETRY_MAX_ATTEMPTS),
            retry_max_backoff: self
                .retry_max_backoff
                .unwrap_or(defaults::s3::RETRY_MAX_BACKOFF),
            retry_backoff: self.retry_backoff.unwrap_or(defaults::s3::RETRY_BACKOFF),
            chunk_size: self.chunk_size.unwrap_or(defaults::s3::CHUNK_SIZE),
            upload_concurrency: self
                .upload_concurrency
                .unwrap_or(defaults::s3::UPLOAD_CONCURRENCY),
            restore_poll_duration: self
                .restore_poll_duration
                .unwrap_or(defaults::cloud::RESTORE_POLL_DURATION),
            common: storage_common(
                self.calculate_checksum,
                self.retry_read_backoff,
                self.retry_read_multiplier,
                self.retry_read_max_attempts,
                self.max_conns_per_host,
                self.request_timeout,
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AwsSection {
    pub s3: S3Section,
}

/// `gcp.storage`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct GcpStorageSection {
    pub key_file: Option<String>,
    pub bucket_name: Option<String>,
    pub endpoint_override: Option<String>,
    pub retry_max_attempts: Option<i64>,
    pub retry_max_backoff: Option<i64>,
    pub retry_init_backoff: Option<i64>,
    pub retry_backoff_multiplier: Option<f64>,
    pub chunk_size: Option<i64>,
    pub calculate_checksum: Option<bool>,
    pub retry_read_backoff: Option<i64>,
    pub retry_read_multiplier: Option<f64>,
    pub retry_read_max_attempts: Option<u32>,
    pub max_conns_per_host: Option<i64>,
    pub request_timeout: Option<i64>,
}

impl GcpStorageSection {
    pub fn to_options(&self) -> GcsOptions {
        GcsOptions {
            key_file: self.key_file.clone().unwrap_or_default(),
            bucket_name: self.bucket_name.clone().unwrap_or_default(),
            endpoint: self.endpoint_override.clone().unwrap_or_default(),
            retry_max_attempts: self
                .retry_max_attempts
                .unwrap_or(defaults::gcp::RETRY_MAX_ATTEMPTS),
            retry_backoff_max: self
                .retry_max_backoff
                .unwrap_or(defaults::gcp::RETRY_BACKOFF_MAX),
            retry_backoff_init: self
                .retry_init_backoff
                .unwrap_or(defaults::gcp::RETRY_BACKOFF_INIT),
            retry_backoff_multiplier: self
                .retry_backoff_multiplier
                .unwrap_or(defaults::gcp::RETRY_BACKOFF_MULTIPLIER),
            chunk_size: self.chunk_size.unwrap_or(defaults::gcp::CHUNK_SIZE),
            common: storage_common(
                self.calculate_checksum,
                self.retry_read_backoff,
                self.retry_read_multiplier,
                self.retry_read_max_attempts,
                self.max_conns_per_host,
                self.request_timeout,
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GcpSection {
    pub storage: GcpStorageSection,
}

/// `azure.blob`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct AzureBlobSection {
    pub account_name: Option<String>,
    pub account_key: Option<String>,
    pub tenant_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub endpoint_override: Option<String>,
    pub container_name: Option<String>,
    pub access_tier: Option<String>,
    pub rehydrate_poll_duration: Option<i64>,
    pub retry_max_attempts: Option<i64>,
    pub retry_timeout: Option<i64>,
    pub retry_delay: Option<i64>,
    pub retry_max_delay: Option<i64>,
    pub upload_concurrency: Option<i64>,
    pub block_size: Option<i64>,
    pub calculate_checksum: Option<bool>,
    pub retry_read_backoff: Option<i64>,
    pub retry_read_multiplier: Option<f64>,
    pub retry_read_max_attempts: Option<u32>,
    pub max_conns_per_host: Option<i64>,
    pub request_timeout: Option<i64>,
}

impl AzureBlobSection {
    pub fn to_options(&self) -> AzureOptions {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        AzureOptions {
            account_name: text(&self.account_name),
            account_key: text(&self.account_key),
            tenant_id: text(&self.tenant_id),
            client_id: text(&self.client_id),
            client_secret: text(&self.client_secret),
            endpoint: text(&self.endpoint_override),
            container_name: text(&self.container_name),
            access_tier: text(&self.access_tier),
            block_size: self.block_size.unwrap_or(defaults::azure::BLOCK_SIZE),
            upload_concurrency: self
                .upload_concurrency
                .unwrap_or(defaults::azure::UPLOAD_CONCURRENCY),
            restore_poll_duration: self
                .rehydrate_poll_duration
                .unwrap_or(defaults::cloud::RESTORE_POLL_DURATION),
            retry_max_attempts: self
                .retry_max_attempts
                .unwrap_or(defaults::azure::RETRY_MAX_ATTEMPTS),
            retry_timeout: self
                .retry_timeout
                .unwrap_or(defaults::azure::RETRY_TIMEOUT),
            retry_delay: self.retry_delay.unwrap_or(defaults::azure::RETRY_DELAY),
            retry_max_delay: self
                .retry_max_delay
                .unwrap_or(defaults::azure::RETRY_MAX_DELAY),
            common: storage_common(
                self.calculate_checksum,
                self.retry_read_backoff,
                self.retry_read_multiplier,
                self.retry_read_max_attempts,
                self.max_conns_per_host,
                self.request_timeout,
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AzureSection {
    pub blob: AzureBlobSection,
}

/// `local.disk`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct LocalDiskSection {
    pub buffer_size: Option<i64>,
}

impl LocalDiskSection {
    pub fn to_options(&self) -> LocalOptions {
        LocalOptions {
            buffer_size: self.buffer_size.unwrap_or(defaults::local::BUFFER_SIZE),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalSection {
    pub disk: LocalDiskSection,
}
