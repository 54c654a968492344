// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! The restore configuration file.

use serde::{Deserialize, Serialize};

use super::common::{
    AppSection, AwsSection, AzureSection, ClusterSection, CompressionSection, EncryptionSection,
    GcpSection, LocalSection, SecretAgentSection,
};
use super::{join_list, DtoError};
use crate::defaults::{common, restore};
use crate::options::{CommonOptions, RestoreOptions};
use crate::service::RestoreServiceConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RestoreConfigFile {
    pub app: AppSection,
    pub cluster: ClusterSection,
    pub restore: RestoreSection,
    pub compression: CompressionSection,
    pub encryption: EncryptionSection,
    pub secret_agent: Option<SecretAgentSection>,
    pub aws: AwsSection,
    pub gcp: GcpSection,
    pub azure: AzureSection,
    pub local: LocalSection,
}

impl RestoreConfigFile {
    pub fn to_service_config(&self) -> Result<RestoreServiceConfig, DtoError> {
        Ok(RestoreServiceConfig {
            app: self.app.to_options(),
            cluster: self.cluster.to_options()?,
            client_policy: self.cluster.to_client_policy(),
            restore: self.restore.to_options(),
            compression: self.compression.to_options(),
            encryption: self.encryption.to_options(),
            secret_agent: self
                .secret_agent
                .as_ref()
                .and_then(SecretAgentSection::to_options),
            s3: self.aws.s3.to_options(),
            gcs: self.gcp.storage.to_options(),
            azure: self.azure.blob.to_options(),
            local: self.local.disk.to_options(),
        })
    }
}

/// The `restore` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RestoreSection {
    pub directory: Option<String>,
    pub namespace: Option<String>,
    pub set_list: Option<Vec<String>>,
    pub bin_list: Option<Vec<String>>,
    pub parallel: Option<i64>,
    pub no_records: Option<bool>,
    pub no_indexes: Option<bool>,
    pub no_udfs: Option<bool>,
    pub records_per_second: Option<i64>,
    pub max_retries: Option<i64>,
    pub total_timeout: Option<i64>,
    pub socket_timeout: Option<i64>,
    pub bandwidth: Option<i64>,
    pub info_timeout: Option<i64>,
    pub info_max_retries: Option<u32>,
    pub info_retry_multiplier: Option<f64>,
    pub info_retry_interval: Option<i64>,
    pub std_buffer_size: Option<i64>,

    pub input_file: Option<String>,
    pub directory_list: Option<Vec<String>>,
    pub parent_directory: Option<String>,
    pub disable_batch_writes: Option<bool>,
    pub batch_size: Option<i64>,
    pub max_async_batches: Option<i64>,
    pub warm_up: Option<i64>,
    pub extra_ttl: Option<i64>,
    pub ignore_record_error: Option<bool>,
    pub unique: Option<bool>,
    pub replace: Option<bool>,
    pub no_generation: Option<bool>,
    pub retry_base_interval: Option<i64>,
    pub retry_multiplier: Option<f64>,
    pub retry_max_attempts: Option<u32>,
    pub validate_only: Option<bool>,
    pub apply_metadata_last: Option<bool>,
}

impl RestoreSection {
    pub fn to_options(&self) -> RestoreOptions {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        RestoreOptions {
            common: CommonOptions {
                directory: text(&self.directory),
                namespace: text(&self.namespace),
                set_list: join_list(&self.set_list),
                bin_list: join_list(&self.bin_list),
                parallel: self.parallel.unwrap_or(restore::PARALLEL),
                no_records: self.no_records.unwrap_or(false),
                no_indexes: self.no_indexes.unwrap_or(false),
                no_udfs: self.no_udfs.unwrap_or(false),
                records_per_second: self
                    .records_per_second
                    .unwrap_or(common::RECORDS_PER_SECOND),
                max_retries: self.max_retries.unwrap_or(common::MAX_RETRIES),
                total_timeout: self.total_timeout.unwrap_or(restore::TOTAL_TIMEOUT),
                socket_timeout: self.socket_timeout.unwrap_or(common::SOCKET_TIMEOUT),
                bandwidth: self.bandwidth.unwrap_or(common::BANDWIDTH),
                info_timeout: self.info_timeout.unwrap_or(common::INFO_TIMEOUT),
                info_max_retries: self.info_max_retries.unwrap_or(common::INFO_MAX_RETRIES),
                info_retries_multiplier: self
                    .info_retry_multiplier
                    .unwrap_or(common::INFO_RETRIES_MULTIPLIER),
                info_retry_interval: self
                    .info_retry_interval
                    .unwrap_or(common::INFO_RETRY_INTERVAL),
                std_buffer_size: self.std_buffer_size.unwrap_or(common::STD_BUFFER_SIZE),
            },
            input_file: text(&self.input_file),
            directory_list: join_list(&self.directory_list),
            parent_directory: text(&self.parent_directory),
            disable_batch_writes: self.disable_batch_writes.unwrap_or(false),
            batch_size: self.batch_size.unwrap_or(restore::BATCH_SIZE),
            max_async_batches: self.max_async_batches.unwrap_or(restore::MAX_ASYNC_BATCHES),
            warm_up: self.warm_up.unwrap_or(restore::WARM_UP),
            extra_ttl: self.extra_ttl.unwrap_or(restore::EXTRA_TTL),
            ignore_record_error: self.ignore_record_error.unwrap_or(false),
            unique: self.unique.unwrap_or(false),
            replace: self.replace.unwrap_or(false),
            no_generation: self.no_generation.unwrap_or(false),
            retry_base_interval: self
                .retry_base_interval
                .unwrap_or(restore::RETRY_BASE_INTERVAL),
            retry_multiplier: self.retry_multiplier.unwrap_or(restore::RETRY_MULTIPLIER),
            retry_max_attempts: self
                .retry_max_attempts
                .unwrap_or(restore::RETRY_MAX_ATTEMPTS),
            validate_only: self.validate_only.unwrap_or(false),
            apply_metadata_last: self.apply_metadata_last.unwrap_or(false),
        }
    }
}
