// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! The backup configuration file.

use serde::{Deserialize, Serialize};

use super::common::{
    AppSection, AwsSection, AzureSection, ClusterSection, CompressionSection, EncryptionSection,
    GcpSection, LocalSection, SecretAgentSection,
};
use super::{join_list, DtoError};
use crate::defaults::{backup, common};
use crate::options::{BackupOptions, CommonOptions};
use crate::service::BackupServiceConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct BackupConfigFile {
    pub app: AppSection,
    pub cluster: ClusterSection,
    pub backup: BackupSection,
    pub compression: CompressionSection,
    pub encryption: EncryptionSection,
    pub secret_agent: Option<SecretAgentSection>,
    pub aws: AwsSection,
    pub gcp: GcpSection,
    pub azure: AzureSection,
    pub local: LocalSection,
}

impl BackupConfigFile {
    /// A file always describes a scan backup, never XDR.
    pub fn to_service_config(&self) -> Result<BackupServiceConfig, DtoError> {
        Ok(BackupServiceConfig {
            app: self.app.to_options(),
            cluster: self.cluster.to_options()?,
            client_policy: self.cluster.to_client_policy(),
            backup: Some(self.backup.to_options()),
            xdr: None,
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

/// The `backup` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct BackupSection {
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

    pub output_file: Option<String>,
    pub output_file_prefix: Option<String>,
    pub remove_files: Option<bool>,
    pub remove_artifacts: Option<bool>,
    pub modified_before: Option<String>,
    pub modified_after: Option<String>,
    pub file_limit: Option<u64>,
    pub after_digest: Option<String>,
    pub max_records: Option<i64>,
    pub no_bins: Option<bool>,
    pub sleep_between_retries: Option<i64>,
    pub filter_exp: Option<String>,
    pub compact: Option<bool>,
    pub node_list: Option<Vec<String>>,
    pub no_ttl_only: Option<bool>,
    pub prefer_racks: Option<Vec<String>>,
    pub partition_list: Option<Vec<String>>,
    pub rack_list: Option<Vec<String>>,
    pub estimate: Option<bool>,
    pub estimate_samples: Option<i64>,
    pub state_file_dst: Option<String>,
    #[serde(rename = "continue")]
    pub continue_from: Option<String>,
    pub scan_page_size: Option<i64>,
}

impl BackupSection {
    pub fn to_options(&self) -> BackupOptions {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        BackupOptions {
            common: CommonOptions {
                directory: text(&self.directory),
                namespace: text(&self.namespace),
                set_list: join_list(&self.set_list),
                bin_list: join_list(&self.bin_list),
                parallel: self.parallel.unwrap_or(backup::PARALLEL),
                no_records: self.no_records.unwrap_or(false),
                no_indexes: self.no_indexes.unwrap_or(false),
                no_udfs: self.no_udfs.unwrap_or(false),
                records_per_second: self
                    .records_per_second
                    .unwrap_or(common::RECORDS_PER_SECOND),
                max_retries: self.max_retries.unwrap_or(common::MAX_RETRIES),
                total_timeout: self.total_timeout.unwrap_or(backup::TOTAL_TIMEOUT),
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
            output_file: text(&self.output_file),
            output_file_prefix: text(&self.output_file_prefix),
            remove_files: self.remove_files.unwrap_or(false),
            remove_artifacts: self.remove_artifacts.unwrap_or(false),
            modified_before: text(&self.modified_before),
            modified_after: text(&self.modified_after),
            file_limit: self.file_limit.unwrap_or(backup::FILE_LIMIT),
            after_digest: text(&self.after_digest),
            max_records: self.max_records.unwrap_or(backup::MAX_RECORDS),
            no_bins: self.no_bins.unwrap_or(false),
            sleep_between_retries: self
                .sleep_between_retries
                .unwrap_or(backup::SLEEP_BETWEEN_RETRIES),
            filter_expression: text(&self.filter_exp),
            compact: self.compact.unwrap_or(false),
            node_list: join_list(&self.node_list),
            no_ttl_only: self.no_ttl_only.unwrap_or(false),
            prefer_racks: join_list(&self.prefer_racks),
            partition_list: join_list(&self.partition_list),
            rack_list: join_list(&self.rack_list),
            estimate: self.estimate.unwrap_or(false),
            estimate_samples: self
                .estimate_samples
                .unwrap_or(backup::ESTIMATE_SAMPLES),
            state_file_dst: text(&self.state_file_dst),
            continue_from: text(&self.continue_from),
            scan_page_size: self.scan_page_size.unwrap_or(backup::SCAN_PAGE_SIZE),
        }
    }
}
