// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Everything one backup or restore run is configured with.

use std::path::Path;

use crate::options::{
    is_std_placeholder, AppOptions, AzureOptions, BackupOptions, BackupXdrOptions, ClientPolicy,
    ClusterOptions, CompressionOptions, EncryptionOptions, GcsOptions, LocalOptions, Operation,
    Provider, RestoreOptions, S3Options, SecretAgentOptions,
};
use crate::validate::{validate_storage_providers, ValidationError};
use crate::yaml::{self, ConfigFileError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackupServiceConfig {
    pub app: AppOptions,
    pub cluster: ClusterOptions,
    pub client_policy: ClientPolicy,
    /// Set for a scan backup.
    pub backup: Option<BackupOptions>,
    /// Set for a change-stream backup.
    pub xdr: Option<BackupXdrOptions>,
    pub compression: CompressionOptions,
    pub encryption: EncryptionOptions,
    pub secret_agent: Option<SecretAgentOptions>,
    pub s3: S3Options,
    pub gcs: GcsOptions,
    pub azure: AzureOptions,
    pub local: LocalOptions,
}

impl BackupServiceConfig {
    /// Use the settings from flags, unless they name a config file, in
    /// which case the file replaces them all.
    pub fn new(flags: BackupServiceConfig) -> Result<BackupServiceConfig, ConfigFileError> {
        match &flags.app.config_file {
            Some(path) => yaml::decode_backup_service_config(path).map_err(|err| load_error(path, err)),
            None => Ok(flags),
        }
    }

    /// A change-stream backup: XDR options without scan options.
    pub fn is_xdr(&self) -> bool {
        self.xdr.is_some() && self.backup.is_none()
    }

    /// Resuming from a saved state file.
    pub fn is_continue(&self) -> bool {
        self.backup
            .as_ref()
            .is_some_and(|backup| !backup.continue_from.is_empty())
    }

    pub fn is_stop_xdr(&self) -> bool {
        self.xdr.as_ref().is_some_and(|xdr| xdr.stop_xdr)
    }

    pub fn is_unblock_mrt(&self) -> bool {
        self.xdr.as_ref().is_some_and(|xdr| xdr.unblock_mrt)
    }

    /// False only for an estimate, which needs no writer.
    pub fn skip_writer_init(&self) -> bool {
        !self.backup.as_ref().is_some_and(|backup| backup.estimate)
    }

    pub fn is_stdout(&self) -> bool {
        self.backup.as_ref().is_some_and(BackupOptions::is_stdout)
    }

    /// Where backup files go.
    pub fn storage_provider(&self) -> Provider {
        configured_provider(&self.s3, &self.gcs, &self.azure)
    }

    /// Check every part that applies to this run.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (&self.backup, &self.xdr) {
            (Some(backup), _) => backup.validate()?,
            (None, Some(xdr)) => xdr.validate()?,
            (None, None) => return Err(ValidationError::Required("backup or xdr configuration")),
        }
        SecretAgentOptions::validate(self.secret_agent.as_ref())?;
        validate_storage_providers(
            Operation::Backup,
            &self.s3,
            &self.gcs,
            &self.azure,
            &self.local,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoreServiceConfig {
    pub app: AppOptions,
    pub cluster: ClusterOptions,
    pub client_policy: ClientPolicy,
    pub restore: RestoreOptions,
    pub compression: CompressionOptions,
    pub encryption: EncryptionOptions,
    pub secret_agent: Option<SecretAgentOptions>,
    pub s3: S3Options,
    pub gcs: GcsOptions,
    pub azure: AzureOptions,
    pub local: LocalOptions,
}

impl RestoreServiceConfig {
    /// Use the settings from flags, unless they name a config file, in
    /// which case the file replaces them all.
    pub fn new(flags: RestoreServiceConfig) -> Result<RestoreServiceConfig, ConfigFileError> {
        match &flags.app.config_file {
            Some(path) => {
                yaml::decode_restore_service_config(path).map_err(|err| load_error(path, err))
            }
            None => Ok(flags),
        }
    }

    pub fn is_stdin(&self) -> bool {
        is_std_placeholder(&self.restore.input_file)
    }

    /// Where backup files are read from.
    pub fn storage_provider(&self) -> Provider {
        configured_provider(&self.s3, &self.gcs, &self.azure)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.restore.validate()?;
        SecretAgentOptions::validate(self.secret_agent.as_ref())?;
        validate_storage_providers(
            Operation::Restore,
            &self.s3,
            &self.gcs,
            &self.azure,
            &self.local,
        )
    }
}

/// The first configured cloud provider, else local disk.
fn configured_provider(s3: &S3Options, gcs: &GcsOptions, azure: &AzureOptions) -> Provider {
    if s3.is_configured() {
        Provider::S3
    } else if gcs.is_configured() {
        Provider::Gcs
    } else if azure.is_configured() {
        Provider::Azure
    } else {
        Provider::Local
    }
}

fn load_error(path: &Path, err: ConfigFileError) -> ConfigFileError {
    ConfigFileError::Load {
        path: path.to_owned(),
        source: Box::new(err),
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn backup(backup: BackupOptions) -> BackupServiceConfig {
        BackupServiceConfig {
            backup: Some(backup),
            ..Default::default()
        }
    }

    fn xdr(xdr: BackupXdrOptions) -> BackupServiceConfig {
        BackupServiceConfig {
            xdr: Some(xdr),
            ..Default::default()
        }
    }

    #[test]
    fn flags_are_used_without_a_config_file() {
        let flags = backup(BackupOptions {
            output_file: "out.asb".into(),
            ..Default::default()
        });
        assert_eq!(BackupServiceConfig::new(flags.clone()).unwrap(), flags);
    }

    #[test]
    fn missing_config_file() {
        let flags = RestoreServiceConfig {
            app: AppOptions {
                config_file: Some(PathBuf::from("/nonexistent/asbackup.yaml")),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = RestoreServiceConfig::new(flags).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to load config file /nonexistent/asbackup.yaml"
        );
    }

    #[rstest]
    #[case::neither(BackupServiceConfig::default(), false)]
    #[case::xdr_only(xdr(BackupXdrOptions::default()), true)]
    #[case::backup_only(backup(BackupOptions::default()), false)]
    #[case::both(
        BackupServiceConfig { xdr: Some(BackupXdrOptions::default()), ..backup(BackupOptions::default()) },
        false
    )]
    fn is_xdr(#[case] config: BackupServiceConfig, #[case] expected: bool) {
        assert_eq!(config.is_xdr(), expected);
    }

    #[test]
    fn storage_provider_prefers_cloud() {
        assert_eq!(
            BackupServiceConfig::default().storage_provider(),
            Provider::Local
        );
        let config = RestoreServiceConfig {
            azure: AzureOptions {
                container_name: "backups".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.storage_provider(), Provider::Azure);
        let config = BackupServiceConfig {
            gcs: GcsOptions {
                endpoint: "http://127.0.0.1:4443".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.storage_provider(), Provider::Gcs);
    }

    #[test]
    fn is_continue() {
        assert!(!BackupServiceConfig::default().is_continue());
        assert!(!backup(BackupOptions::default()).is_continue());
        assert!(backup(BackupOptions {
            continue_from: "state".into(),
            ..Default::default()
        })
        .is_continue());
    }

    #[test]
    fn xdr_control_flags() {
        assert!(!BackupServiceConfig::default().is_stop_xdr());
        assert!(!BackupServiceConfig::default().is_unblock_mrt());
        let config = xdr(BackupXdrOptions {
            stop_xdr: true,
            ..Default::default()
        });
        assert!(config.is_stop_xdr());
        assert!(!config.is_unblock_mrt());
        let config = xdr(BackupXdrOptions {
            unblock_mrt: true,
            ..Default::default()
        });
        assert!(config.is_unblock_mrt());
    }

    #[rstest]
    #[case::no_backup(BackupServiceConfig::default(), true)]
    #[case::no_estimate(backup(BackupOptions::default()), true)]
    #[case::estimate(backup(BackupOptions { estimate: true, ..Default::default() }), false)]
    fn skip_writer_init(#[case] config: BackupServiceConfig, #[case] expected: bool) {
        assert_eq!(config.skip_writer_init(), expected);
    }

    #[rstest]
    #[case::no_backup(BackupServiceConfig::default(), false)]
    #[case::placeholder(backup(BackupOptions { output_file: "-".into(), ..Default::default() }), true)]
    #[case::path(backup(BackupOptions { output_file: "/path/to/file".into(), ..Default::default() }), false)]
    #[case::empty(backup(BackupOptions::default()), false)]
    fn is_stdout(#[case] config: BackupServiceConfig, #[case] expected: bool) {
        assert_eq!(config.is_stdout(), expected);
    }

    #[test]
    fn is_stdin() {
        let mut config = RestoreServiceConfig::default();
        assert!(!config.is_stdin());
        config.restore.input_file = "-".into();
        assert!(config.is_stdin());
    }

    #[test]
    fn validation_covers_storage() {
        let mut config = backup(BackupOptions {
            output_file: "out.asb".into(),
            ..Default::default()
        });
        config.validate().unwrap();
        config.local.buffer_size = 0;
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "invalid local disk settings: buffer size can't be less than 1"
        );
    }

    #[test]
    fn validation_needs_some_backup() {
        assert_eq!(
            BackupServiceConfig::default()
                .validate()
                .unwrap_err()
                .to_string(),
            "backup or xdr configuration is required"
        );
    }
}
