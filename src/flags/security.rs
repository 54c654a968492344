// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Compression, encryption and secret agent flags.

use clap::Args;

use crate::defaults;
use crate::options::{CompressionOptions, EncryptionOptions, SecretAgentOptions};

#[derive(Debug, Clone, Args)]
pub struct CompressionFlags {
    /// NONE or ZSTD.
    #[arg(long, short = 'z', default_value = defaults::compression::MODE)]
    pub compress: String,

    #[arg(long, default_value_t = defaults::compression::LEVEL)]
    pub compression_level: i64,
}

impl CompressionFlags {
    pub fn to_options(&self) -> CompressionOptions {
        CompressionOptions {
            mode: self.compress.clone(),
            level: self.compression_level,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct EncryptionFlags {
    /// NONE, AES128 or AES256.
    #[arg(long, short = 'y', default_value = defaults::encryption::MODE)]
    pub encrypt: String,

    /// Read the key from this PEM file.
    #[arg(long, default_value = "")]
    pub encryption_key_file: String,

    /// Read the key from this environment variable.
    #[arg(long, default_value = "")]
    pub encryption_key_env: String,

    /// Fetch the key from the secret agent.
    #[arg(long, default_value = "")]
    pub encryption_key_secret: String,
}

impl EncryptionFlags {
    pub fn to_options(&self) -> EncryptionOptions {
        EncryptionOptions {
            mode: self.encrypt.clone(),
            key_file: self.encryption_key_file.clone(),
            key_env: self.encryption_key_env.clone(),
            key_secret: self.encryption_key_secret.clone(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SecretAgentFlags {
    /// tcp or uds.
    #[arg(long, default_value = defaults::secret_agent::CONNECTION_TYPE)]
    pub sa_connection_type: String,

    /// Host for tcp, or socket path for uds. The agent is only used if this is set.
    #[arg(long, default_value = "")]
    pub sa_address: String,

    #[arg(long, default_value_t = 0)]
    pub sa_port: i64,

    /// Milliseconds.
    #[arg(long, default_value_t = defaults::secret_agent::TIMEOUT)]
    pub sa_timeout: i64,

    #[arg(long, default_value = "")]
    pub sa_cafile: String,

    /// Secrets from the agent are base64 encoded.
    #[arg(long)]
    pub sa_is_base64: bool,
}

impl SecretAgentFlags {
    pub fn to_options(&self) -> Option<SecretAgentOptions> {
        if self.sa_address.is_empty() {
            return None;
        }
        Some(SecretAgentOptions {
            connection_type: self.sa_connection_type.clone(),
            address: self.sa_address.clone(),
            port: self.sa_port,
            timeout: self.sa_timeout,
            ca_file: self.sa_cafile.clone(),
            is_base64: self.sa_is_base64,
        })
    }
}
