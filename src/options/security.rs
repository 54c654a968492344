// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Compression, encryption, and secret agent options.

use crate::validate::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressionOptions {
    /// `NONE` or `ZSTD`, in any case.
    pub mode: String,
    pub level: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncryptionOptions {
    /// `NONE`, `AES128` or `AES256`, in any case.
    pub mode: String,
    pub key_file: String,
    /// Name of an environment variable holding the key.
    pub key_env: String,
    /// Secret agent reference for the key.
    pub key_secret: String,
}

/// How to reach the secret agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretAgentOptions {
    /// `tcp` or `uds`.
    pub connection_type: String,
    /// Host name for tcp, or socket path for uds.
    pub address: String,
    pub port: i64,
    /// Milliseconds.
    pub timeout: i64,
    pub ca_file: String,
    /// Secret values are base64 encoded.
    pub is_base64: bool,
}

impl SecretAgentOptions {
    /// An absent agent is always valid.
    pub fn validate(agent: Option<&SecretAgentOptions>) -> Result<(), ValidationError> {
        let Some(agent) = agent else {
            return Ok(());
        };
        if agent.connection_type.is_empty() {
            return Err(ValidationError::MissingConnectionType);
        }
        if !agent.connection_type.eq_ignore_ascii_case("tcp")
            && !agent.connection_type.eq_ignore_ascii_case("uds")
        {
            return Err(ValidationError::UnsupportedConnectionType(
                agent.connection_type.clone(),
            ));
        }
        Ok(())
    }
}
