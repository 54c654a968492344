// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Where the cluster is and how to log in.

use std::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::validate::ValidationError;

/// A seed node: host, optional TLS name, and port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostTlsPort {
    pub host: String,
    pub tls_name: Option<String>,
    pub port: u16,
}

impl HostTlsPort {
    /// Parse `host[:tls-name][:port]`, with IPv6 hosts in brackets.
    pub fn parse(seed: &str, default_port: u16) -> Result<HostTlsPort, ValidationError> {
        let invalid = |reason: &'static str| ValidationError::InvalidSeed {
            seed: seed.to_owned(),
            reason,
        };
        let (host, rest) = if let Some(bracketed) = seed.strip_prefix('[') {
            let (host, rest) = bracketed
                .split_once(']')
                .ok_or_else(|| invalid("unterminated ipv6 address"))?;
            match rest.strip_prefix(':') {
                Some(rest) => (host, Some(rest)),
                None if rest.is_empty() => (host, None),
                None => return Err(invalid("unexpected text after ipv6 address")),
            }
        } else {
            match seed.split_once(':') {
                Some((host, rest)) => (host, Some(rest)),
                None => (seed, None),
            }
        };
        if host.is_empty() {
            return Err(invalid("empty host"));
        }
        let parse_port = |port: &str| port.parse::<u16>().map_err(|_| invalid("bad port"));
        let (tls_name, port) = match rest.map(|r| r.split(':').collect::<Vec<_>>()) {
            None => (None, default_port),
            Some(parts) => match parts.as_slice() {
                [one] if one.chars().all(|c| c.is_ascii_digit()) => (None, parse_port(one)?),
                [tls_name] => (Some(tls_name.to_string()), default_port),
                [tls_name, port] => (Some(tls_name.to_string()), parse_port(port)?),
                _ => return Err(invalid("too many ':' separated parts")),
            },
        };
        Ok(HostTlsPort {
            host: host.to_owned(),
            tls_name: tls_name.filter(|name| !name.is_empty()),
            port,
        })
    }

    /// Parse a comma-separated list of seeds.
    pub fn parse_list(seeds: &str, default_port: u16) -> Result<Vec<HostTlsPort>, ValidationError> {
        crate::assemble::split_by_comma(seeds)
            .iter()
            .map(|seed| HostTlsPort::parse(seed, default_port))
            .collect()
    }
}

impl fmt::Display for HostTlsPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]", self.host)?;
        } else {
            write!(f, "{}", self.host)?;
        }
        if let Some(tls_name) = &self.tls_name {
            write!(f, ":{tls_name}")?;
        }
        write!(f, ":{}", self.port)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AuthMode {
    #[default]
    Internal,
    External,
    Pki,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TlsOptions {
    pub name: String,
    pub protocols: String,
    pub ca_file: String,
    pub ca_path: String,
    pub cert_file: String,
    pub key_file: String,
    #[serde(skip_serializing)]
    pub key_file_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterOptions {
    pub seeds: Vec<HostTlsPort>,
    pub user: String,
    pub password: String,
    pub auth_mode: AuthMode,
    /// TLS is enabled when this is set.
    pub tls: Option<TlsOptions>,
    pub services_alternate: bool,
}

/// Client-side timeouts, in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPolicy {
    pub timeout: i64,
    pub idle_timeout: i64,
    pub login_timeout: i64,
}
