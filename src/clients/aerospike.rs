// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Connection settings for the Aerospike database client.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use super::{ClientError, Result, SetupError};
use crate::assemble::parse_racks;
use crate::engine::as_millis;
use crate::options::{AuthMode, ClientPolicy, ClusterOptions, HostTlsPort, TlsOptions};
use crate::secrets::{parse_secret, SecretResolver};

/// Everything the database client needs to connect, with secrets resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AerospikeClientConfig {
    pub seeds: Vec<HostTlsPort>,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub auth_mode: AuthMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsOptions>,
    #[serde(rename = "timeout_ms", serialize_with = "as_millis")]
    pub timeout: Duration,
    #[serde(rename = "idle_timeout_ms", serialize_with = "as_millis")]
    pub idle_timeout: Duration,
    #[serde(rename = "login_timeout_ms", serialize_with = "as_millis")]
    pub login_timeout: Duration,
    /// Racks to prefer for reads.
    pub rack_ids: Vec<i64>,
    pub rack_aware: bool,
    /// Connections to open up front; 0 opens none.
    pub warm_up: i64,
    pub services_alternate: bool,
}

/// Resolve the cluster settings into a client configuration.
///
/// `racks` is a comma-separated list of preferred rack ids, or empty.
pub fn new_aerospike_client(
    cluster: &ClusterOptions,
    policy: &ClientPolicy,
    racks: &str,
    warm_up: i64,
    resolver: Option<&dyn SecretResolver>,
) -> std::result::Result<AerospikeClientConfig, ClientError> {
    build(cluster, policy, racks, warm_up, resolver)
        .map_err(|source| ClientError::Aerospike { source })
}

fn build(
    cluster: &ClusterOptions,
    policy: &ClientPolicy,
    racks: &str,
    warm_up: i64,
    resolver: Option<&dyn SecretResolver>,
) -> Result<AerospikeClientConfig> {
    if cluster.seeds.is_empty() {
        return Err(SetupError::NoSeeds);
    }
    let seeds = cluster
        .seeds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    info!(%seeds, "initializing Aerospike client");

    let user = parse_secret(resolver, &cluster.user).map_err(|source| SetupError::ParseSecret {
        field: "user",
        source,
    })?;
    let password =
        parse_secret(resolver, &cluster.password).map_err(|source| SetupError::ParseSecret {
            field: "password",
            source,
        })?;
    let rack_ids = parse_racks(racks)?;
    Ok(AerospikeClientConfig {
        seeds: cluster.seeds.clone(),
        user,
        password,
        auth_mode: cluster.auth_mode,
        tls: cluster.tls.clone(),
        timeout: millis("client timeout", policy.timeout)?,
        idle_timeout: millis("client idle timeout", policy.idle_timeout)?,
        login_timeout: millis("client login timeout", policy.login_timeout)?,
        rack_aware: !rack_ids.is_empty(),
        rack_ids,
        warm_up,
        services_alternate: cluster.services_alternate,
    })
}

fn millis(field: &'static str, value: i64) -> Result<Duration> {
    u64::try_from(value)
        .map(Duration::from_millis)
        .map_err(|_| SetupError::OutOfRange { field, value })
}
