// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Connection pool settings shared by the cloud storage clients.

use std::time::Duration;

use object_store::ClientOptions;

use crate::options::StorageCommon;

const DIAL_TIMEOUT: Duration = Duration::from_secs(30);
const KEEP_ALIVE: Duration = Duration::from_secs(30);
const IDLE_TIMEOUT: Duration = Duration::from_secs(120);
const TLS_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);
const READ_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTransport {
    pub dial_timeout: Duration,
    pub keep_alive: Duration,
    pub idle_timeout: Duration,
    pub tls_handshake_timeout: Duration,
    pub read_buffer_size: usize,
    /// None is unlimited.
    pub max_conns_per_host: Option<usize>,
    /// Whole-request timeout; None is unlimited.
    pub request_timeout: Option<Duration>,
}

impl HttpTransport {
    /// `max_conns_per_host` and `request_timeout` (milliseconds) are 0 for
    /// no limit.
    pub fn new(max_conns_per_host: i64, request_timeout: i64) -> HttpTransport {
        HttpTransport {
            dial_timeout: DIAL_TIMEOUT,
            keep_alive: KEEP_ALIVE,
            idle_timeout: IDLE_TIMEOUT,
            tls_handshake_timeout: TLS_HANDSHAKE_TIMEOUT,
            read_buffer_size: READ_BUFFER_SIZE,
            max_conns_per_host: usize::try_from(max_conns_per_host)
                .ok()
                .filter(|n| *n > 0),
            request_timeout: u64::try_from(request_timeout)
                .ok()
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
        }
    }

    pub fn from_common(common: &StorageCommon) -> HttpTransport {
        HttpTransport::new(common.max_conns_per_host, common.request_timeout)
    }

    pub fn client_options(&self) -> ClientOptions {
        let mut options = ClientOptions::new()
            .with_connect_timeout(self.dial_timeout)
            .with_pool_idle_timeout(self.idle_timeout)
            .with_http2_keep_alive_interval(self.keep_alive)
            .with_http2_keep_alive_while_idle();
        if let Some(max) = self.max_conns_per_host {
            options = options.with_pool_max_idle_per_host(max);
        }
        match self.request_timeout {
            Some(timeout) => options.with_timeout(timeout),
            None => options.with_timeout_disabled(),
        }
    }
}
