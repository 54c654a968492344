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

//! Default values shared by command-line flags and configuration files.
//!
//! Both [crate::flags] and [crate::dto] read from here, so a value changed
//! in one place changes for both ways of configuring a run.

/// Placeholder file name meaning standard input or output.
pub const STD_PLACEHOLDER: &str = "-";

/// Highest rack id accepted in rack lists.
pub const MAX_RACK: i64 = 1_000_000;

/// Total number of partitions in a namespace.
pub const MAX_PARTITIONS: u32 = 4096;

pub mod app {
    pub const VERBOSE: bool = false;
    pub const LOG_LEVEL: &str = "debug";
    pub const LOG_JSON: bool = false;
}

pub mod cluster {
    pub const HOST: &str = "127.0.0.1";
    pub const PORT: u16 = 3000;
    pub const AUTH: &str = "INTERNAL";
    pub const TLS_PROTOCOLS: &str = "+TLSv1.2";
}

/// Client policy timeouts, in milliseconds.
pub mod client_policy {
    pub const TIMEOUT: i64 = 30_000;
    pub const IDLE_TIMEOUT: i64 = 0;
    pub const LOGIN_TIMEOUT: i64 = 10_000;
}

pub mod common {
    pub const RECORDS_PER_SECOND: i64 = 0;
    pub const MAX_RETRIES: i64 = 5;
    pub const SOCKET_TIMEOUT: i64 = 10_000;
    pub const BANDWIDTH: i64 = 0;
    pub const INFO_TIMEOUT: i64 = 10_000;
    pub const INFO_MAX_RETRIES: u32 = 3;
    pub const INFO_RETRIES_MULTIPLIER: f64 = 1.0;
    pub const INFO_RETRY_INTERVAL: i64 = 1000;
    /// MiB.
    pub const STD_BUFFER_SIZE: i64 = 4;
}

pub mod backup {
    pub const PARALLEL: i64 = 1;
    pub const TOTAL_TIMEOUT: i64 = 0;
    /// MiB.
    pub const FILE_LIMIT: u64 = 250;
    pub const MAX_RECORDS: i64 = 0;
    pub const SLEEP_BETWEEN_RETRIES: i64 = 5;
    pub const ESTIMATE_SAMPLES: i64 = 10_000;
    pub const SCAN_PAGE_SIZE: i64 = 10_000;
}

pub mod restore {
    pub const PARALLEL: i64 = 0;
    pub const TOTAL_TIMEOUT: i64 = 10_000;
    pub const BATCH_SIZE: i64 = 128;
    pub const MAX_ASYNC_BATCHES: i64 = 32;
    pub const WARM_UP: i64 = 0;
    pub const EXTRA_TTL: i64 = 0;
    pub const RETRY_BASE_INTERVAL: i64 = 1000;
    pub const RETRY_MULTIPLIER: f64 = 1.0;
    pub const RETRY_MAX_ATTEMPTS: u32 = 0;
}

pub mod xdr {
    /// MiB.
    pub const FILE_LIMIT: u64 = 250;
    pub const PARALLEL_WRITE: i64 = 0;
    pub const DC: &str = "dc";
    pub const LOCAL_ADDRESS: &str = "127.0.0.1";
    pub const LOCAL_PORT: i64 = 8080;
    pub const REWIND: &str = "all";
    pub const MAX_THROUGHPUT: i64 = 0;
    pub const READ_TIMEOUT: i64 = 1000;
    pub const WRITE_TIMEOUT: i64 = 1000;
    pub const RESULT_QUEUE_SIZE: i64 = 256;
    pub const ACK_QUEUE_SIZE: i64 = 256;
    pub const MAX_CONNECTIONS: i64 = 4096;
    pub const INFO_POLING_PERIOD: i64 = 1000;
    pub const START_TIMEOUT: i64 = 30_000;
    pub const INFO_TIMEOUT: i64 = 10_000;
    pub const INFO_MAX_RETRIES: u32 = 3;
    pub const INFO_RETRIES_MULTIPLIER: f64 = 1.0;
    pub const INFO_RETRY_INTERVAL: i64 = 1000;
}

pub mod compression {
    pub const MODE: &str = "NONE";
    pub const LEVEL: i64 = 3;
}

pub mod encryption {
    pub const MODE: &str = "NONE";
}

pub mod secret_agent {
    pub const CONNECTION_TYPE: &str = "tcp";
    pub const TIMEOUT: i64 = 10_000;
}

/// Settings shared by the cloud storage providers.
pub mod cloud {
    pub const MAX_CONNS_PER_HOST: i64 = 0;
    pub const CALCULATE_CHECKSUM: bool = false;
    pub const RETRY_READ_BACKOFF: i64 = 1000;
    pub const RETRY_READ_MULTIPLIER: f64 = 2.0;
    pub const RETRY_READ_MAX_ATTEMPTS: u32 = 3;
    /// Milliseconds.
    pub const REQUEST_TIMEOUT: i64 = 600_000;
    /// Milliseconds.
    pub const RESTORE_POLL_DURATION: i64 = 60_000;
}

pub mod s3 {
    pub const RETRY_MAX_ATTEMPTS: i64 = 10;
    /// Seconds.
    pub const RETRY_MAX_BACKOFF: i64 = 90;
    /// Seconds.
    pub const RETRY_BACKOFF: i64 = 60;
    /// MiB.
    pub const CHUNK_SIZE: i64 = 5;
    pub const UPLOAD_CONCURRENCY: i64 = 0;
}

pub mod gcp {
    pub const RETRY_MAX_ATTEMPTS: i64 = 10;
    /// Milliseconds.
    pub const RETRY_BACKOFF_MAX: i64 = 90_000;
    /// Milliseconds.
    pub const RETRY_BACKOFF_INIT: i64 = 60_000;
    pub const RETRY_BACKOFF_MULTIPLIER: f64 = 2.0;
    /// MiB.
    pub const CHUNK_SIZE: i64 = 5;
}

pub mod azure {
    pub const RETRY_MAX_ATTEMPTS: i64 = 10;
    /// Seconds.
    pub const RETRY_TIMEOUT: i64 = 0;
    /// Seconds.
    pub const RETRY_DELAY: i64 = 60;
    /// Seconds.
    pub const RETRY_MAX_DELAY: i64 = 90;
    /// MiB.
    pub const BLOCK_SIZE: i64 = 5;
    pub const UPLOAD_CONCURRENCY: i64 = 1;
}

pub mod local {
    /// MiB.
    pub const BUFFER_SIZE: i64 = 5;
}
