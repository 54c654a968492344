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

//! Counters updated by a running backup or restore, and read by the
//! progress reporter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use derive_more::{Add, AddAssign};

/// Counters for a backup. The engine increments these from many tasks.
#[derive(Debug)]
pub struct BackupStats {
    start: Instant,
    /// Records read from the cluster so far.
    pub read_records: AtomicU64,
    /// Records the scan is expected to return in total.
    pub total_records: AtomicU64,
    pub bytes_written: AtomicU64,
    pub files_written: AtomicU64,
}

impl BackupStats {
    pub fn new() -> BackupStats {
        BackupStats {
            start: Instant::now(),
            read_records: AtomicU64::new(0),
            total_records: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            files_written: AtomicU64::new(0),
        }
    }

    pub fn start_time(&self) -> Instant {
        self.start
    }

    pub fn read_records(&self) -> u64 {
        self.read_records.load(Ordering::Relaxed)
    }

    pub fn total_records(&self) -> u64 {
        self.total_records.load(Ordering::Relaxed)
    }
}

impl Default for BackupStats {
    fn default() -> Self {
        BackupStats::new()
    }
}

/// Counters for a restore.
#[derive(Debug)]
pub struct RestoreStats {
    start: Instant,
    pub records_read: AtomicU64,
    pub records_inserted: AtomicU64,
    pub records_skipped: AtomicU64,
    /// Already present, and not overwritten.
    pub records_existed: AtomicU64,
    /// Rejected by the server, and ignored.
    pub records_ignored: AtomicU64,
    pub records_expired: AtomicU64,
    /// Backup file bytes consumed so far.
    pub bytes_read: AtomicU64,
}

impl RestoreStats {
    pub fn new() -> RestoreStats {
        RestoreStats {
            start: Instant::now(),
            records_read: AtomicU64::new(0),
            records_inserted: AtomicU64::new(0),
            records_skipped: AtomicU64::new(0),
            records_existed: AtomicU64::new(0),
            records_ignored: AtomicU64::new(0),
            records_expired: AtomicU64::new(0),
            bytes_read: AtomicU64::new(0),
        }
    }

    pub fn start_time(&self) -> Instant {
        self.start
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read.load(Ordering::Relaxed)
    }

    pub fn incr_records_inserted(&self) {
        self.records_inserted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_records_existed(&self) {
        self.records_existed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records that reached the server, whatever happened to them there.
    pub fn records_processed(&self) -> u64 {
        [
            &self.records_inserted,
            &self.records_skipped,
            &self.records_existed,
            &self.records_ignored,
            &self.records_expired,
        ]
        .iter()
        .map(|counter| counter.load(Ordering::Relaxed))
        .sum()
    }
}

impl Default for RestoreStats {
    fn default() -> Self {
        RestoreStats::new()
    }
}

/// Throughput and queue depths sampled from the running pipeline.
#[derive(Add, AddAssign, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    pub records_per_second: u64,
    pub kilobytes_per_second: u64,
    pub read_queue_size: u64,
    pub write_queue_size: u64,
}
