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

//! Periodic progress and time-remaining logs for a running backup or
//! restore.
//!
//! Each reporter polls the counters once per tick, and returns when the
//! job is complete or the token is cancelled.

use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::stats::{BackupStats, Metrics, RestoreStats};

/// How often counters are polled.
pub const TICK: Duration = Duration::from_secs(1);

/// Progress below this fraction, or changes smaller than it, aren't logged.
const MIN_STEP: f64 = 0.01;

/// Returned by a size accessor once the job has finished.
pub const SIZE_DONE: i64 = -1;

/// Why [print_estimate] didn't produce a new percentage.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EstimateSignal {
    #[error("job is complete")]
    Complete,

    #[error("not enough progress to report")]
    Insufficient,
}

/// Time left, given the time so far and the fraction done.
///
/// Zero below 1%, where the estimate would be meaningless.
pub fn estimated_end_time(elapsed: Duration, pct_done: f64) -> Duration {
    if pct_done < MIN_STEP {
        return Duration::ZERO;
    }
    elapsed.mul_f64(((1.0 - pct_done) / pct_done).max(0.0))
}

/// Log progress if it moved by at least a percentage point since `previous`.
///
/// Returns the new fraction done, which becomes the next `previous`.
pub fn print_estimate(
    start: Instant,
    done: f64,
    total: f64,
    previous: f64,
    metrics: &dyn Fn() -> Metrics,
) -> Result<f64, EstimateSignal> {
    if total <= 0.0 {
        return Err(EstimateSignal::Insufficient);
    }
    let pct = done / total;
    if pct >= 1.0 {
        return Err(EstimateSignal::Complete);
    }
    if pct < MIN_STEP || pct - previous < MIN_STEP {
        return Err(EstimateSignal::Insufficient);
    }
    let remaining = estimated_end_time(start.elapsed(), pct);
    let metrics = metrics();
    info!(
        percent = format!("{:.2}%", pct * 100.0),
        rps = metrics.records_per_second,
        kbps = metrics.kilobytes_per_second,
        remaining_secs = remaining.as_secs(),
        read_queue = metrics.read_queue_size,
        write_queue = metrics.write_queue_size,
        "progress"
    );
    Ok(pct)
}

fn ticker() -> tokio::time::Interval {
    let mut ticker = interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Report backup progress as records read out of records expected.
pub async fn report_backup_estimate(
    cancel: CancellationToken,
    stats: &BackupStats,
    metrics: impl Fn() -> Metrics,
) {
    let mut ticker = ticker();
    let mut previous = 0.0;
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = ticker.tick() => {
                match print_estimate(
                    stats.start_time(),
                    stats.read_records() as f64,
                    stats.total_records() as f64,
                    previous,
                    &metrics,
                ) {
                    Ok(pct) => previous = pct,
                    Err(EstimateSignal::Complete) => return,
                    Err(EstimateSignal::Insufficient) => {}
                }
            }
        }
    }
}

/// Report restore progress as bytes read out of the total backup size.
///
/// `size` returns 0 while the size is still being measured, and
/// [SIZE_DONE] once there is nothing more to report.
pub async fn report_restore_estimate(
    cancel: CancellationToken,
    stats: &RestoreStats,
    metrics: impl Fn() -> Metrics,
    size: impl Fn() -> i64,
) {
    let mut ticker = ticker();
    let mut previous = 0.0;
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = ticker.tick() => {
                let total = size();
                if total == SIZE_DONE {
                    return;
                }
                if total <= 0 {
                    continue;
                }
                match print_estimate(
                    stats.start_time(),
                    stats.bytes_read() as f64,
                    total as f64,
                    previous,
                    &metrics,
                ) {
                    Ok(pct) => previous = pct,
                    Err(EstimateSignal::Complete) => return,
                    Err(EstimateSignal::Insufficient) => {}
                }
            }
        }
    }
}

/// Log how many files of a kind were found, once the count is known.
pub async fn report_files_number(
    cancel: CancellationToken,
    number: impl Fn() -> i64,
    file_types: &str,
) {
    let mut ticker = ticker();
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = ticker.tick() => {
                let found = number();
                if found == SIZE_DONE {
                    return;
                }
                if found > 0 {
                    info!(number = found, "found {file_types} files");
                    return;
                }
            }
        }
    }
}
