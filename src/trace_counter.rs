// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Tally of error and warning events, so that a run which finished can
//! still exit with a distinct code when something went wrong on the way.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

static ERRORS: AtomicUsize = AtomicUsize::new(0);
static WARNINGS: AtomicUsize = AtomicUsize::new(0);

/// Error and warning events seen by [CounterLayer].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogCounts {
    pub errors: usize,
    pub warnings: usize,
}

impl LogCounts {
    /// Counts since the process started.
    pub fn now() -> LogCounts {
        LogCounts {
            errors: ERRORS.load(Ordering::Relaxed),
            warnings: WARNINGS.load(Ordering::Relaxed),
        }
    }

    /// Events logged between `earlier` and this snapshot.
    pub fn since(self, earlier: LogCounts) -> LogCounts {
        LogCounts {
            errors: self.errors.saturating_sub(earlier.errors),
            warnings: self.warnings.saturating_sub(earlier.warnings),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors == 0 && self.warnings == 0
    }
}

/// Counts events at any level filter; installed next to the console layer.
pub(crate) struct CounterLayer();

impl<S: Subscriber> Layer<S> for CounterLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        if level == Level::ERROR {
            ERRORS.fetch_add(1, Ordering::Relaxed);
        } else if level == Level::WARN {
            WARNINGS.fetch_add(1, Ordering::Relaxed);
        }
    }
}
