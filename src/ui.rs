// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! Log output setup.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{trace, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::Layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;

use crate::errors::Error;
use crate::options::AppOptions;
use crate::Result;

/// Chosen style of timestamp prefix on trace lines.
#[derive(clap::ValueEnum, Clone, Debug, Default)]
pub enum TraceTimeStyle {
    /// No timestamp on trace lines.
    #[default]
    None,
    /// Universal time, in RFC 3339 style.
    Utc,
    /// Local time, in RFC 3339, using the offset when the program starts.
    Local,
    /// Time since the start of the process, in seconds.
    Relative,
}

/// Pick the console level from the app options.
///
/// Without `verbose`, nothing more detailed than info is shown. `debug`
/// shows everything.
pub fn console_level(app: &AppOptions, debug: bool) -> Result<Level> {
    if debug {
        return Ok(Level::TRACE);
    }
    let level =
        Level::from_str(&app.log_level).map_err(|_| Error::LogLevel(app.log_level.clone()))?;
    if app.verbose {
        Ok(level)
    } else {
        Ok(level.min(Level::INFO))
    }
}

/// Send logs to stderr and, optionally, append them as JSON to a file.
///
/// The returned guard flushes the file when dropped, so keep it until the
/// program exits.
#[must_use = "dropping the guard stops file logging"]
pub fn enable_tracing(
    time_style: &TraceTimeStyle,
    console_level: Level,
    json_console: bool,
    json_path: &Option<PathBuf>,
) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::fmt::time;
    fn hookup<FT>(
        timer: FT,
        console_level: Level,
        json_console: bool,
        json_path: &Option<PathBuf>,
    ) -> Result<Option<WorkerGuard>>
    where
        FT: FormatTime + Send + Sync + 'static,
    {
        let console_filter = || filter::Targets::new().with_target("asbackup", console_level);
        let (text_layer, json_console_layer) = if json_console {
            let layer = tracing_subscriber::fmt::Layer::default()
                .json()
                .with_writer(io::stderr)
                .with_timer(timer)
                .with_filter(console_filter());
            (None, Some(layer))
        } else {
            let layer = tracing_subscriber::fmt::Layer::default()
                .with_ansi(clicolors_control::colors_enabled())
                .with_writer(io::stderr)
                .with_timer(timer)
                .with_filter(console_filter());
            (Some(layer), None)
        };
        let (json_file_layer, flush_guard) = match json_path {
            Some(path) => {
                let file_writer = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| Error::LogFile {
                        path: path.clone(),
                        source,
                    })?;
                let (non_blocking, guard) = tracing_appender::non_blocking(file_writer);
                let layer = tracing_subscriber::fmt::Layer::default()
                    .json()
                    .with_writer(non_blocking);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };
        Registry::default()
            .with(text_layer)
            .with(json_console_layer)
            .with(crate::trace_counter::CounterLayer())
            .with(json_file_layer)
            .try_init()
            .map_err(|_| Error::TracingAlreadyEnabled)?;
        Ok(flush_guard)
    }

    let flush_guard = match time_style {
        TraceTimeStyle::None => hookup((), console_level, json_console, json_path)?,
        TraceTimeStyle::Utc => hookup(
            time::UtcTime::rfc_3339(),
            console_level,
            json_console,
            json_path,
        )?,
        TraceTimeStyle::Relative => {
            hookup(time::uptime(), console_level, json_console, json_path)?
        }
        TraceTimeStyle::Local => match time::OffsetTime::local_rfc_3339() {
            Ok(timer) => hookup(timer, console_level, json_console, json_path)?,
            Err(_) => {
                let guard = hookup(
                    time::UtcTime::rfc_3339(),
                    console_level,
                    json_console,
                    json_path,
                )?;
                warn!("local time offset is unknown; logging in UTC");
                guard
            }
        },
    };
    trace!("Tracing enabled");
    Ok(flush_guard)
}
