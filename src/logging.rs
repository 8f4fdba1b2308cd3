//! File logging for the TUI.
//!
//! The terminal belongs to the UI, so log lines go to a file through a
//! non-blocking writer. The returned guard flushes it on drop and must live as
//! long as the program.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

use crate::config::Settings;

const LOG_FILE_NAME: &str = "playdeck.log";

/// Resolve the log file: explicit setting, else `playdeck.log` in the data dir.
pub fn log_path(settings: &Settings) -> Option<PathBuf> {
    settings
        .logging
        .file
        .clone()
        .or_else(|| settings.data_dir().map(|d| d.join(LOG_FILE_NAME)))
}

fn split(path: &Path) -> Option<(&Path, &std::ffi::OsStr)> {
    let file = path.file_name()?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    Some((dir, file))
}

/// Install the global subscriber. Returns `None` (logging disabled) when the
/// log file cannot be prepared.
pub fn init(settings: &Settings) -> Option<WorkerGuard> {
    let path = log_path(settings)?;
    let (dir, file) = split(&path)?;
    fs::create_dir_all(dir).ok()?;
    // The appender panics on a file it cannot open; probe first.
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let level = Level::from_str(&settings.logging.level).unwrap_or(Level::INFO);
    let appender = tracing_appender::rolling::never(dir, file);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(level)
        .with_thread_names(true)
        .try_init()
        .ok()?;

    Some(guard)
}
