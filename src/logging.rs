// src/logging.rs
// Tracing subscriber setup: stderr, plus an optional append-only hook.log

use crate::config::LoggingConfig;
use crate::error::{HookError, Result};
use std::fs::{self, File, OpenOptions};
use std::str::FromStr;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Log file name inside the configured log directory
pub const LOG_FILE_NAME: &str = "hook.log";

/// Parse a level name, falling back to INFO
pub fn parse_level(level: &str) -> (Level, bool) {
    match Level::from_str(level.trim()) {
        Ok(level) => (level, true),
        Err(_) => (Level::INFO, false),
    }
}

fn open_log_file(config: &LoggingConfig) -> std::io::Result<File> {
    let dir = config.log_dir();
    fs::create_dir_all(&dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
}

/// Install the global subscriber. Call once, at process entry.
///
/// Stdout stays clean: the SessionStart report is the only thing written there.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let (level, level_ok) = parse_level(&config.level);

    let mut file_error = None;
    let file = if config.file {
        match open_log_file(config) {
            Ok(file) => Some(file),
            Err(e) => {
                file_error = Some(e);
                None
            }
        }
    } else {
        None
    };

    let installed = match file {
        Some(file) => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr.and(Mutex::new(file)))
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
        }
    };
    installed.map_err(|e| HookError::Config(format!("failed to install logger: {e}")))?;

    if !level_ok {
        tracing::warn!(level = %config.level, "Unknown log level, using info");
    }
    if let Some(e) = file_error {
        tracing::warn!(
            dir = %config.log_dir().display(),
            error = %e,
            "Log file unavailable, logging to stderr only"
        );
    }
    Ok(())
}
