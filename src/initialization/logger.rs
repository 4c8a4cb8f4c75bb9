//! Logger initialization.
//!
//! Console output goes through `env_logger` with custom formatting. Every record
//! that passes the level filter is also appended to the informational log file,
//! and error records additionally to the error-only log file. Sampled HTTP
//! statuses (the `STATUS_LOG_TARGET` target) go to their own status log instead.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::config::{LogFormat, STATUS_LOG_TARGET};
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter, Record};

/// File sinks attached to the logger.
#[derive(Clone)]
pub struct LogSinks {
    info: Arc<Mutex<File>>,
    errors: Arc<Mutex<File>>,
    statuses: Arc<Mutex<File>>,
}

impl LogSinks {
    /// Opens (appending, creating parents as needed) the informational,
    /// error-only and status log files.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::LoggerSetupError` if any file cannot be opened.
    pub fn open(
        info_path: &Path,
        error_path: &Path,
        status_path: &Path,
    ) -> Result<Self, InitializationError> {
        Ok(Self {
            info: Arc::new(Mutex::new(open_append(info_path)?)),
            errors: Arc::new(Mutex::new(open_append(error_path)?)),
            statuses: Arc::new(Mutex::new(open_append(status_path)?)),
        })
    }

    fn write(&self, record: &Record<'_>) {
        let line = format_file_line(record.level(), &record.args().to_string());
        if record.target() == STATUS_LOG_TARGET {
            if let Ok(mut file) = self.statuses.lock() {
                let _ = file.write_all(line.as_bytes());
            }
            return;
        }
        if let Ok(mut file) = self.info.lock() {
            let _ = file.write_all(line.as_bytes());
        }
        if record.level() == Level::Error {
            if let Ok(mut file) = self.errors.lock() {
                let _ = file.write_all(line.as_bytes());
            }
        }
    }
}

fn open_append(path: &Path) -> Result<File, InitializationError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            InitializationError::LoggerSetupError(format!(
                "cannot create {}: {e}",
                parent.display()
            ))
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            InitializationError::LoggerSetupError(format!("cannot open {}: {e}", path.display()))
        })
}

/// One line of a log file: `2024-01-01 12:00:00 - ERROR - message`.
fn format_file_line(level: Level, message: &str) -> String {
    format!(
        "{} - {} - {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        level,
        message
    )
}

/// Initializes the logger with the specified level, format and file sinks.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(
    level: LevelFilter,
    format: LogFormat,
    sinks: Option<LogSinks>,
) -> Result<(), InitializationError> {
    // Read from RUST_LOG environment variable first, then override with CLI arg
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    // Truncated or malformed DNS answers are handled by the resolver
    builder.filter_module("trust_dns_proto", LevelFilter::Error);
    builder.filter_module("trust_dns_resolver", LevelFilter::Warn);
    builder.filter_module("domain_audit", level);
    // The status log is complete whatever the console verbosity
    builder.filter_module(STATUS_LOG_TARGET, level.max(LevelFilter::Info));

    match format {
        LogFormat::Json => {
            builder.format(move |buf, record| {
                if let Some(sinks) = &sinks {
                    sinks.write(record);
                }
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(move |buf, record| {
                if let Some(sinks) = &sinks {
                    sinks.write(record);
                }
                let level = record.level();
                let colored_level = match level {
                    Level::Error => level.to_string().red(),
                    Level::Warn => level.to_string().yellow(),
                    Level::Info => level.to_string().green(),
                    Level::Debug => level.to_string().blue(),
                    Level::Trace => level.to_string().purple(),
                };

                let emoji = match level {
                    Level::Error => "❌",
                    Level::Warn => "⚠️",
                    Level::Info => "✔️",
                    Level::Debug => "🔍",
                    Level::Trace => "🔬",
                };

                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    emoji,
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init() so a second initialization (tests) reports an error instead of panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
