//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    CPANEL_PATH, DEFAULT_MAX_WORKERS, DEFAULT_SAMPLE_CONCURRENCY, DEFAULT_USER_AGENT,
    DIRECTADMIN_PATH, ERROR_LOG_FILE, HOME_DIR, HTTP_TIMEOUT_SECS, INFO_LOG_FILE,
    MARKER_FILE_NAME, MIN_WORKERS, STATUS_LOG_FILE, TRANSFER_DIR, USERDATA_DOMAINS_FILE,
    WHMAPI_BIN,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which control panel to read the domain list from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PanelChoice {
    /// Detect from the panel install directories
    Auto,
    /// Force cPanel discovery
    Cpanel,
    /// Force DirectAdmin discovery
    Directadmin,
}

/// Audit configuration.
///
/// Parsed from the command line by the binary; library users can build it
/// programmatically from `Default`.
///
/// # Examples
///
/// ```no_run
/// use domain_audit::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     output_dir: PathBuf::from("/tmp/audit"),
///     max_workers: 8,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "domain_audit",
    about = "Checks which hosted domains still point at this server and whether the rest are reachable."
)]
pub struct Config {
    /// Directory receiving the domain lists and reports
    #[arg(long, value_parser, default_value = TRANSFER_DIR)]
    pub output_dir: PathBuf,

    /// Control panel: auto|cpanel|directadmin
    #[arg(long, value_enum, default_value_t = PanelChoice::Auto)]
    pub panel: PanelChoice,

    /// Use this address as the server's own IP instead of resolving the hostname
    #[arg(long)]
    pub server_ip: Option<IpAddr>,

    /// Ceiling on concurrent domain verifications.
    ///
    /// The pool size is max(2, available cores), capped by this value.
    #[arg(long, default_value_t = DEFAULT_MAX_WORKERS)]
    pub max_workers: usize,

    /// Concurrent HTTP status samples
    #[arg(long, default_value_t = DEFAULT_SAMPLE_CONCURRENCY)]
    pub sample_concurrency: usize,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// File name of the probe marker written into document roots
    #[arg(long, default_value = MARKER_FILE_NAME)]
    pub marker_name: String,

    /// Only count a probe as successful on a 2xx response that serves the marker content
    #[arg(long)]
    pub strict_probe: bool,

    /// WHM API binary used for cPanel discovery
    #[arg(long, default_value = WHMAPI_BIN)]
    pub whmapi_bin: String,

    /// cPanel userdata domains file (domain -> document root)
    #[arg(long, value_parser, default_value = USERDATA_DOMAINS_FILE)]
    pub userdata_domains: PathBuf,

    /// Parent directory of DirectAdmin hosting accounts
    #[arg(long, value_parser, default_value = HOME_DIR)]
    pub home_dir: PathBuf,

    /// cPanel install directory used for panel detection
    #[arg(long, value_parser, default_value = CPANEL_PATH, hide = true)]
    pub cpanel_dir: PathBuf,

    /// DirectAdmin install directory used for panel detection
    #[arg(long, value_parser, default_value = DIRECTADMIN_PATH, hide = true)]
    pub directadmin_dir: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Informational log file (defaults to <output-dir>/domain_status.log)
    #[arg(long, value_parser)]
    pub log_file: Option<PathBuf>,

    /// Error-only log file (defaults to <output-dir>/domain_errors.log)
    #[arg(long, value_parser)]
    pub error_log_file: Option<PathBuf>,

    /// Sampled HTTP status log file (defaults to <output-dir>/domain_statuses.log)
    #[arg(long, value_parser)]
    pub status_log_file: Option<PathBuf>,
}

impl Config {
    /// Path of the informational log sink.
    pub fn info_log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.output_dir.join(INFO_LOG_FILE))
    }

    /// Path of the error-only log sink.
    pub fn error_log_path(&self) -> PathBuf {
        self.error_log_file
            .clone()
            .unwrap_or_else(|| self.output_dir.join(ERROR_LOG_FILE))
    }

    /// Path of the sampled HTTP status log.
    pub fn status_log_path(&self) -> PathBuf {
        self.status_log_file
            .clone()
            .unwrap_or_else(|| self.output_dir.join(STATUS_LOG_FILE))
    }

    /// Size of the verification worker pool for this host.
    pub fn worker_limit(&self) -> usize {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(MIN_WORKERS);
        worker_limit(cores, self.max_workers)
    }
}

/// `max(MIN_WORKERS, cores)` capped by `ceiling`; never zero.
pub(crate) fn worker_limit(cores: usize, ceiling: usize) -> usize {
    cores.max(MIN_WORKERS).min(ceiling).max(1)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(TRANSFER_DIR),
            panel: PanelChoice::Auto,
            server_ip: None,
            max_workers: DEFAULT_MAX_WORKERS,
            sample_concurrency: DEFAULT_SAMPLE_CONCURRENCY,
            timeout_seconds: HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            marker_name: MARKER_FILE_NAME.to_string(),
            strict_probe: false,
            whmapi_bin: WHMAPI_BIN.to_string(),
            userdata_domains: PathBuf::from(USERDATA_DOMAINS_FILE),
            home_dir: PathBuf::from(HOME_DIR),
            cpanel_dir: PathBuf::from(CPANEL_PATH),
            directadmin_dir: PathBuf::from(DIRECTADMIN_PATH),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            log_file: None,
            error_log_file: None,
            status_log_file: None,
        }
    }
}
