//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the application,
//! including timeouts, size limits, panel locations and output file names.

/// Interval in seconds between progress log lines while a phase is running.
pub const LOGGING_INTERVAL: u64 = 5;

/// Per-request HTTP timeout in seconds (status sampling and probe fetches).
pub const HTTP_TIMEOUT_SECS: u64 = 15;

/// Lower bound on the verification worker pool, regardless of core count.
pub const MIN_WORKERS: usize = 2;
/// Default ceiling on the verification worker pool.
pub const DEFAULT_MAX_WORKERS: usize = 64;
/// Default number of concurrent status samples.
pub const DEFAULT_SAMPLE_CONCURRENCY: usize = 20;

/// Default User-Agent string for HTTP requests.
///
/// Some hosted sites reject obvious non-browser clients, which would turn a
/// reachable domain into a false "mismatched" result. Users can override this via
/// the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Response handling
/// Maximum response body size in bytes (2MB) inspected for the directory listing signature
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;
/// Maximum number of redirect hops to follow
pub const MAX_REDIRECT_HOPS: usize = 10;
/// Stylesheet name served by the web server's automatic directory index
pub const AUTOINDEX_STYLESHEET: &str = "autoindex.css";
/// Status label reported instead of the numeric code for exposed directory listings
pub const INDEX_OF_LABEL: &str = "index of";

// Control panels
/// Presence of this directory identifies a cPanel host
pub const CPANEL_PATH: &str = "/usr/local/cpanel";
/// Presence of this directory identifies a DirectAdmin host
pub const DIRECTADMIN_PATH: &str = "/usr/local/directadmin";
/// cPanel domain -> document root mapping file
pub const USERDATA_DOMAINS_FILE: &str = "/etc/userdatadomains";
/// WHM API binary used to enumerate cPanel domains
pub const WHMAPI_BIN: &str = "whmapi1";
/// Parent of DirectAdmin hosting accounts
pub const HOME_DIR: &str = "/home";
/// Entries under `{account}/domains` that are not domains
pub const DIRECTADMIN_RESERVED: &[&str] = &["sharedip", "suspended", "default"];

// Probe
/// Name of the marker file written into a mismatched domain's document root
pub const MARKER_FILE_NAME: &str = "mismatch.txt";

// Outputs
/// Default directory for all run artifacts
pub const TRANSFER_DIR: &str = "/home/transfer";
pub const MISMATCHED_FILE: &str = "mismatched_domains.txt";
pub const HEALTHY_FILE: &str = "healthy_domains.txt";
pub const DIRECT_FILE: &str = "direct_domains.txt";
pub const NO_PING_FILE: &str = "no_ping_domains.txt";
pub const COMBINED_FILE: &str = "combined_domains.txt";
pub const REPORT_HTML_FILE: &str = "domain_report.html";
pub const REPORT_JSON_FILE: &str = "domain_report.json";
/// Informational log written next to the reports unless `--log-file` is given
pub const INFO_LOG_FILE: &str = "domain_status.log";
/// Error-only log written next to the reports unless `--error-log-file` is given
pub const ERROR_LOG_FILE: &str = "domain_errors.log";
/// Sampled HTTP status log written next to the reports unless `--status-log-file` is given
pub const STATUS_LOG_FILE: &str = "domain_statuses.log";
/// Log target of sampled HTTP statuses; records under it go to the status log only
pub const STATUS_LOG_TARGET: &str = "domain_audit::status";
