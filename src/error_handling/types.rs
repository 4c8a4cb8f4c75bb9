//! Error type definitions.
//!
//! This module defines all error types used throughout the application, plus the
//! `ErrorType` categories counted in the end-of-run statistics.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error opening a log sink file.
    #[error("Logger initialization error: {0}")]
    LoggerSetupError(String),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The server's own address could not be determined.
    #[error("Server identity error: {0}")]
    ServerIdentityError(String),
}

/// Errors that make domain discovery impossible (fatal to the run).
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Neither supported control panel is installed.
    #[error("Unknown control panel: neither cPanel nor DirectAdmin was found")]
    UnknownPanel,

    /// The panel's enumeration command could not be run or exited non-zero.
    #[error("Panel command `{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    /// The panel returned output that is not the expected JSON document.
    #[error("Failed to parse panel output: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// A directory the panel keeps its domains in could not be read.
    #[error("Failed to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Discovery succeeded but found nothing to check.
    #[error("No domains were found")]
    NoDomains,
}

/// Reasons a mismatch probe did not confirm reachability.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// No document root is known for the domain, or it does not exist.
    #[error("Document root for {domain} not found or doesn't exist")]
    MissingRoot { domain: String },

    /// The marker file could not be written.
    #[error("Failed to write marker file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The marker file could not be fetched over HTTP.
    #[error("Failed to fetch marker for {domain}: {source}")]
    FetchFailed {
        domain: String,
        #[source]
        source: ReqwestError,
    },

    /// Strict mode: the domain answered, but not with the marker.
    #[error("Marker for {domain} was not served (HTTP {status})")]
    MarkerNotServed { domain: String, status: u16 },
}

/// Failures writing run artifacts. Each artifact fails independently.
#[derive(Error, Debug)]
pub enum OutputError {
    /// The output directory could not be created.
    #[error("Error creating directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact could not be written.
    #[error("Error saving {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON report could not be serialized.
    #[error("Error serializing report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Per-domain failure categories counted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // DNS
    DnsResolutionError,
    // Probe
    ProbeMissingRoot,
    ProbeWriteError,
    ProbeFetchError,
    ProbeMarkerNotServed,
    ProbeCleanupError,
    // Status sampling
    HttpRequestTimeoutError,
    HttpRequestConnectError,
    HttpRequestRedirectError,
    HttpRequestBodyError,
    HttpRequestOtherError,
    // Run
    TaskPanicked,
    OutputWriteError,
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::DnsResolutionError => "DNS resolution error",
            ErrorType::ProbeMissingRoot => "Probe: document root missing",
            ErrorType::ProbeWriteError => "Probe: marker write error",
            ErrorType::ProbeFetchError => "Probe: marker fetch error",
            ErrorType::ProbeMarkerNotServed => "Probe: marker not served",
            ErrorType::ProbeCleanupError => "Probe: marker cleanup error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestRedirectError => "HTTP request redirect error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::TaskPanicked => "Task panicked",
            ErrorType::OutputWriteError => "Output write error",
        }
    }
}

impl ProbeError {
    /// Statistics category for this probe failure.
    pub fn error_type(&self) -> ErrorType {
        match self {
            ProbeError::MissingRoot { .. } => ErrorType::ProbeMissingRoot,
            ProbeError::WriteFailed { .. } => ErrorType::ProbeWriteError,
            ProbeError::FetchFailed { .. } => ErrorType::ProbeFetchError,
            ProbeError::MarkerNotServed { .. } => ErrorType::ProbeMarkerNotServed,
        }
    }
}
