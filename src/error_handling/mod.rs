//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for initialization, discovery, probing and output
//! - Processing statistics tracking (per-category failure counters)
//! - Error type extraction from `reqwest` transport errors
//!
//! Only initialization and discovery errors fail a run. Everything else is
//! absorbed into the per-domain outcome and counted here.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, update_error_stats};
pub use stats::ProcessingStats;
pub use types::{DiscoveryError, ErrorType, InitializationError, OutputError, ProbeError};
