//! Run-level reporting helpers.
//!
//! Progress logging while a phase runs, and the statistics printed at the end.

pub mod logging;
pub mod statistics;

// Re-export public API
pub use logging::log_progress;
pub use statistics::{print_error_statistics, print_summary};
