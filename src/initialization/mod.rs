//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger and its file sinks
//! - HTTP client
//! - DNS resolver
//! - Concurrency semaphores

mod client;
mod logger;
mod resolver;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use client::init_client;
pub use logger::{init_logger_with, LogSinks};
pub use resolver::init_resolver;

/// Initializes a semaphore for controlling concurrency.
///
/// A zero count is raised to one so a misconfigured limit cannot stall a phase.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count.max(1)))
}
