//! Shared utilities.
//!
//! This module provides:
//! - Bounded task groups that join every task and isolate panics
//! - CSS selector parsing utilities

mod selector;
mod task_group;

pub use selector::parse_selector_with_fallback;
pub use task_group::{run_bounded, GroupReport, TaskFailure};
