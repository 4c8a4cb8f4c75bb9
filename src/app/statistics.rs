//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProcessingStats};
use crate::report::CategorySets;

/// Prints per-category failure counts to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    if total_errors == 0 {
        return;
    }
    info!("Error Counts ({} total):", total_errors);
    for error_type in ErrorType::iter() {
        let count = error_stats.get_error_count(error_type);
        if count > 0 {
            info!("   {}: {}", error_type.as_str(), count);
        }
    }
}

/// Prints the per-classification summary shown at the end of every run.
pub fn print_summary(sets: &CategorySets) {
    info!("📊 Results Summary:");
    info!("✅ Direct domains: {}", sets.direct.len());
    info!("🟢 Healthy domains: {}", sets.healthy.len());
    info!("🔴 Mismatched domains: {}", sets.mismatched.len());
    info!("🟡 No ping domains: {}", sets.unresolvable.len());
}
