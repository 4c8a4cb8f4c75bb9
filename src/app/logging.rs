//! Progress logging utilities.

use log::info;

/// Logs how far a phase has got.
pub fn log_progress(phase: &str, start_time: std::time::Instant, done: usize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "{phase}: {done}/{total} domains in {elapsed_secs:.2} seconds (~{rate:.2} domains/sec)"
    );
}
