//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_audit` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization, including the info, error and status log files
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use domain_audit::initialization::{init_logger_with, LogSinks};
use domain_audit::{run_audit, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Flags can also come from a .env file next to the working directory
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let sinks = match LogSinks::open(
        &config.info_log_path(),
        &config.error_log_path(),
        &config.status_log_path(),
    ) {
        Ok(sinks) => Some(sinks),
        Err(e) => {
            eprintln!("domain_audit warning: {e}; logging to the console only");
            None
        }
    };
    init_logger_with(
        config.log_level.clone().into(),
        config.log_format.clone(),
        sinks,
    )
    .context("Failed to initialize logger")?;

    match run_audit(config).await {
        Ok(report) => {
            println!(
                "✅ Audited {} domain{} on {} in {:.1}s: {} direct, {} healthy, {} mismatched, {} no ping",
                report.total_domains,
                if report.total_domains == 1 { "" } else { "s" },
                report.panel,
                report.elapsed_seconds,
                report.direct,
                report.healthy,
                report.mismatched,
                report.unresolvable,
            );
            println!("Results saved in {}", report.output_dir.display());
            for path in &report.written {
                println!("  {}", path.display());
            }
            if !report.output_failures.is_empty() {
                eprintln!(
                    "⚠️ {} report file(s) could not be written, see the error log",
                    report.output_failures.len()
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("domain_audit error: {:#}", e);
            process::exit(1);
        }
    }
}
