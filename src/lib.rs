//! domain_audit library: hosted-domain DNS reconciliation and reachability audit
//!
//! This library discovers the domains a web hosting control panel (cPanel or
//! DirectAdmin) serves from this machine, checks where each one resolves, probes
//! the ones that moved away, samples the HTTP status of the ones still served and
//! writes domain lists plus HTML and JSON reports.
//!
//! # Example
//!
//! ```no_run
//! use domain_audit::{run_audit, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     output_dir: std::path::PathBuf::from("/tmp/audit"),
//!     ..Default::default()
//! };
//!
//! let report = run_audit(config).await?;
//! println!("Audited {} domains: {} mismatched",
//!          report.total_domains, report.mismatched);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
mod dns;
mod error_handling;
pub mod initialization;
mod models;
mod panel;
mod pipeline;
mod probe;
mod report;
mod sampler;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, PanelChoice};
pub use error_handling::{DiscoveryError, InitializationError, OutputError};
pub use models::{Classification, DomainOutcome, DomainRecord, ServerIdentity};
pub use run::{run_audit, AuditReport};

// Internal run module (contains the audit flow)
mod run {
    use std::path::PathBuf;
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use chrono::Utc;
    use log::{error, info};

    use crate::app::{print_error_statistics, print_summary};
    use crate::config::Config;
    use crate::dns::{detect_server_identity, SystemResolver};
    use crate::error_handling::{DiscoveryError, ErrorType, OutputError, ProcessingStats};
    use crate::initialization::{init_client, init_resolver};
    use crate::models::DomainOutcome;
    use crate::panel::{DomainSource, Panel};
    use crate::pipeline::{verify_domains, VerifyContext};
    use crate::probe::HttpProber;
    use crate::report::{write_reports, CategorySets};
    use crate::sampler::{apply_http_statuses, sample_statuses, HttpStatusSampler};

    /// Results of an audit run.
    #[derive(Debug)]
    pub struct AuditReport {
        /// Run identifier (format: `run_<timestamp_millis>`)
        pub run_id: String,
        /// Control panel the domains were read from
        pub panel: &'static str,
        /// Number of distinct domains audited
        pub total_domains: usize,
        pub direct: usize,
        pub healthy: usize,
        pub mismatched: usize,
        pub unresolvable: usize,
        /// Directory holding the reports
        pub output_dir: PathBuf,
        /// Artifacts that were written
        pub written: Vec<PathBuf>,
        /// Artifacts that could not be written
        pub output_failures: Vec<OutputError>,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// Every outcome, sorted by domain
        pub outcomes: Vec<DomainOutcome>,
    }

    /// Runs a full audit with the provided configuration.
    ///
    /// Discovery, verification, status sampling and reporting run in that order;
    /// each phase finishes before the next starts.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - No control panel is found, or it cannot list its domains
    /// - The panel reports no domains at all
    /// - The server's own IP cannot be determined
    /// - The HTTP client cannot be built
    ///
    /// Per-domain failures and report write failures never fail the run; they
    /// are logged, counted and reflected in the returned `AuditReport`.
    pub async fn run_audit(config: Config) -> Result<AuditReport> {
        let start_time = std::time::Instant::now();
        let run_id = format!("run_{}", Utc::now().timestamp_millis());
        info!("Starting run: {run_id}");

        let panel = Panel::from_config(&config);
        info!("Detected control panel: {}", panel.name());
        let records = panel
            .discover()
            .await
            .context("Failed to discover hosted domains")?;
        if records.is_empty() {
            return Err(DiscoveryError::NoDomains).context("Failed to discover hosted domains");
        }
        info!("Found {} domains", records.len());

        let error_stats = Arc::new(ProcessingStats::new());
        let resolver = init_resolver();
        let server = detect_server_identity(config.server_ip, &resolver)
            .await
            .context("Failed to determine server IP")?;
        let client = init_client(&config).context("Failed to initialize HTTP client")?;

        let ctx = VerifyContext {
            server,
            resolver: Arc::new(SystemResolver::new(
                Arc::clone(&resolver),
                Arc::clone(&error_stats),
            )),
            prober: Arc::new(HttpProber::new(
                Arc::clone(&client),
                config.marker_name.clone(),
                config.strict_probe,
                Arc::clone(&error_stats),
            )),
            error_stats: Arc::clone(&error_stats),
        };
        let mut outcomes = verify_domains(records, &ctx, config.worker_limit()).await;

        let sampler = Arc::new(HttpStatusSampler::new(
            Arc::clone(&client),
            Arc::clone(&error_stats),
        ));
        let statuses = sample_statuses(
            &outcomes,
            sampler,
            config.sample_concurrency,
            &error_stats,
        )
        .await;
        apply_http_statuses(&mut outcomes, &statuses);

        let output = write_reports(&config.output_dir, &outcomes);
        for failure in &output.failures {
            error!("Report output failed: {failure}");
            error_stats.increment_error(ErrorType::OutputWriteError);
        }

        let sets = CategorySets::from_outcomes(&outcomes);
        print_summary(&sets);
        print_error_statistics(&error_stats);

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        info!("Run {run_id} finished in {elapsed_seconds:.2} seconds");

        Ok(AuditReport {
            run_id,
            panel: panel.name(),
            total_domains: sets.total(),
            direct: sets.direct.len(),
            healthy: sets.healthy.len(),
            mismatched: sets.mismatched.len(),
            unresolvable: sets.unresolvable.len(),
            output_dir: config.output_dir,
            written: output.written,
            output_failures: output.failures,
            elapsed_seconds,
            outcomes,
        })
    }
}
