//! Verification pipeline.
//!
//! Classifies every discovered domain exactly once:
//!
//! ```text
//! resolve IP
//!   unresolved           -> Unresolvable
//!   resolved == serverIP -> Direct
//!   resolved != serverIP -> probe document root over HTTP
//!        reachable       -> Healthy
//!        unreachable     -> Mismatched
//! ```
//!
//! Domains are independent; each runs in its own task and a failure in one
//! never affects another.

use std::collections::HashSet;
use std::sync::Arc;

use crate::dns::IpResolver;
use crate::error_handling::{ErrorType, ProcessingStats};
use crate::models::{Classification, DomainOutcome, DomainRecord, ServerIdentity};
use crate::probe::Prober;
use crate::utils::run_bounded;

/// Shared collaborators for the verification phase.
#[derive(Clone)]
pub struct VerifyContext {
    pub server: ServerIdentity,
    pub resolver: Arc<dyn IpResolver>,
    pub prober: Arc<dyn Prober>,
    pub error_stats: Arc<ProcessingStats>,
}

/// Runs the state machine for one domain.
pub async fn classify_domain(
    record: &DomainRecord,
    server: ServerIdentity,
    resolver: &dyn IpResolver,
    prober: &dyn Prober,
) -> DomainOutcome {
    let Some(ip) = resolver.resolve(&record.name).await else {
        log::info!("Domain {} cannot be pinged.", record.name);
        return DomainOutcome::unresolvable(&record.name);
    };

    if server.is_local(ip) {
        log::info!("Domain {} is directly on the server.", record.name);
        return DomainOutcome::resolved(&record.name, Classification::Direct, ip);
    }

    log::info!("IP mismatch for {} ({ip}).", record.name);
    let classification = if prober
        .probe(&record.name, record.document_root.as_deref())
        .await
    {
        Classification::Healthy
    } else {
        Classification::Mismatched
    };
    DomainOutcome::resolved(&record.name, classification, ip)
}

/// Drops repeated domain names, keeping the first record for each.
///
/// Also guarantees at most one probe per document root per domain.
pub fn dedup_records(records: Vec<DomainRecord>) -> Vec<DomainRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| {
            let fresh = seen.insert(r.name.clone());
            if !fresh {
                log::debug!("Skipping duplicate domain {}", r.name);
            }
            fresh
        })
        .collect()
}

/// Classifies every record with at most `workers` domains in flight.
///
/// Returns one outcome per distinct domain name, sorted by name. A domain whose
/// task panicked is reported as `Unresolvable`.
pub async fn verify_domains(
    records: Vec<DomainRecord>,
    ctx: &VerifyContext,
    workers: usize,
) -> Vec<DomainOutcome> {
    let items: Vec<_> = dedup_records(records)
        .into_iter()
        .map(|r| (r.name.clone(), r))
        .collect();
    log::info!("Checking {} domains with {workers} workers", items.len());

    let report = run_bounded("Checking domains", items, workers, |record| {
        let server = ctx.server;
        let resolver = Arc::clone(&ctx.resolver);
        let prober = Arc::clone(&ctx.prober);
        async move { classify_domain(&record, server, resolver.as_ref(), prober.as_ref()).await }
    })
    .await;

    let mut outcomes: Vec<DomainOutcome> =
        report.completed.into_iter().map(|(_, outcome)| outcome).collect();
    for failure in report.failures {
        log::error!("Error checking domain {}: {}", failure.key, failure.message);
        ctx.error_stats.increment_error(ErrorType::TaskPanicked);
        outcomes.push(DomainOutcome::unresolvable(failure.key));
    }
    outcomes.sort_by(|a, b| a.domain.cmp(&b.domain));
    outcomes
}
