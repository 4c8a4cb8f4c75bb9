//! HTTP status sampling.
//!
//! Domains that are served from this server (Direct or Healthy) get one GET to
//! their front page. The label is the status code, except for pages that link
//! the web server's `autoindex.css`: those are exposed directory listings and
//! are labelled `"index of"` whatever their status.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use scraper::Html;

use crate::config::{
    AUTOINDEX_STYLESHEET, INDEX_OF_LABEL, MAX_RESPONSE_BODY_SIZE, STATUS_LOG_TARGET,
};
use crate::error_handling::{update_error_stats, ErrorType, ProcessingStats};
use crate::models::DomainOutcome;
use crate::utils::{parse_selector_with_fallback, run_bounded};

/// Fetches a domain's front page and labels the result.
#[async_trait]
pub trait StatusSampler: Send + Sync {
    /// `None` when no HTTP response was received.
    async fn sample(&self, domain: &str) -> Option<String>;
}

/// True if any `<link href>` in `body` points at the autoindex stylesheet.
pub fn has_autoindex_stylesheet(body: &str) -> bool {
    let document = Html::parse_document(body);
    let selector = parse_selector_with_fallback("link[href]", "autoindex detection");
    document.select(&selector).any(|link| {
        link.value()
            .attr("href")
            .is_some_and(|href| href.contains(AUTOINDEX_STYLESHEET))
    })
}

/// Label for a response with `status` and `body`.
pub fn status_label(status: u16, body: &str) -> String {
    if has_autoindex_stylesheet(body) {
        INDEX_OF_LABEL.to_string()
    } else {
        status.to_string()
    }
}

/// `StatusSampler` over plain HTTP.
pub struct HttpStatusSampler {
    client: Arc<reqwest::Client>,
    error_stats: Arc<ProcessingStats>,
}

impl HttpStatusSampler {
    /// `client` should follow redirects and skip certificate validation.
    pub fn new(client: Arc<reqwest::Client>, error_stats: Arc<ProcessingStats>) -> Self {
        Self {
            client,
            error_stats,
        }
    }
}

#[async_trait]
impl StatusSampler for HttpStatusSampler {
    async fn sample(&self, domain: &str) -> Option<String> {
        let url = format!("http://{domain}");
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                let kind = update_error_stats(&self.error_stats, &e);
                log::error!("Error checking status for {domain}: {} ({e})", kind.as_str());
                return None;
            }
        };

        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(bytes) => {
                let end = bytes.len().min(MAX_RESPONSE_BODY_SIZE);
                String::from_utf8_lossy(&bytes[..end]).into_owned()
            }
            Err(e) => {
                // The status line arrived; only the listing check is lost
                update_error_stats(&self.error_stats, &e);
                log::warn!("Failed to read body for {domain}: {e}");
                String::new()
            }
        };
        Some(status_label(status, &body))
    }
}

/// Samples every serving outcome with at most `concurrency` requests in flight.
///
/// Returns domain -> label for the domains that answered.
pub async fn sample_statuses(
    outcomes: &[DomainOutcome],
    sampler: Arc<dyn StatusSampler>,
    concurrency: usize,
    error_stats: &ProcessingStats,
) -> HashMap<String, String> {
    let items: Vec<_> = outcomes
        .iter()
        .filter(|o| o.classification.is_serving())
        .map(|o| (o.domain.clone(), o.domain.clone()))
        .collect();
    log::info!("Checking HTTP status of {} domains", items.len());

    let report = run_bounded("Checking domain statuses", items, concurrency, |domain| {
        let sampler = Arc::clone(&sampler);
        async move { sampler.sample(&domain).await }
    })
    .await;

    for failure in &report.failures {
        error_stats.increment_error(ErrorType::TaskPanicked);
        log::error!("Error checking status for {}: {}", failure.key, failure.message);
    }

    report
        .completed
        .into_iter()
        .filter_map(|(domain, status)| {
            let status = status?;
            log::info!(target: STATUS_LOG_TARGET, "Status for {domain}: {status}");
            Some((domain, status))
        })
        .collect()
}

/// Attaches sampled labels to their outcomes by domain name.
///
/// Classifications are never changed, and only serving outcomes are annotated.
pub fn apply_http_statuses(outcomes: &mut [DomainOutcome], statuses: &HashMap<String, String>) {
    for outcome in outcomes.iter_mut() {
        if outcome.classification.is_serving() {
            outcome.http_status = statuses.get(&outcome.domain).cloned();
        }
    }
}
