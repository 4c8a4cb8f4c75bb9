//! Mismatch probe.
//!
//! A domain whose DNS points elsewhere may still be served from this server
//! (proxies, CDNs, load balancers in front of it). To find out, a marker file is
//! written into the domain's document root here and fetched over HTTP through
//! the domain's public name. Any answer means the content is still reachable.
//!
//! The marker is removed on every exit path. A file already using the marker's
//! name belongs to the site and is never overwritten or deleted. Two probes must never run against
//! the same document root at once; the pipeline guarantees one probe per domain.

mod marker;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error_handling::{ErrorType, ProbeError, ProcessingStats};

pub use marker::{marker_content, MarkerFile};

/// Confirms whether a mismatched domain still serves this server's content.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, domain: &str, document_root: Option<&Path>) -> bool;
}

/// Probe that writes a marker into the document root and fetches it over HTTP.
pub struct HttpProber {
    client: Arc<reqwest::Client>,
    marker_name: String,
    strict: bool,
    error_stats: Arc<ProcessingStats>,
}

impl HttpProber {
    pub fn new(
        client: Arc<reqwest::Client>,
        marker_name: impl Into<String>,
        strict: bool,
        error_stats: Arc<ProcessingStats>,
    ) -> Self {
        Self {
            client,
            marker_name: marker_name.into(),
            strict,
            error_stats,
        }
    }

    /// Runs the round trip, returning why it failed if it did.
    pub async fn try_probe(
        &self,
        domain: &str,
        document_root: Option<&Path>,
    ) -> Result<(), ProbeError> {
        let missing = || ProbeError::MissingRoot {
            domain: domain.to_string(),
        };
        let root = document_root.ok_or_else(missing)?;
        let is_dir = tokio::fs::metadata(root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(missing());
        }

        let content = marker_content(domain, chrono::Utc::now());
        let marker = MarkerFile::create(root, &self.marker_name, &content).await?;
        log::info!(
            "File {} created in {} for {domain}.",
            self.marker_name,
            root.display()
        );

        let url = format!("http://{domain}/{}", self.marker_name);
        let outcome = self.fetch(domain, &url, &content).await;

        if let Err(e) = marker.remove().await {
            log::error!(
                "Failed to remove {}: {e}",
                root.join(&self.marker_name).display()
            );
            self.error_stats.increment_error(ErrorType::ProbeCleanupError);
        }
        outcome
    }

    async fn fetch(&self, domain: &str, url: &str, content: &str) -> Result<(), ProbeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ProbeError::FetchFailed {
                domain: domain.to_string(),
                source,
            })?;

        if !self.strict {
            return Ok(());
        }

        let status = response.status();
        let served = status.is_success()
            && response
                .text()
                .await
                .map(|body| body.contains(content.trim_end()))
                .unwrap_or(false);
        if served {
            Ok(())
        } else {
            Err(ProbeError::MarkerNotServed {
                domain: domain.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, domain: &str, document_root: Option<&Path>) -> bool {
        match self.try_probe(domain, document_root).await {
            Ok(()) => {
                log::info!("File {} successfully fetched for {domain}.", self.marker_name);
                true
            }
            Err(e) => {
                log::error!("{e}");
                self.error_stats.increment_error(e.error_type());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests;
