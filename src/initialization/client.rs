//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, MAX_REDIRECT_HOPS};
use crate::error_handling::InitializationError;

/// Initializes the HTTP client shared by the status sampler and the probe.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header and timeout from the configuration
/// - Redirect following (up to `MAX_REDIRECT_HOPS`)
/// - Certificate validation disabled: audited domains routinely serve
///   self-signed or mismatched certificates once they move elsewhere
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .danger_accept_invalid_certs(true)
        .build()?;
    Ok(Arc::new(client))
}
