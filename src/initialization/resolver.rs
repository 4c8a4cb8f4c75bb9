//! DNS resolver initialization.

use std::sync::Arc;

use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Initializes the DNS resolver for hostname lookups.
///
/// Uses the system configuration (`/etc/resolv.conf`, `/etc/hosts`) so results
/// match what the platform resolver reports for the same names. Falls back to
/// the default upstream configuration when the system config is unreadable.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    match TokioAsyncResolver::tokio_from_system_conf() {
        Ok(resolver) => Arc::new(resolver),
        Err(e) => {
            log::warn!("Failed to read system DNS configuration ({e}); using default resolvers");
            Arc::new(TokioAsyncResolver::tokio(
                ResolverConfig::default(),
                ResolverOpts::default(),
            ))
        }
    }
}
