//! IP address resolution.

use std::net::IpAddr;
use std::sync::Arc;

use anyhow::{Error, Result};
use async_trait::async_trait;
use trust_dns_resolver::TokioAsyncResolver;

use crate::error_handling::{ErrorType, InitializationError, ProcessingStats};
use crate::models::ServerIdentity;

/// Resolves a domain name to the address its web traffic goes to.
///
/// `None` means the name does not resolve. That is an audit outcome, not an
/// error, so implementations log and swallow lookup failures.
#[async_trait]
pub trait IpResolver: Send + Sync {
    async fn resolve(&self, domain: &str) -> Option<IpAddr>;
}

/// Picks the address `gethostbyname` would report: the first IPv4 answer,
/// falling back to the first answer of any family.
pub fn prefer_ipv4<I>(addrs: I) -> Option<IpAddr>
where
    I: IntoIterator<Item = IpAddr>,
{
    let mut first = None;
    for addr in addrs {
        if addr.is_ipv4() {
            return Some(addr);
        }
        first.get_or_insert(addr);
    }
    first
}

/// Resolves a hostname to an IP address using DNS.
///
/// # Errors
///
/// Returns an error if DNS resolution fails or no IP addresses are found.
pub async fn resolve_host_to_ip(host: &str, resolver: &TokioAsyncResolver) -> Result<IpAddr, Error> {
    let response = resolver.lookup_ip(host).await.map_err(Error::new)?;
    prefer_ipv4(response.iter()).ok_or_else(|| Error::msg("No IP addresses found"))
}

/// `IpResolver` backed by the shared `TokioAsyncResolver`.
pub struct SystemResolver {
    resolver: Arc<TokioAsyncResolver>,
    error_stats: Arc<ProcessingStats>,
}

impl SystemResolver {
    pub fn new(resolver: Arc<TokioAsyncResolver>, error_stats: Arc<ProcessingStats>) -> Self {
        Self {
            resolver,
            error_stats,
        }
    }
}

#[async_trait]
impl IpResolver for SystemResolver {
    async fn resolve(&self, domain: &str) -> Option<IpAddr> {
        match resolve_host_to_ip(domain, &self.resolver).await {
            Ok(ip) => {
                log::info!("Domain: {domain}, Domain IP: {ip}");
                Some(ip)
            }
            Err(e) => {
                log::error!("Error resolving domain {domain}: {e}");
                self.error_stats
                    .increment_error(ErrorType::DnsResolutionError);
                None
            }
        }
    }
}

/// Determines the server's own address.
///
/// An explicit override wins; otherwise the local hostname is resolved the same
/// way hosted domains are.
///
/// # Errors
///
/// Returns `InitializationError::ServerIdentityError` if the hostname cannot be
/// read or does not resolve.
pub async fn detect_server_identity(
    override_ip: Option<IpAddr>,
    resolver: &TokioAsyncResolver,
) -> Result<ServerIdentity, InitializationError> {
    if let Some(ip) = override_ip {
        log::info!("Using configured server IP {ip}");
        return Ok(ServerIdentity::new(ip));
    }

    let host = hostname::get()
        .map_err(|e| InitializationError::ServerIdentityError(format!("hostname: {e}")))?
        .to_string_lossy()
        .into_owned();

    let ip = resolve_host_to_ip(&host, resolver).await.map_err(|e| {
        InitializationError::ServerIdentityError(format!("failed to resolve {host}: {e}"))
    })?;
    log::info!("Server hostname {host} resolves to {ip}");
    Ok(ServerIdentity::new(ip))
}
