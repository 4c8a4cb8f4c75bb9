//! Core data model shared by every phase of an audit run.

use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;

use serde::Serialize;
use strum_macros::EnumIter;

/// A hosted domain as reported by the control panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    /// Lower-cased domain name
    pub name: String,
    /// Web root on this server, if the panel knows one
    pub document_root: Option<PathBuf>,
}

impl DomainRecord {
    pub fn new(name: impl AsRef<str>, document_root: Option<PathBuf>) -> Self {
        Self {
            name: name.as_ref().trim().to_ascii_lowercase(),
            document_root,
        }
    }
}

/// The auditing server's own address, resolved once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerIdentity {
    pub server_ip: IpAddr,
}

impl ServerIdentity {
    pub fn new(server_ip: IpAddr) -> Self {
        Self { server_ip }
    }

    /// True when `ip` is this server.
    pub fn is_local(&self, ip: IpAddr) -> bool {
        self.server_ip == ip
    }
}

/// Where a domain's traffic ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Serialize)]
pub enum Classification {
    /// Resolves to this server
    Direct,
    /// Resolves elsewhere, but still serves this server's document root
    Healthy,
    /// Resolves elsewhere and the probe could not reach this server's content
    Mismatched,
    /// Does not resolve
    #[serde(rename = "No Ping")]
    Unresolvable,
}

impl Classification {
    /// Operator-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Direct => "Direct",
            Classification::Healthy => "Healthy",
            Classification::Mismatched => "Mismatched",
            Classification::Unresolvable => "No Ping",
        }
    }

    /// CSS class used to color report rows.
    pub fn css_class(&self) -> &'static str {
        match self {
            Classification::Direct => "direct",
            Classification::Healthy => "healthy",
            Classification::Mismatched => "mismatched",
            Classification::Unresolvable => "no-ping",
        }
    }

    /// Whether outcomes of this class are HTTP-sampled and land in the combined list.
    pub fn is_serving(&self) -> bool {
        matches!(self, Classification::Direct | Classification::Healthy)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of auditing one domain.
///
/// `resolved_ip` is present exactly when the domain is not `Unresolvable`;
/// `http_status` is only ever set on serving outcomes by the status sampler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainOutcome {
    pub domain: String,
    pub classification: Classification,
    pub resolved_ip: Option<IpAddr>,
    pub http_status: Option<String>,
}

impl DomainOutcome {
    pub fn unresolvable(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            classification: Classification::Unresolvable,
            resolved_ip: None,
            http_status: None,
        }
    }

    pub fn resolved(domain: impl Into<String>, classification: Classification, ip: IpAddr) -> Self {
        debug_assert_ne!(classification, Classification::Unresolvable);
        Self {
            domain: domain.into(),
            classification,
            resolved_ip: Some(ip),
            http_status: None,
        }
    }
}
