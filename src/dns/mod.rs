//! DNS resolution.
//!
//! This module resolves hosted domains and the server's own hostname to IP
//! addresses using `trust-dns-resolver`, honouring the system resolver
//! configuration and `/etc/hosts`.

mod resolution;

// Re-export public API
pub use resolution::{detect_server_identity, prefer_ipv4, resolve_host_to_ip, IpResolver, SystemResolver};
