//! Control-panel domain discovery.
//!
//! The hosting panel is the source of truth for which domains live on this
//! server and where their document roots are. Two panels are supported, each
//! behind the same `DomainSource` capability:
//! - cPanel: WHM API domain list + `/etc/userdatadomains` for document roots
//! - DirectAdmin: `{home}/{account}/domains/{domain}` directory layout
//!
//! The panel kind is resolved once at startup into the `Panel` enum.

mod cpanel;
mod directadmin;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::{Config, PanelChoice};
use crate::error_handling::DiscoveryError;
use crate::models::DomainRecord;

pub use cpanel::{parse_domain_info, parse_userdata_domains, CpanelSource};
pub use directadmin::DirectAdminSource;

/// Something that can enumerate the domains hosted on this server.
#[async_trait]
pub trait DomainSource: Send + Sync {
    /// Returns every hosted domain, sorted by name.
    ///
    /// A domain whose document root cannot be determined is still returned,
    /// with `document_root = None`.
    async fn discover(&self) -> Result<Vec<DomainRecord>, DiscoveryError>;
}

/// Install directories used to tell the panels apart.
#[derive(Debug, Clone)]
pub struct PanelPaths {
    pub cpanel_dir: PathBuf,
    pub directadmin_dir: PathBuf,
}

/// The control panel managing this host.
#[derive(Debug, Clone)]
pub enum Panel {
    Cpanel(CpanelSource),
    DirectAdmin(DirectAdminSource),
    Unknown,
}

impl Panel {
    /// Builds the panel named by the configuration, probing the install
    /// directories when set to `auto`.
    pub fn from_config(config: &Config) -> Self {
        let cpanel = || {
            Panel::Cpanel(CpanelSource::new(
                config.whmapi_bin.clone(),
                config.userdata_domains.clone(),
            ))
        };
        let directadmin = || Panel::DirectAdmin(DirectAdminSource::new(config.home_dir.clone()));

        match config.panel {
            PanelChoice::Cpanel => cpanel(),
            PanelChoice::Directadmin => directadmin(),
            PanelChoice::Auto => {
                let paths = PanelPaths {
                    cpanel_dir: config.cpanel_dir.clone(),
                    directadmin_dir: config.directadmin_dir.clone(),
                };
                match detect(&paths) {
                    PanelChoice::Cpanel => cpanel(),
                    PanelChoice::Directadmin => directadmin(),
                    PanelChoice::Auto => Panel::Unknown,
                }
            }
        }
    }

    /// Short name for log messages.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Cpanel(_) => "cpanel",
            Panel::DirectAdmin(_) => "directadmin",
            Panel::Unknown => "unknown",
        }
    }
}

/// cPanel wins when both panels appear to be installed. `Auto` means neither.
pub fn detect(paths: &PanelPaths) -> PanelChoice {
    if exists(&paths.cpanel_dir) {
        PanelChoice::Cpanel
    } else if exists(&paths.directadmin_dir) {
        PanelChoice::Directadmin
    } else {
        PanelChoice::Auto
    }
}

fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}

#[async_trait]
impl DomainSource for Panel {
    async fn discover(&self) -> Result<Vec<DomainRecord>, DiscoveryError> {
        match self {
            Panel::Cpanel(source) => source.discover().await,
            Panel::DirectAdmin(source) => source.discover().await,
            Panel::Unknown => Err(DiscoveryError::UnknownPanel),
        }
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
