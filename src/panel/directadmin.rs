//! DirectAdmin discovery.

use std::path::PathBuf;

use async_trait::async_trait;

use super::DomainSource;
use crate::config::DIRECTADMIN_RESERVED;
use crate::error_handling::DiscoveryError;
use crate::models::DomainRecord;

/// Walks `{home}/{account}/domains/{domain}`.
#[derive(Debug, Clone)]
pub struct DirectAdminSource {
    home_dir: PathBuf,
}

impl DirectAdminSource {
    pub fn new(home_dir: impl Into<PathBuf>) -> Self {
        Self {
            home_dir: home_dir.into(),
        }
    }

    async fn account_domains(&self, account: PathBuf) -> Vec<DomainRecord> {
        let domains_dir = account.join("domains");
        if !tokio::fs::metadata(&domains_dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
        {
            return Vec::new();
        }

        let mut entries = match tokio::fs::read_dir(&domains_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("Failed to read {}: {e}", domains_dir.display());
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    log::error!("Failed to read {}: {e}", domains_dir.display());
                    break;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            if DIRECTADMIN_RESERVED.contains(&name.as_str()) || name.starts_with('.') {
                continue;
            }
            if !entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let root = domains_dir.join(&name).join("public_html");
            records.push(DomainRecord::new(&name, Some(root)));
        }
        records
    }
}

#[async_trait]
impl DomainSource for DirectAdminSource {
    async fn discover(&self) -> Result<Vec<DomainRecord>, DiscoveryError> {
        let unreadable = |source| DiscoveryError::Unreadable {
            path: self.home_dir.clone(),
            source,
        };
        let mut accounts = tokio::fs::read_dir(&self.home_dir)
            .await
            .map_err(unreadable)?;

        let mut records = Vec::new();
        while let Some(account) = accounts.next_entry().await.map_err(unreadable)? {
            records.extend(self.account_domains(account.path()).await);
        }
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }
}
