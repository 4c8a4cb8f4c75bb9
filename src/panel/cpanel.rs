//! cPanel discovery.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use super::DomainSource;
use crate::error_handling::DiscoveryError;
use crate::models::DomainRecord;

/// Index of the document root among the `==`-separated fields of a userdata line.
const DOCROOT_FIELD: usize = 4;

#[derive(Debug, Deserialize)]
struct DomainInfoResponse {
    data: DomainInfoData,
}

#[derive(Debug, Deserialize)]
struct DomainInfoData {
    #[serde(default)]
    domains: Vec<DomainInfoEntry>,
}

#[derive(Debug, Deserialize)]
struct DomainInfoEntry {
    domain: Option<String>,
}

/// Extracts `data.domains[].domain` from `whmapi1 get_domain_info` output.
///
/// Entries without a `domain` field are skipped.
pub fn parse_domain_info(payload: &str) -> Result<Vec<String>, DiscoveryError> {
    let response: DomainInfoResponse = serde_json::from_str(payload)?;
    Ok(response
        .data
        .domains
        .into_iter()
        .filter_map(|entry| entry.domain)
        .filter(|d| !d.trim().is_empty())
        .collect())
}

/// Parses `/etc/userdatadomains` into a domain -> document root map.
///
/// Lines look like `example.com: user==owner==main==example.com==/home/user/public_html==...`.
/// The key is the text before the first `:`; the document root is the fifth
/// `==` field. Malformed lines are skipped and the first line for a domain wins.
pub fn parse_userdata_domains(contents: &str) -> HashMap<String, PathBuf> {
    let mut roots = HashMap::new();
    for line in contents.lines() {
        let Some((key, _)) = line.split_once(':') else {
            continue;
        };
        let Some(root) = line.split("==").nth(DOCROOT_FIELD).map(str::trim) else {
            continue;
        };
        if root.is_empty() {
            continue;
        }
        roots
            .entry(key.trim().to_ascii_lowercase())
            .or_insert_with(|| PathBuf::from(root));
    }
    roots
}

/// Domain list from the WHM API, document roots from the userdata file.
#[derive(Debug, Clone)]
pub struct CpanelSource {
    whmapi_bin: String,
    userdata_path: PathBuf,
}

impl CpanelSource {
    pub fn new(whmapi_bin: impl Into<String>, userdata_path: impl Into<PathBuf>) -> Self {
        Self {
            whmapi_bin: whmapi_bin.into(),
            userdata_path: userdata_path.into(),
        }
    }

    async fn list_domains(&self) -> Result<Vec<String>, DiscoveryError> {
        let command = format!("{} --output=jsonpretty get_domain_info", self.whmapi_bin);
        let output = Command::new(&self.whmapi_bin)
            .args(["--output=jsonpretty", "get_domain_info"])
            .output()
            .await
            .map_err(|e| DiscoveryError::CommandFailed {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(DiscoveryError::CommandFailed {
                command,
                message: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        parse_domain_info(&String::from_utf8_lossy(&output.stdout))
    }

    async fn document_roots(&self) -> HashMap<String, PathBuf> {
        match tokio::fs::read_to_string(&self.userdata_path).await {
            Ok(contents) => parse_userdata_domains(&contents),
            Err(e) => {
                // Domains are still audited; mismatched ones just cannot be probed
                log::error!("{} could not be read: {e}", self.userdata_path.display());
                HashMap::new()
            }
        }
    }
}

#[async_trait]
impl DomainSource for CpanelSource {
    async fn discover(&self) -> Result<Vec<DomainRecord>, DiscoveryError> {
        let domains = self.list_domains().await?;
        let roots = self.document_roots().await;

        let mut records: Vec<DomainRecord> = domains
            .iter()
            .map(|domain| {
                let key = domain.trim().to_ascii_lowercase();
                let root = roots.get(&key).cloned();
                if root.is_none() {
                    log::debug!("No document root for {key} in userdata domains");
                }
                DomainRecord::new(&key, root)
            })
            .collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }
}
