//! Marker file lifecycle.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::io::AsyncWriteExt;

use crate::error_handling::ProbeError;

/// Body of the marker file.
///
/// Includes the timestamp and process id so an operator who finds a leftover
/// marker can tell which run wrote it.
pub fn marker_content(domain: &str, at: DateTime<Utc>) -> String {
    format!(
        "IP mismatch for {domain}\nchecked at {} by pid {}\n",
        at.to_rfc3339(),
        std::process::id()
    )
}

/// A marker file that is deleted when dropped.
///
/// `remove` deletes it explicitly and reports errors; if the probe bails out
/// early (error, panic, cancelled task) `Drop` deletes it instead.
#[derive(Debug)]
pub struct MarkerFile {
    path: Option<PathBuf>,
}

impl MarkerFile {
    /// Writes `content` to a new file `{root}/{name}`.
    ///
    /// An existing file of that name belongs to the site and is left untouched:
    /// creation fails with `WriteFailed` instead.
    pub async fn create(root: &Path, name: &str, content: &str) -> Result<Self, ProbeError> {
        let path = root.join(name);
        let write_failed = |source| ProbeError::WriteFailed {
            path: path.clone(),
            source,
        };
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(write_failed)?;

        // Only armed once the file is ours
        let guard = Self {
            path: Some(path.clone()),
        };
        file.write_all(content.as_bytes())
            .await
            .map_err(write_failed)?;
        file.flush().await.map_err(write_failed)?;
        Ok(guard)
    }

    #[cfg(test)]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Deletes the marker now.
    pub async fn remove(mut self) -> std::io::Result<()> {
        match self.path.take() {
            Some(path) => match tokio::fs::remove_file(&path).await {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                other => other,
            },
            None => Ok(()),
        }
    }
}

impl Drop for MarkerFile {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::error!("Failed to remove {}: {e}", path.display());
                }
            }
        }
    }
}
