//! Report output.
//!
//! Writes the run's artifacts into the output directory:
//! five newline-delimited domain lists, an HTML table and a JSON dump of the
//! outcomes. Each artifact is written on its own so one failure never hides
//! the others.

mod html;

use std::path::{Path, PathBuf};

use crate::config::{
    COMBINED_FILE, DIRECT_FILE, HEALTHY_FILE, MISMATCHED_FILE, NO_PING_FILE, REPORT_HTML_FILE,
    REPORT_JSON_FILE,
};
use crate::error_handling::OutputError;
use crate::models::{Classification, DomainOutcome};

pub use html::render_html;

/// Domain names grouped by classification, each list sorted and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySets {
    pub direct: Vec<String>,
    pub healthy: Vec<String>,
    pub mismatched: Vec<String>,
    pub unresolvable: Vec<String>,
}

impl CategorySets {
    pub fn from_outcomes(outcomes: &[DomainOutcome]) -> Self {
        let mut sets = Self::default();
        for outcome in outcomes {
            let bucket = match outcome.classification {
                Classification::Direct => &mut sets.direct,
                Classification::Healthy => &mut sets.healthy,
                Classification::Mismatched => &mut sets.mismatched,
                Classification::Unresolvable => &mut sets.unresolvable,
            };
            bucket.push(outcome.domain.clone());
        }
        for bucket in [
            &mut sets.direct,
            &mut sets.healthy,
            &mut sets.mismatched,
            &mut sets.unresolvable,
        ] {
            bucket.sort();
            bucket.dedup();
        }
        sets
    }

    /// Direct and Healthy domains, i.e. everything this server still serves.
    pub fn combined(&self) -> Vec<String> {
        let mut combined: Vec<String> = self
            .direct
            .iter()
            .chain(self.healthy.iter())
            .cloned()
            .collect();
        combined.sort();
        combined.dedup();
        combined
    }

    /// Number of distinct domains across all four lists.
    pub fn total(&self) -> usize {
        self.direct.len() + self.healthy.len() + self.mismatched.len() + self.unresolvable.len()
    }
}

/// What `write_reports` managed to produce.
#[derive(Debug, Default)]
pub struct ReportOutput {
    pub written: Vec<PathBuf>,
    pub failures: Vec<OutputError>,
}

impl ReportOutput {
    fn record(&mut self, result: Result<PathBuf, OutputError>) {
        match result {
            Ok(path) => {
                log::info!("Saved {}", path.display());
                self.written.push(path);
            }
            Err(e) => {
                log::error!("{e}");
                self.failures.push(e);
            }
        }
    }
}

/// One domain per line, with a trailing newline when non-empty.
pub fn format_domain_list(domains: &[String]) -> String {
    let mut out = String::new();
    for domain in domains {
        out.push_str(domain);
        out.push('\n');
    }
    out
}

/// Writes `contents` to `dir/file_name`.
pub fn write_artifact(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf, OutputError> {
    let path = dir.join(file_name);
    std::fs::write(&path, contents).map_err(|source| OutputError::WriteFile {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn render_json(outcomes: &[DomainOutcome]) -> Result<String, OutputError> {
    let mut json = serde_json::to_string_pretty(outcomes)?;
    json.push('\n');
    Ok(json)
}

/// Writes every artifact for `outcomes` into `output_dir`.
///
/// `outcomes` are expected in report order (sorted by domain).
pub fn write_reports(output_dir: &Path, outcomes: &[DomainOutcome]) -> ReportOutput {
    let mut output = ReportOutput::default();

    if let Err(source) = std::fs::create_dir_all(output_dir) {
        let e = OutputError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        };
        // Keep going: individual writes report their own failures
        log::error!("{e}");
        output.failures.push(e);
    }

    let sets = CategorySets::from_outcomes(outcomes);
    let lists = [
        (MISMATCHED_FILE, &sets.mismatched),
        (HEALTHY_FILE, &sets.healthy),
        (DIRECT_FILE, &sets.direct),
        (NO_PING_FILE, &sets.unresolvable),
    ];
    for (file_name, domains) in lists {
        output.record(write_artifact(
            output_dir,
            file_name,
            &format_domain_list(domains),
        ));
    }
    output.record(write_artifact(
        output_dir,
        COMBINED_FILE,
        &format_domain_list(&sets.combined()),
    ));

    output.record(write_artifact(
        output_dir,
        REPORT_HTML_FILE,
        &render_html(outcomes),
    ));
    output.record(
        render_json(outcomes).and_then(|json| write_artifact(output_dir, REPORT_JSON_FILE, &json)),
    );

    output
}

#[cfg(test)]
mod tests;
