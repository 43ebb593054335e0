//! Batch report.

use super::{BatchSummary, DocumentOutcome};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything a finished batch produced, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Directory the styled documents were written to
    pub output_dir: PathBuf,

    /// When the batch started
    pub started_at: DateTime<Utc>,

    /// When the batch finished
    pub finished_at: DateTime<Utc>,

    /// Per-document outcomes, in input order
    pub outcomes: Vec<DocumentOutcome>,

    /// Outcome counts
    pub summary: BatchSummary,
}

impl BatchReport {
    /// Outcomes of the documents that failed.
    pub fn failures(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    /// Check if any document failed.
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }

    /// Wall-clock duration of the batch.
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
    }

    /// Write the report to a file as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleStats;

    #[test]
    fn test_report_json() {
        let now = Utc::now();
        let outcomes = vec![
            DocumentOutcome::styled("a.md", "out/a_styled.md", StyleStats::default()),
            DocumentOutcome::failed("b.md", &Error::Corrupted("bad".into())),
        ];
        let report = BatchReport {
            output_dir: PathBuf::from("out"),
            started_at: now,
            finished_at: now,
            summary: BatchSummary::from_outcomes(&outcomes),
            outcomes,
        };

        assert!(report.has_failures());
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.elapsed(), chrono::Duration::zero());

        let json = report.to_json().unwrap();
        let parsed: BatchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
