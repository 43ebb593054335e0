//! Batch notifications and per-document outcomes.

use crate::error::{Error, ErrorKind};
use crate::style::StyleStats;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Notification emitted while a batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// The batch began with `total` documents.
    Started {
        /// Number of documents in the batch
        total: usize,
    },

    /// A document finished, successfully or not.
    DocumentFinished {
        /// Position of the document in the input list
        index: usize,
        /// What happened to it
        outcome: DocumentOutcome,
    },

    /// Percentage of documents processed so far, non-decreasing.
    Progress(u8),

    /// The batch is over. Emitted exactly once.
    Completed(BatchSummary),
}

/// Result of processing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutcome {
    /// Input document path
    pub source: PathBuf,

    /// What happened
    #[serde(flatten)]
    pub status: DocumentStatus,

    /// Processing time in milliseconds
    pub duration_ms: u64,
}

impl DocumentOutcome {
    /// Create a successful outcome.
    pub fn styled(source: impl Into<PathBuf>, output: impl Into<PathBuf>, stats: StyleStats) -> Self {
        Self {
            source: source.into(),
            status: DocumentStatus::Styled {
                output: output.into(),
                stats,
            },
            duration_ms: 0,
        }
    }

    /// Create a failed outcome from an error.
    pub fn failed(source: impl Into<PathBuf>, error: &Error) -> Self {
        Self {
            source: source.into(),
            status: DocumentStatus::Failed {
                kind: error.kind(),
                message: error.to_string(),
            },
            duration_ms: 0,
        }
    }

    /// Create an outcome for a document skipped by cancellation.
    pub fn cancelled(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            status: DocumentStatus::Cancelled,
            duration_ms: 0,
        }
    }

    /// Set the processing time.
    pub fn with_duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = ms;
        self
    }

    /// Check if the document was styled and written.
    pub fn is_success(&self) -> bool {
        matches!(self.status, DocumentStatus::Styled { .. })
    }

    /// Check if processing failed.
    pub fn is_failure(&self) -> bool {
        matches!(self.status, DocumentStatus::Failed { .. })
    }

    /// Output path, for successful outcomes.
    pub fn output(&self) -> Option<&PathBuf> {
        match &self.status {
            DocumentStatus::Styled { output, .. } => Some(output),
            _ => None,
        }
    }
}

/// Status part of a [`DocumentOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Styled and written to `output`
    Styled {
        /// Written document path
        output: PathBuf,
        /// What the styling pass changed
        stats: StyleStats,
    },

    /// Processing failed; the batch went on
    Failed {
        /// Error category
        kind: ErrorKind,
        /// Error message
        message: String,
    },

    /// Not processed because the batch was cancelled
    Cancelled,
}

/// Outcome counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Documents in the batch
    pub total: usize,
    /// Documents styled and written
    pub succeeded: usize,
    /// Documents that failed
    pub failed: usize,
    /// Documents skipped by cancellation
    pub cancelled: usize,
}

impl BatchSummary {
    /// Count outcomes.
    pub fn from_outcomes(outcomes: &[DocumentOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome.status {
                DocumentStatus::Styled { .. } => summary.succeeded += 1,
                DocumentStatus::Failed { .. } => summary.failed += 1,
                DocumentStatus::Cancelled => summary.cancelled += 1,
            }
        }
        summary
    }

    /// Check if every document succeeded.
    pub fn is_clean(&self) -> bool {
        self.succeeded == self.total
    }
}
