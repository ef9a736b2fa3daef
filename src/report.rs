//! Conversion run diagnostics.
//!
//! Every data row ends up in the report exactly once, either accepted
//! under its citation key or skipped with a reason. Problems the run
//! smoothed over instead of skipping, such as overlong rows or records
//! with no contributor, surface as warnings. The report is plain data so
//! callers can render it however they like; [`ConversionReport::summary`]
//! gives the one-line version.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::bibtex::CitationKey;
use crate::error::SkipReason;

/// Per-row outcome of one conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowOutcome {
    /// 1-based line number of the row in the decoded source.
    pub line: usize,
    /// What became of the row.
    pub outcome: Outcome,
}

/// What became of a single row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// The row converted and its entry sits in the document under this key.
    Accepted { key: CitationKey },
    /// The row was dropped; the document contains nothing for it.
    Skipped { reason: SkipReason },
}

/// A recoverable oddity the run smoothed over.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionWarning {
    /// A row carried more cells than the header names; the excess was
    /// dropped.
    ExtraCells {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A record names no author and no editor; its entry carries the
    /// placeholder author instead of being skipped.
    NoContributors { line: usize, title: String },
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionWarning::ExtraCells {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line}: row has {found} cells where the header has {expected}, extra cells dropped"
            ),
            ConversionWarning::NoContributors { line, title } => {
                write!(f, "line {line}: {title} has no author or editor")
            }
        }
    }
}

/// Ordered record of everything one conversion run did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    outcomes: Vec<RowOutcome>,
    warnings: Vec<ConversionWarning>,
}

impl ConversionReport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_accepted(&mut self, line: usize, key: CitationKey) {
        self.outcomes.push(RowOutcome {
            line,
            outcome: Outcome::Accepted { key },
        });
    }

    pub(crate) fn record_skipped(&mut self, line: usize, reason: SkipReason) {
        self.outcomes.push(RowOutcome {
            line,
            outcome: Outcome::Skipped { reason },
        });
    }

    pub(crate) fn add_warning(&mut self, warning: ConversionWarning) {
        self.warnings.push(warning);
    }

    pub(crate) fn add_warnings(&mut self, warnings: impl IntoIterator<Item = ConversionWarning>) {
        self.warnings.extend(warnings);
    }

    /// Per-row outcomes in source order.
    pub fn outcomes(&self) -> &[RowOutcome] {
        &self.outcomes
    }

    /// Warnings recorded over the run, parser repairs first.
    pub fn warnings(&self) -> &[ConversionWarning] {
        &self.warnings
    }

    /// Number of rows that made it into the document.
    pub fn accepted_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|row| matches!(row.outcome, Outcome::Accepted { .. }))
            .count()
    }

    /// Number of rows that were dropped.
    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.accepted_count()
    }

    /// One-line human summary of the run.
    ///
    /// ```text
    /// 12 records converted, 2 skipped (line 5: record has no title), 1 warning (line 9: The Nameless has no author or editor)
    /// ```
    pub fn summary(&self) -> String {
        let converted = self.accepted_count();
        let noun = if converted == 1 { "record" } else { "records" };
        let mut summary = format!("{converted} {noun} converted");

        let skipped = self.skipped_count();
        if skipped > 0 {
            let reasons = self
                .outcomes
                .iter()
                .filter_map(|row| match &row.outcome {
                    Outcome::Skipped { reason } => Some(format!("line {}: {reason}", row.line)),
                    Outcome::Accepted { .. } => None,
                })
                .join("; ");
            summary.push_str(&format!(", {skipped} skipped ({reasons})"));
        }

        if !self.warnings.is_empty() {
            let noun = if self.warnings.len() == 1 {
                "warning"
            } else {
                "warnings"
            };
            let texts = self.warnings.iter().map(ToString::to_string).join("; ");
            summary.push_str(&format!(", {} {noun} ({texts})", self.warnings.len()));
        }

        summary
    }
}
