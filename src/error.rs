//! Error and skip-reason types for export conversion.
//!
//! Only problems that mean the input is not a library export at all are
//! fatal. Anything wrong with an individual record is a [`SkipReason`],
//! recorded per record in the run report while the conversion continues.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents errors that abort a conversion run.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The input contains no non-blank rows at all.
    #[error("no header row found in input")]
    MissingHeader,

    /// The first non-blank row does not name a title column under any
    /// known spelling, so the input cannot be column-mapped.
    #[error("first row is not a recognizable export header: {0}")]
    UnrecognizedHeader(String),

    /// A header was found but no data rows follow it.
    #[error("no data rows follow the header")]
    NoDataRows,

    /// The underlying reader rejected the input.
    #[error("unreadable export data: {0}")]
    Unreadable(String),
}

impl From<csv::Error> for FormatError {
    fn from(err: csv::Error) -> Self {
        FormatError::Unreadable(err.to_string())
    }
}

/// Why a single record was left out of the generated document.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The title cell was missing or empty after cleanup.
    #[error("record has no title")]
    MissingTitle,

    /// The row holds data, but none of it falls under a recognized column.
    #[error("row cells do not line up with the export header")]
    RowShapeMismatch,
}
