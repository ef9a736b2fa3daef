//! LibraryThing export parser implementation.
//!
//! LibraryThing's export is a tab-delimited snapshot of a member's whole
//! catalog: one header row naming the columns, one row per book, no cell
//! quoting. Historical snapshots were UTF-16 with a BOM; current ones are
//! UTF-8. This module turns those bytes into rows resolved against the
//! field schema, leaving normalization to the rows themselves.

mod config;
mod fields;
mod parse;
mod structure;

pub use config::ExportConfig;
pub use fields::ExportField;

pub(crate) use parse::ParsedExport;

use crate::error::FormatError;

/// Parser for LibraryThing tab-delimited exports.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExportParser {
    config: ExportConfig,
}

impl ExportParser {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Decodes, normalizes, and splits raw export bytes into rows.
    pub(crate) fn parse(&self, bytes: &[u8]) -> Result<ParsedExport, FormatError> {
        let text = parse::decode_bytes(bytes);
        let text = parse::normalize_newlines(&text);
        parse::parse_rows(&text, &self.config)
    }
}
