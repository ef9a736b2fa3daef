//! Export row structures and their conversion into book records.
//!
//! [`RawRow::into_record`] is where everything messy about a LibraryThing
//! row gets resolved: quoted titles, glued-together contributor lists,
//! bracketed ISBNs, and publisher cells with a year tail.

use std::collections::HashMap;

use crate::error::SkipReason;
use crate::export::fields::ExportField;
use crate::utils::{
    clean_title, extract_publisher, normalize_isbn, parse_year, split_contributor_list,
};
use crate::{BookRecord, WorkType};

/// Cell value LibraryThing writes for a column it has no data for.
const BLANK_PLACEHOLDER: &str = "(blank)";

/// One data row, resolved against the field schema.
///
/// The parser only builds rows that hold at least one non-empty cell, so a
/// row with an empty value map is one whose content all sat under
/// unrecognized columns.
#[derive(Debug, Clone)]
pub(crate) struct RawRow {
    /// 1-based line number in the decoded source, for diagnostics.
    pub(crate) line_number: usize,
    /// Non-empty cell values under recognized columns. When a header name
    /// repeats, the first column wins.
    values: HashMap<ExportField, String>,
}

impl RawRow {
    pub(crate) fn new(line_number: usize) -> Self {
        Self {
            line_number,
            values: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, field: ExportField, value: &str) {
        self.values
            .entry(field)
            .or_insert_with(|| value.to_string());
    }

    /// Reads a cell value. The literal `(blank)` placeholder reads as
    /// absent, so a placeholder title skips the record and a placeholder
    /// sorted author falls back to the display-order column.
    pub(crate) fn value(&self, field: ExportField) -> Option<&str> {
        self.values
            .get(&field)
            .map(String::as_str)
            .filter(|value| !value.eq_ignore_ascii_case(BLANK_PLACEHOLDER))
    }

    /// Normalizes this row into a [`BookRecord`].
    ///
    /// The sorted author column takes precedence over the display-order one
    /// when both are present, since it spells the family name out. Other
    /// authors are appended after the primary author in source order.
    pub(crate) fn into_record(self) -> Result<BookRecord, SkipReason> {
        if self.values.is_empty() {
            return Err(SkipReason::RowShapeMismatch);
        }

        let title = clean_title(self.value(ExportField::Title).unwrap_or_default());
        if title.is_empty() {
            return Err(SkipReason::MissingTitle);
        }

        let mut authors = Vec::new();
        let primary = self
            .value(ExportField::AuthorSorted)
            .or_else(|| self.value(ExportField::Author));
        if let Some(cell) = primary {
            authors.extend(split_contributor_list(cell));
        }
        if let Some(cell) = self.value(ExportField::OtherAuthors) {
            authors.extend(split_contributor_list(cell));
        }

        let editors = self
            .value(ExportField::Editors)
            .map(split_contributor_list)
            .unwrap_or_default();

        let work_type = if !authors.is_empty() {
            WorkType::Book
        } else if !editors.is_empty() {
            WorkType::EditedBook
        } else {
            WorkType::Unknown
        };

        Ok(BookRecord {
            title,
            authors,
            editors,
            publisher: self
                .value(ExportField::Publisher)
                .and_then(extract_publisher),
            year: self.value(ExportField::Date).and_then(parse_year),
            isbn: self.value(ExportField::Isbn).and_then(normalize_isbn),
            work_type,
            source_line: self.line_number,
        })
    }
}
