//! Low-level reading of export bytes into rows.
//!
//! Everything fragile about the wire format is handled here: byte decoding
//! (LibraryThing wrote UTF-16 snapshots with a BOM), newline unification,
//! and tab splitting with pad/truncate row repair. The output is a list of
//! [`RawRow`]s that later stages can treat as clean.

use csv::ReaderBuilder;

use crate::error::FormatError;
use crate::export::config::ExportConfig;
use crate::export::fields::ExportField;
use crate::export::structure::RawRow;
use crate::report::ConversionWarning;

/// Rows and recoverable oddities from one parse.
pub(crate) struct ParsedExport {
    pub(crate) rows: Vec<RawRow>,
    pub(crate) warnings: Vec<ConversionWarning>,
}

/// Decodes export bytes into text.
///
/// The BOM decides: UTF-16 exports carry one and decode accordingly,
/// everything else decodes as UTF-8 with U+FFFD replacement. Decoding
/// never fails.
pub(crate) fn decode_bytes(bytes: &[u8]) -> String {
    let (text, _, _) = encoding_rs::UTF_8.decode(bytes);
    text.into_owned()
}

/// Rewrites CRLF and lone CR line endings to LF.
pub(crate) fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Splits normalized text into schema-resolved rows.
///
/// The first row with any non-empty cell is the header; it must name a
/// title column or the input is rejected. Rows that are entirely empty are
/// skipped without note. Row line numbers count physical lines of the
/// normalized text, 1-based.
pub(crate) fn parse_rows(text: &str, config: &ExportConfig) -> Result<ParsedExport, FormatError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .has_headers(false)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let mut header: Option<HeaderMap> = None;
    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    // With quoting off a record never spans lines and the reader skips
    // empty lines, so records pair one-to-one with the non-empty lines of
    // the text. Line numbers come from the line walk, not the reader.
    for (index, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let Some(result) = records.next() else { break };
        let record = result?;
        let line_number = index + 1;
        let cells: Vec<&str> = record.iter().collect();

        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        match &header {
            None => header = Some(HeaderMap::from_cells(&cells, config)?),
            Some(map) => {
                let (row, warning) = map.build_row(line_number, &cells);
                warnings.extend(warning);
                rows.push(row);
            }
        }
    }

    if header.is_none() {
        return Err(FormatError::MissingHeader);
    }
    if rows.is_empty() {
        return Err(FormatError::NoDataRows);
    }

    Ok(ParsedExport { rows, warnings })
}

/// Column-position to field mapping resolved from the header row.
struct HeaderMap {
    columns: Vec<Option<ExportField>>,
}

impl HeaderMap {
    /// Resolves header cells against the configured spellings.
    ///
    /// A header that maps no title column is taken as proof the input is
    /// not an export at all, since every LibraryThing snapshot has one.
    fn from_cells(cells: &[&str], config: &ExportConfig) -> Result<Self, FormatError> {
        let columns: Vec<Option<ExportField>> = cells
            .iter()
            .map(|cell| config.field_for_header(cell))
            .collect();

        if !columns.contains(&Some(ExportField::Title)) {
            return Err(FormatError::UnrecognizedHeader(cells.join("\t")));
        }

        Ok(Self { columns })
    }

    /// Builds a row from data cells.
    ///
    /// Cells are trimmed and empty cells stay absent. Short rows are
    /// implicitly padded (missing columns stay absent) and long rows are
    /// truncated to the header width, with a warning when the truncation
    /// happens.
    fn build_row(&self, line: usize, cells: &[&str]) -> (RawRow, Option<ConversionWarning>) {
        let mut row = RawRow::new(line);

        for (i, cell) in cells.iter().enumerate() {
            let value = cell.trim();
            if value.is_empty() {
                continue;
            }
            if let Some(field) = self.columns.get(i).copied().flatten() {
                row.insert(field, value);
            }
        }

        let warning = (cells.len() > self.columns.len()).then(|| ConversionWarning::ExtraCells {
            line,
            expected: self.columns.len(),
            found: cells.len(),
        });

        (row, warning)
    }
}
