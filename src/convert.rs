//! The conversion pipeline: decode, parse, normalize, key, render.

use crate::WorkType;
use crate::bibtex::{self, CitationKey, KeyAllocator};
use crate::error::FormatError;
use crate::export::{ExportConfig, ExportParser};
use crate::report::{ConversionReport, ConversionWarning};

/// Output of one conversion run.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The generated BibTeX document. Empty when every record was skipped.
    pub document: String,
    /// Per-row outcomes and run warnings.
    pub report: ConversionReport,
    /// Key and title of each accepted record, in document order.
    pub accepted: Vec<(CitationKey, String)>,
}

impl Conversion {
    /// Renders a LaTeX document that cites every accepted key once.
    ///
    /// Running latex and bibtex over it exercises the whole generated
    /// bibliography. `bibliography` is the .bib file name without its
    /// extension.
    ///
    /// # Examples
    ///
    /// ```
    /// let export = b"Title\tAuthor\tDate\nThe Pragmatic Programmer\tHunt, Andrew\t1999\n";
    /// let conversion = lt2bib::convert(export).unwrap();
    ///
    /// let harness = conversion.latex_harness("LibraryThing");
    /// assert!(harness.contains("\\cite{hunt1999}"));
    /// assert!(harness.contains("\\bibliography{LibraryThing}"));
    /// ```
    #[must_use]
    pub fn latex_harness(&self, bibliography: &str) -> String {
        bibtex::test_document(&self.accepted, bibliography)
    }
}

/// Converts LibraryThing exports into BibTeX documents.
///
/// # Examples
///
/// ```
/// use lt2bib::Converter;
///
/// let export = b"Title\tAuthor\tDate\nThe Pragmatic Programmer\tHunt, Andrew\t1999\n";
/// let conversion = Converter::new().convert(export).unwrap();
///
/// assert!(conversion.document.starts_with("@book{hunt1999,"));
/// assert_eq!(conversion.report.accepted_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    parser: ExportParser,
}

impl Converter {
    /// Creates a converter with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a converter with a custom parser configuration.
    #[must_use]
    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.parser = ExportParser::new().with_config(config);
        self
    }

    /// Runs the pipeline over raw export bytes.
    ///
    /// Per-record problems never abort the run; they land in the report
    /// as skips or warnings. The only fatal failures are the ones that
    /// mean the input is not an export file at all.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] when no header can be found, the header
    /// names no title column, or no data rows follow it.
    pub fn convert(&self, bytes: &[u8]) -> Result<Conversion, FormatError> {
        let parsed = self.parser.parse(bytes)?;

        let mut report = ConversionReport::new();
        report.add_warnings(parsed.warnings);

        let mut keys = KeyAllocator::new();
        let mut accepted = Vec::new();
        let mut entries = Vec::new();

        for row in parsed.rows {
            let line = row.line_number;
            match row.into_record() {
                Ok(record) => {
                    if record.work_type == WorkType::Unknown {
                        report.add_warning(ConversionWarning::NoContributors {
                            line,
                            title: record.title.clone(),
                        });
                    }
                    let key = keys.assign(&record);
                    entries.push(bibtex::render_entry(&record, &key));
                    report.record_accepted(line, key.clone());
                    accepted.push((key, record.title));
                }
                Err(reason) => report.record_skipped(line, reason),
            }
        }

        Ok(Conversion {
            document: bibtex::render_document(&entries),
            report,
            accepted,
        })
    }
}

/// Converts export bytes with the default configuration.
///
/// Shorthand for [`Converter::new().convert(bytes)`](Converter::convert).
pub fn convert(bytes: &[u8]) -> Result<Conversion, FormatError> {
    Converter::new().convert(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExportField;
    use crate::error::SkipReason;
    use crate::report::{Outcome, RowOutcome};
    use pretty_assertions::assert_eq;

    fn outcome_lines(conversion: &Conversion) -> Vec<usize> {
        conversion
            .report
            .outcomes()
            .iter()
            .map(|row| row.line)
            .collect()
    }

    const EXPORT: &str = "\
Title\tPrimary Author\tAuthor (last, first)\tOther Authors\tPublication\tDate\tISBN
The Pragmatic Programmer\tAndrew Hunt\tHunt, Andrew\tDavid Thomas\tAddison-Wesley Professional (1999), Paperback\t1999\t[0201616224]
The Mythical Man-Month\tFrederick P. Brooks\tBrooks, Frederick P.\t\tAddison-Wesley (1995), Anniversary Edition\t1995\t[0201835959]
";

    #[test]
    fn test_convert_full_export() {
        let conversion = convert(EXPORT.as_bytes()).unwrap();

        assert_eq!(conversion.report.accepted_count(), 2);
        assert_eq!(conversion.report.skipped_count(), 0);
        assert!(conversion.document.starts_with("@book{hunt1999,"));
        assert!(conversion.document.contains("@book{brooks1995,"));
        assert!(
            conversion
                .document
                .contains("    author = {Hunt, Andrew and Thomas, David},\n")
        );
        assert!(
            conversion
                .document
                .contains("    publisher = {Addison-Wesley Professional},\n")
        );
        assert!(conversion.document.contains("    isbn = {0201616224},\n"));
        assert!(conversion.document.ends_with("}\n"));
    }

    #[test]
    fn test_entries_separated_by_blank_line() {
        let conversion = convert(EXPORT.as_bytes()).unwrap();
        assert_eq!(conversion.document.matches("\n\n@book{").count(), 1);
    }

    #[test]
    fn test_skipped_rows_reported_not_rendered() {
        let input = "Title\tAuthor\nBook One\tSmith, John\n\tDoe, Jane\nBook Two\tRoe, Richard\n";
        let conversion = convert(input.as_bytes()).unwrap();

        assert_eq!(conversion.report.accepted_count(), 2);
        assert_eq!(conversion.report.skipped_count(), 1);
        assert!(!conversion.document.contains("Doe"));

        let outcomes = conversion.report.outcomes();
        assert_eq!(outcomes[1].line, 3);
        assert_eq!(
            outcomes[1].outcome,
            Outcome::Skipped {
                reason: SkipReason::MissingTitle
            }
        );
    }

    #[test]
    fn test_outcome_lines_survive_blank_lines() {
        let input = "Title\tAuthor\r\n\r\nBook One\tSmith, John\r\n\t\r\n\
                     Book Two\tDoe, Jane\r\nBook Three\tRoe, Richard\r\n";
        let conversion = convert(input.as_bytes()).unwrap();

        assert_eq!(conversion.report.accepted_count(), 3);
        assert_eq!(outcome_lines(&conversion), vec![3, 5, 6]);
    }

    #[test]
    fn test_skip_lines_exact_after_interior_blank() {
        let input = "Title\tAuthor\n\n\tDoe, Jane\nBook Two\tRoe, Richard\n";
        let conversion = convert(input.as_bytes()).unwrap();

        assert_eq!(outcome_lines(&conversion), vec![3, 4]);
        assert_eq!(
            conversion.report.outcomes()[0].outcome,
            Outcome::Skipped {
                reason: SkipReason::MissingTitle
            }
        );
        assert_eq!(
            conversion.report.summary(),
            "1 record converted, 1 skipped (line 3: record has no title)"
        );
    }

    #[test]
    fn test_example_row_end_to_end() {
        let input = "Title\tAuthor\tEditor\tYear\nThe Pragmatic Programmer\tHunt, Andrew\t\t1999\n";
        let conversion = convert(input.as_bytes()).unwrap();

        assert_eq!(conversion.report.accepted_count(), 1);
        assert_eq!(conversion.accepted[0].0, "hunt1999");
        assert!(conversion.document.starts_with("@book{hunt1999,"));
        assert!(conversion.document.contains("    year = {1999},\n"));
    }

    #[test]
    fn test_record_without_contributors_still_renders() {
        let input = "Title\tAuthor\nAnonymous Classic\t\n";
        let conversion = convert(input.as_bytes()).unwrap();

        assert_eq!(conversion.report.accepted_count(), 1);
        assert!(conversion.document.starts_with("@misc{anon,"));
        assert!(conversion.document.contains("    author = {Unknown},\n"));
    }

    #[test]
    fn test_record_without_contributors_reported_degraded() {
        let input = "Title\tAuthor\nAnonymous Classic\t\n";
        let conversion = convert(input.as_bytes()).unwrap();

        assert_eq!(conversion.report.skipped_count(), 0);
        assert_eq!(
            conversion.report.warnings(),
            [ConversionWarning::NoContributors {
                line: 2,
                title: "Anonymous Classic".to_string(),
            }]
        );
        assert_eq!(
            conversion.report.summary(),
            "1 record converted, 1 warning (line 2: Anonymous Classic has no author or editor)"
        );
    }

    #[test]
    fn test_placeholder_only_row_skipped_as_missing_title() {
        let input = "Title\tAuthor\n(blank)\t(blank)\nBook Two\tDoe, Jane\n";
        let conversion = convert(input.as_bytes()).unwrap();

        assert_eq!(conversion.report.accepted_count(), 1);
        assert_eq!(
            conversion.report.outcomes()[0],
            RowOutcome {
                line: 2,
                outcome: Outcome::Skipped {
                    reason: SkipReason::MissingTitle
                }
            }
        );
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let first = convert(EXPORT.as_bytes()).unwrap();
        let second = convert(EXPORT.as_bytes()).unwrap();
        assert_eq!(first.document, second.document);
        assert_eq!(first.report, second.report);
    }

    #[test]
    fn test_utf16_input_converts_same_as_utf8() {
        let utf16: Vec<u8> = std::iter::once(0xFEFFu16)
            .chain(EXPORT.encode_utf16())
            .flat_map(u16::to_le_bytes)
            .collect();

        let from_utf8 = convert(EXPORT.as_bytes()).unwrap();
        let from_utf16 = convert(&utf16).unwrap();
        assert_eq!(from_utf8.document, from_utf16.document);
    }

    #[test]
    fn test_entry_count_matches_accepted_count() {
        let input = "Title\tAuthor\nBook One\tSmith, John\n\tDoe, Jane\nBook Two\t\n";
        let conversion = convert(input.as_bytes()).unwrap();
        assert_eq!(
            conversion.document.matches('@').count(),
            conversion.report.accepted_count()
        );
    }

    #[test]
    fn test_collision_keys_in_source_order() {
        let input = "Title\tAuthor\tDate\n\
                     First Book\tSmith, John\t2001\n\
                     Second Book\tSmith, Jane\t2001\n\
                     Third Book\tSmith, Jim\t2001\n";
        let conversion = convert(input.as_bytes()).unwrap();

        let keys: Vec<&str> = conversion
            .accepted
            .iter()
            .map(|(key, _)| key.as_str())
            .collect();
        assert_eq!(keys, vec!["smith2001", "smith2001a", "smith2001b"]);
    }

    #[test]
    fn test_all_rows_skipped_yields_empty_document() {
        let input = "Title\tAuthor\n\tSmith, John\n";
        let conversion = convert(input.as_bytes()).unwrap();

        assert_eq!(conversion.document, "");
        assert_eq!(conversion.report.accepted_count(), 0);
        assert_eq!(conversion.report.skipped_count(), 1);
        assert!(conversion.accepted.is_empty());
    }

    #[test]
    fn test_report_and_accepted_agree() {
        let conversion = convert(EXPORT.as_bytes()).unwrap();
        assert_eq!(
            conversion.accepted.len(),
            conversion.report.accepted_count()
        );

        let report_keys: Vec<_> = conversion
            .report
            .outcomes()
            .iter()
            .filter_map(|row| match &row.outcome {
                Outcome::Accepted { key } => Some(key.clone()),
                Outcome::Skipped { .. } => None,
            })
            .collect();
        let accepted_keys: Vec<_> = conversion
            .accepted
            .iter()
            .map(|(key, _)| key.clone())
            .collect();
        assert_eq!(report_keys, accepted_keys);
    }

    #[test]
    fn test_convert_with_localized_headers() {
        let mut config = ExportConfig::new();
        config
            .add_header_alias(ExportField::Title, "Titel")
            .add_header_alias(ExportField::AuthorSorted, "Autor (Nachname, Vorname)")
            .add_header_alias(ExportField::Date, "Jahr");

        let input = "Titel\tAutor (Nachname, Vorname)\tJahr\nDas Kapital\tMarx, Karl\t1867\n";
        let conversion = Converter::new()
            .with_config(config)
            .convert(input.as_bytes())
            .unwrap();

        assert!(conversion.document.starts_with("@book{marx1867,"));
    }

    #[test]
    fn test_unreadable_input_fails() {
        assert!(matches!(
            convert(b"Book Id\tRating\n1\t5\n"),
            Err(FormatError::UnrecognizedHeader(_))
        ));
        assert!(matches!(convert(b""), Err(FormatError::MissingHeader)));
    }

    #[test]
    fn test_warnings_surface_in_report() {
        let input = "Title\tAuthor\nBook One\tSmith, John\tstray\n";
        let conversion = convert(input.as_bytes()).unwrap();
        assert_eq!(
            conversion.report.warnings(),
            [ConversionWarning::ExtraCells {
                line: 2,
                expected: 2,
                found: 3,
            }]
        );
    }
}
