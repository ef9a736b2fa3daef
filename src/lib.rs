//! A library for converting LibraryThing catalog exports into BibTeX bibliographies.
//!
//! `lt2bib` takes the tab-delimited snapshot LibraryThing exports and turns
//! it into a BibTeX document, one entry per book, with stable citation keys
//! and a report of everything that happened along the way.
//!
//! # Key Features
//!
//! - **Forgiving input handling**: UTF-8 or UTF-16 exports, any line
//!   endings, ragged rows, and the column renames LibraryThing has gone
//!   through over the years.
//! - **Stable citation keys**: the classic surname-plus-year convention
//!   ("hunt1999"), with deterministic alpha suffixes when keys collide.
//! - **Per-record reporting**: a malformed row never aborts a run; it is
//!   skipped with a reason while the rest of the library converts.
//! - **Custom header mappings**: localized or renamed export columns map
//!   onto the schema through [`ExportConfig`].
//!
//! # Basic Usage
//!
//! ```rust
//! let export = b"Title\tAuthor\tDate\nThe Pragmatic Programmer\tHunt, Andrew\t1999\n";
//!
//! let conversion = lt2bib::convert(export).unwrap();
//! assert!(conversion.document.starts_with("@book{hunt1999,"));
//! println!("{}", conversion.report.summary());
//! ```
//!
//! # Custom Header Mappings
//!
//! Exports follow the account language, so a non-English snapshot needs its
//! headers mapped onto the schema:
//!
//! ```rust
//! use lt2bib::{Converter, ExportConfig, ExportField};
//!
//! let mut config = ExportConfig::new();
//! config.add_header_alias(ExportField::Title, "Titel");
//!
//! let converter = Converter::new().with_config(config);
//! ```
//!
//! # Error Handling
//!
//! Fatal errors are reserved for input that is not a library export at
//! all; everything else is reported per record:
//!
//! ```rust
//! use lt2bib::FormatError;
//!
//! match lt2bib::convert(b"not\tan\texport\n1\t2\t3\n") {
//!     Ok(conversion) => println!("{}", conversion.report.summary()),
//!     Err(FormatError::UnrecognizedHeader(header)) => {
//!         eprintln!("first row is not an export header: {header}");
//!     }
//!     Err(e) => eprintln!("error: {e}"),
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

mod bibtex;
mod convert;
mod error;
mod export;
mod report;
mod utils;

// Reexports
pub use bibtex::CitationKey;
pub use convert::{Conversion, Converter, convert};
pub use error::{FormatError, SkipReason};
pub use export::{ExportConfig, ExportField};
pub use report::{ConversionReport, ConversionWarning, Outcome, RowOutcome};

/// A specialized Result type for conversion operations.
pub type Result<T> = std::result::Result<T, FormatError>;

/// Represents an author or editor of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// The contributor's family name (surname)
    pub family_name: String,
    /// The contributor's given name, empty when the export only had a
    /// single name to offer
    pub given_name: String,
}

impl fmt::Display for Contributor {
    /// Formats the name the way BibTeX wants it: "Family, Given", or just
    /// the family name when no given name is known.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.given_name.is_empty() {
            f.write_str(&self.family_name)
        } else {
            write!(f, "{}, {}", self.family_name, self.given_name)
        }
    }
}

/// Classification of a record by its contributor evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkType {
    /// The record names at least one author.
    Book,
    /// The record names editors but no authors.
    EditedBook,
    /// The record names nobody at all.
    Unknown,
}

impl WorkType {
    /// The BibTeX entry type this work renders as.
    #[must_use]
    pub fn entry_type(&self) -> &'static str {
        match self {
            WorkType::Book | WorkType::EditedBook => "book",
            WorkType::Unknown => "misc",
        }
    }
}

/// Represents a single book normalized out of an export row.
///
/// Everything messy about the source row has been resolved by the time one
/// of these exists: the title is non-empty, names are split into family
/// and given parts, and the publisher, year, and ISBN are cleaned or
/// absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Title of the work, never empty
    pub title: String,
    /// Authors in source order
    pub authors: Vec<Contributor>,
    /// Editors in source order
    pub editors: Vec<Contributor>,
    /// Publisher name with LibraryThing's year/edition tail removed
    pub publisher: Option<String>,
    /// Four-digit publication year
    pub year: Option<i32>,
    /// ISBN, digits and hyphens only
    pub isbn: Option<String>,
    /// Classification driving the BibTeX entry type
    pub work_type: WorkType,
    /// 1-based line number of the source row, for diagnostics
    pub source_line: usize,
}
