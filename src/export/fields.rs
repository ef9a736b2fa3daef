//! Known columns of a LibraryThing export and their header spellings.
//!
//! LibraryThing has renamed its export columns over the years ("AUTHOR
//! (last, first)" in the old .xls snapshots, "Primary Author" today), so
//! each field carries every spelling seen in the wild. Header matching is
//! case-insensitive and ignores surrounding whitespace.

use serde::{Deserialize, Serialize};

/// Semantic type of a recognized export column.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportField {
    /// Book title.
    Title,
    /// Primary author in display order ("Richard C. Freed").
    Author,
    /// Primary author in sort order ("Freed, Richard C."). Authoritative
    /// for the family name when present.
    AuthorSorted,
    /// Additional contributors beyond the primary author.
    OtherAuthors,
    /// Editor or editors of the work.
    Editors,
    /// Publisher, usually with the year/edition/binding tail LibraryThing
    /// appends ("McGraw-Hill (2003), Edition: 2, Paperback").
    Publisher,
    /// Publication date or year.
    Date,
    /// ISBN, possibly bracketed or multi-valued.
    Isbn,
}

/// Built-in header spellings for each field, all lowercase.
const DEFAULT_HEADERS: &[(ExportField, &[&str])] = &[
    (ExportField::Title, &["title"]),
    (
        ExportField::Author,
        &[
            "author",
            "authors",
            "primary author",
            "author (first, last)",
        ],
    ),
    (
        ExportField::AuthorSorted,
        &[
            "author (last, first)",
            "primary author (last, first)",
            "sort author",
        ],
    ),
    (
        ExportField::OtherAuthors,
        &["other authors", "secondary author", "secondary authors"],
    ),
    (ExportField::Editors, &["editor", "editors"]),
    (ExportField::Publisher, &["publisher", "publication"]),
    (
        ExportField::Date,
        &["date", "year", "publication date", "pub date"],
    ),
    (ExportField::Isbn, &["isbn", "isbns"]),
];

impl ExportField {
    /// Matches a header cell against the built-in spellings.
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim().to_lowercase();
        DEFAULT_HEADERS.iter().find_map(|(field, aliases)| {
            aliases.contains(&header.as_str()).then_some(*field)
        })
    }

    /// The spelling used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportField::Title => "title",
            ExportField::Author => "author",
            ExportField::AuthorSorted => "author (last, first)",
            ExportField::OtherAuthors => "other authors",
            ExportField::Editors => "editor",
            ExportField::Publisher => "publisher",
            ExportField::Date => "date",
            ExportField::Isbn => "isbn",
        }
    }
}
