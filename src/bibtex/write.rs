//! BibTeX entry serialization.
//!
//! Output is deterministic: fixed field order, every value braced, and a
//! trailing comma on every field line. Absent fields are omitted rather
//! than written empty, so downstream BibTeX styles never see `year = {}`.

use itertools::Itertools;

use crate::bibtex::keys::CitationKey;
use crate::{BookRecord, Contributor, WorkType};

/// Placeholder author for records with no contributor evidence.
const UNKNOWN_CONTRIBUTOR: &str = "Unknown";

/// Renders one record as a BibTeX entry.
///
/// Contributor fields come first, then title, publisher, year, isbn. A
/// book that also names editors gets both fields; a record with neither
/// becomes a `@misc` entry with a placeholder author.
pub(crate) fn render_entry(record: &BookRecord, key: &CitationKey) -> String {
    let mut entry = String::new();
    entry.push('@');
    entry.push_str(record.work_type.entry_type());
    entry.push('{');
    entry.push_str(key.as_str());
    entry.push_str(",\n");

    match record.work_type {
        WorkType::Book => {
            push_field(&mut entry, "author", &join_contributors(&record.authors));
            if !record.editors.is_empty() {
                push_field(&mut entry, "editor", &join_contributors(&record.editors));
            }
        }
        WorkType::EditedBook => {
            push_field(&mut entry, "editor", &join_contributors(&record.editors));
        }
        WorkType::Unknown => {
            push_field(&mut entry, "author", UNKNOWN_CONTRIBUTOR);
        }
    }

    push_field(&mut entry, "title", &record.title);
    if let Some(publisher) = &record.publisher {
        push_field(&mut entry, "publisher", publisher);
    }
    if let Some(year) = record.year {
        push_field(&mut entry, "year", &year.to_string());
    }
    if let Some(isbn) = &record.isbn {
        push_field(&mut entry, "isbn", isbn);
    }

    entry.push('}');
    entry
}

/// Joins rendered entries into the final document, one blank line between
/// entries and a trailing newline when there is anything at all.
pub(crate) fn render_document(entries: &[String]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut document = entries.iter().join("\n\n");
    document.push('\n');
    document
}

fn push_field(entry: &mut String, name: &str, value: &str) {
    entry.push_str("    ");
    entry.push_str(name);
    entry.push_str(" = {");
    entry.push_str(&escape_value(value));
    entry.push_str("},\n");
}

/// Joins contributors with the `and` separator BibTeX expects, keeping
/// source order.
fn join_contributors(contributors: &[Contributor]) -> String {
    contributors.iter().map(|c| c.to_string()).join(" and ")
}

/// Escapes characters that would corrupt a BibTeX field, in one pass over
/// the value. Braces, percent, and the other TeX specials get a backslash;
/// a literal backslash becomes `\textbackslash{}` since escaping it with
/// another backslash would produce a line break instead.
pub(crate) fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '{' | '}' | '%' | '&' | '#' | '$' | '_' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}
