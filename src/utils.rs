use regex::Regex;
use std::sync::LazyLock;

use crate::Contributor;

static YEAR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

static PUBLISHER_YEAR_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\d{4}\)\s*$").unwrap());

/// Quote pairs stripped from the outside of a title, straight or typographic.
const QUOTE_PAIRS: [(char, char); 4] = [
    ('"', '"'),
    ('\'', '\''),
    ('\u{201c}', '\u{201d}'),
    ('\u{2018}', '\u{2019}'),
];

/// Cleans a title cell: trims, strips matching outer quote pairs, and
/// collapses internal whitespace runs to single spaces.
pub(crate) fn clean_title(raw: &str) -> String {
    let mut title = raw.trim();
    loop {
        let stripped = strip_quote_pair(title);
        if stripped == title {
            break;
        }
        title = stripped;
    }
    title.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_quote_pair(s: &str) -> &str {
    for (open, close) in QUOTE_PAIRS {
        if s.chars().count() >= 2 && s.starts_with(open) && s.ends_with(close) {
            return s[open.len_utf8()..s.len() - close.len_utf8()].trim();
        }
    }
    s
}

/// Splits a contributor cell into individual names.
///
/// LibraryThing joins multiple names with ampersands, semicolons, or
/// newlines. Cells cannot hold a raw newline in an unquoted export, so the
/// two-character escape sequence is normalized first. A bare comma is never
/// a separator: "Freed, Richard C." is one name.
pub(crate) fn split_contributor_list(cell: &str) -> Vec<Contributor> {
    let normalized = cell
        .replace("\\r\\n", "\n")
        .replace("\\r", "\n")
        .replace("\\n", "\n");

    normalized
        .split(['&', ';', '\n'])
        .map(|fragment| fragment.trim().trim_end_matches(',').trim_end())
        .filter(|fragment| !fragment.is_empty())
        .map(parse_contributor_name)
        .collect()
}

/// Parses a single name into family and given parts.
///
/// "Family, Given" splits on the first comma. Without a comma the name is
/// in display order, so the last whitespace-separated token is the family
/// name and everything before it is the given name.
pub(crate) fn parse_contributor_name(name: &str) -> Contributor {
    if let Some((family, given)) = name.split_once(',') {
        return Contributor {
            family_name: family.trim().to_string(),
            given_name: given.trim().to_string(),
        };
    }

    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.split_last() {
        None => Contributor {
            family_name: String::new(),
            given_name: String::new(),
        },
        Some((family, given)) => Contributor {
            family_name: (*family).to_string(),
            given_name: given.join(" "),
        },
    }
}

/// Extracts the publisher name from a publication cell.
///
/// LibraryThing packs place, year, edition, and binding into one cell,
/// e.g. "McGraw-Hill (2003), Edition: 2, Paperback". The name is the part
/// before the first comma, minus a trailing parenthesized year.
pub(crate) fn extract_publisher(cell: &str) -> Option<String> {
    let head = cell.split(',').next().unwrap_or("").trim();
    let name = PUBLISHER_YEAR_SUFFIX.replace(head, "");
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Finds the first four-digit run in a date cell.
pub(crate) fn parse_year(cell: &str) -> Option<i32> {
    YEAR_REGEX.find(cell).and_then(|m| m.as_str().parse().ok())
}

/// Normalizes an ISBN cell to the first value it holds, keeping digits and
/// hyphens only. Brackets are dropped; an X check digit is dropped together
/// with the hyphen before it.
pub(crate) fn normalize_isbn(cell: &str) -> Option<String> {
    cell.split([',', ' '])
        .map(|token| {
            let isbn: String = token
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '-')
                .collect();
            isbn.trim_end_matches('-').to_string()
        })
        .find(|isbn| !isbn.is_empty())
}
