//! Citation key derivation and collision handling.
//!
//! Keys follow the surname-plus-year convention ("hunt1999"). Within one
//! document every key must be unique, so colliding records get an alpha
//! suffix in source order: the first "smith2001" keeps the bare key, the
//! next becomes "smith2001a", then "smith2001b". Past "z" the suffix grows
//! a letter ("aa").

use std::collections::{HashMap, HashSet};
use std::fmt;

use compact_str::{CompactString, format_compact};
use serde::{Deserialize, Serialize};

use crate::BookRecord;

/// Key token used when a record names no contributor at all.
const ANONYMOUS: &str = "anon";

/// Unique identifier of one entry within a generated document.
///
/// Keys are plain ASCII: the lowercased alphanumeric surname of the first
/// contributor, the four-digit year when one was found, and a collision
/// suffix when needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CitationKey(CompactString);

impl CitationKey {
    pub(crate) fn new(key: impl Into<CompactString>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CitationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CitationKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for CitationKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Hands out document-unique keys in a single forward pass.
#[derive(Debug, Default)]
pub(crate) struct KeyAllocator {
    /// Next suffix index per base key; 0 means the bare base is still free.
    next_suffix: HashMap<String, u32>,
    /// Every key issued so far. Guards against a literal surname colliding
    /// with an already-suffixed key ("smitha" the surname vs "smith" + "a").
    issued: HashSet<CompactString>,
}

impl KeyAllocator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Assigns the next free key for a record.
    pub(crate) fn assign(&mut self, record: &BookRecord) -> CitationKey {
        let base = base_key(record);
        let next = self.next_suffix.entry(base.clone()).or_insert(0);
        loop {
            let candidate = match *next {
                0 => CompactString::from(base.as_str()),
                n => format_compact!("{base}{}", alpha_suffix(n)),
            };
            *next += 1;
            if self.issued.insert(candidate.clone()) {
                return CitationKey::new(candidate);
            }
        }
    }
}

/// Composes the base key: surname of the first contributor plus year.
///
/// Authors win over editors. A surname with no ASCII alphanumerics left
/// after filtering falls back to the anonymous token, same as no
/// contributor at all.
fn base_key(record: &BookRecord) -> String {
    let surname = record
        .authors
        .first()
        .or_else(|| record.editors.first())
        .map(|c| key_token(&c.family_name))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| ANONYMOUS.to_string());

    match record.year {
        Some(year) => format!("{surname}{year}"),
        None => surname,
    }
}

/// Lowercases and keeps ASCII alphanumerics only. No transliteration, so
/// non-ASCII letters simply drop out.
fn key_token(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Bijective base-26 suffix: 1 is "a", 26 is "z", 27 is "aa".
fn alpha_suffix(mut n: u32) -> String {
    let mut suffix = String::new();
    while n > 0 {
        n -= 1;
        suffix.insert(0, (b'a' + (n % 26) as u8) as char);
        n /= 26;
    }
    suffix
}
