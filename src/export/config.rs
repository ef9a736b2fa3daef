//! Configuration for export parsing with custom header mappings.

use std::collections::HashMap;

use crate::export::fields::ExportField;

/// Configuration for export parsing.
///
/// The built-in header spellings cover LibraryThing's English exports old
/// and new. Exports follow the account language, so a German snapshot says
/// "Titel" where an English one says "Title"; extra aliases map those
/// without touching the schema.
///
/// # Examples
///
/// ```
/// use lt2bib::{ExportConfig, ExportField};
///
/// let mut config = ExportConfig::new();
/// config
///     .add_header_alias(ExportField::Title, "Titel")
///     .add_header_alias(ExportField::Author, "Autor");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExportConfig {
    /// Extra header spellings, stored lowercased.
    aliases: HashMap<String, ExportField>,
}

impl ExportConfig {
    /// Creates a configuration with the built-in header spellings only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an additional header spelling for a field.
    pub fn add_header_alias(&mut self, field: ExportField, alias: &str) -> &mut Self {
        self.aliases.insert(alias.trim().to_lowercase(), field);
        self
    }

    /// Resolves a header cell to a field, custom aliases first.
    pub(crate) fn field_for_header(&self, header: &str) -> Option<ExportField> {
        let key = header.trim().to_lowercase();
        self.aliases
            .get(key.as_str())
            .copied()
            .or_else(|| ExportField::from_header(header))
    }
}
