//! Autocomplete for placeholders being typed.

use serde::Serialize;

use super::catalog::{CatalogEntry, VariableCatalog};
use super::scanner::{CLOSE, OPEN};

/// An unclosed `{…` run ending at the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionState {
    /// Char offset of the unmatched `{`
    pub query_start: usize,
    /// Text typed after the `{`, up to the cursor
    pub query: String,
}

impl SuggestionState {
    /// Char offset just past the typed query (the cursor when it was detected)
    pub fn query_end(&self) -> usize {
        self.query_start + 1 + self.query.chars().count()
    }
}

/// Detect suggestion mode at `offset`.
///
/// Scans backward for a `{` reached before any `}`. A second `{` before
/// that one (again before any `}`) means the run is nested and suggestion
/// mode stays off.
pub fn detect(text: &str, offset: usize) -> Option<SuggestionState> {
    let chars: Vec<char> = text.chars().collect();
    let offset = offset.min(chars.len());

    let brace = chars[..offset]
        .iter()
        .rposition(|&c| c == OPEN || c == CLOSE)?;
    if chars[brace] != OPEN {
        return None;
    }

    let nested = chars[..brace]
        .iter()
        .rfind(|&&c| c == OPEN || c == CLOSE)
        .is_some_and(|&c| c == OPEN);
    if nested {
        return None;
    }

    Some(SuggestionState {
        query_start: brace,
        query: chars[brace + 1..offset].iter().collect(),
    })
}

/// Catalog entries whose name contains `query`, case-insensitively, in
/// declaration order. An empty query returns the whole catalog.
pub fn suggest<'a>(catalog: &'a VariableCatalog, query: &str) -> Vec<CatalogEntry<'a>> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|entry| needle.is_empty() || entry.name.to_lowercase().contains(&needle))
        .collect()
}
