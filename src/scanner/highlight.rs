//! Highlight table: snippets to emphasize when a citation is opened.
//!
//! Keys are either the composite form `"{document}-p{page}-para{paragraph}"`
//! for one exact location, or a bare document name that applies to every
//! location in that document.
//!
//! ```rust
//! use cer_citations::scanner::HighlightTable;
//!
//! let table = HighlightTable::new()
//!     .with_entry("Access Policy-p3-para2", "reviewed quarterly")
//!     .with_entry("Access Policy", "access control");
//!
//! assert_eq!(table.lookup("Access Policy", 3, 2), "reviewed quarterly");
//! assert_eq!(table.lookup("Access Policy", 9, 9), "access control");
//! assert_eq!(table.lookup("Unknown", 1, 1), "");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use strsim::jaro_winkler;

use crate::models::composite_key;

/// Minimum Jaro-Winkler similarity for a document name suggestion
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Read-only mapping from citation keys to highlight snippets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightTable {
    entries: BTreeMap<String, String>,
}

impl HighlightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, builder style
    pub fn with_entry(mut self, key: impl Into<String>, snippet: impl Into<String>) -> Self {
        self.insert(key, snippet);
        self
    }

    /// Add or replace an entry under a raw key
    pub fn insert(&mut self, key: impl Into<String>, snippet: impl Into<String>) {
        self.entries.insert(key.into(), snippet.into());
    }

    /// Add or replace the entry for one exact location
    pub fn insert_location(
        &mut self,
        document_name: &str,
        page: u32,
        paragraph: u32,
        snippet: impl Into<String>,
    ) {
        self.insert(composite_key(document_name, page, paragraph), snippet);
    }

    /// Snippet for a location: the composite key first, then the bare
    /// document name, else empty.
    pub fn lookup(&self, document_name: &str, page: u32, paragraph: u32) -> &str {
        self.entries
            .get(&composite_key(document_name, page, paragraph))
            .or_else(|| self.entries.get(document_name))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge another table into this one; entries in `other` win
    pub fn extend(&mut self, other: HighlightTable) {
        self.entries.extend(other.entries);
    }

    /// Distinct document names known to the table, sorted
    pub fn document_names(&self) -> Vec<&str> {
        self.entries
            .keys()
            .map(|key| split_composite_key(key).map_or(key.as_str(), |(doc, _, _)| doc))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Closest known document name, if any is similar enough
    pub fn suggest(&self, document_name: &str) -> Option<&str> {
        let needle = document_name.trim().to_lowercase();

        self.document_names()
            .into_iter()
            .map(|name| (name, jaro_winkler(&needle, &name.to_lowercase())))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, _)| name)
    }
}

/// Split `"{document}-p{page}-para{paragraph}"` back into its parts.
fn split_composite_key(key: &str) -> Option<(&str, u32, u32)> {
    let (rest, paragraph) = key.rsplit_once("-para")?;
    let (document, page) = rest.rsplit_once("-p")?;
    if document.is_empty() {
        return None;
    }
    Some((document, page.parse().ok()?, paragraph.parse().ok()?))
}

impl From<HashMap<String, String>> for HighlightTable {
    fn from(map: HashMap<String, String>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for HighlightTable {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HighlightTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
