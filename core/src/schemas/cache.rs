#![deny(missing_docs)]

//! # Schema Cache
//!
//! Canonical URL -> resolved schema record. Records are inserted exactly once
//! per load and never removed. Iteration order of the underlying map carries
//! no meaning; consumers go through [`SchemaCache::sorted_urls`].

use crate::error::{AppError, AppResult};
use crate::model::SchemaRecord;
use std::borrow::Cow;
use std::collections::HashMap;

/// Marker every canonical schema URL ends with.
pub const FRAGMENT_MARKER: char = '#';

/// Normalizes a schema URL into its cache key by appending `#` when missing.
pub fn canonical_url(url: &str) -> Cow<'_, str> {
    if url.ends_with(FRAGMENT_MARKER) {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("{}{}", url, FRAGMENT_MARKER))
    }
}

/// The retrievable part of a URL, i.e. everything before the first `#`.
pub fn document_location(url: &str) -> &str {
    match url.find(FRAGMENT_MARKER) {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Whether `url` carries a non-empty fragment such as `#/definitions/x`.
///
/// Only whole documents are cached, so such URLs have no cache key.
pub fn has_pointer_fragment(url: &str) -> bool {
    url.split_once(FRAGMENT_MARKER)
        .is_some_and(|(_, fragment)| !fragment.is_empty())
}

/// Session-owned store of resolved schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaCache {
    records: HashMap<String, SchemaRecord>,
}

impl SchemaCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a record; `url` need not be canonical.
    pub fn get(&self, url: &str) -> Option<&SchemaRecord> {
        self.records.get(canonical_url(url).as_ref())
    }

    /// Mutable lookup; `url` need not be canonical.
    pub fn get_mut(&mut self, url: &str) -> Option<&mut SchemaRecord> {
        self.records.get_mut(canonical_url(url).as_ref())
    }

    /// Whether a record exists for `url`.
    pub fn contains(&self, url: &str) -> bool {
        self.get(url).is_some()
    }

    /// Registers a freshly fetched record under its canonical source URL.
    ///
    /// A second insert for the same URL means a schema was fetched twice and
    /// is reported as an error.
    pub fn insert(&mut self, record: SchemaRecord) -> AppResult<()> {
        let key = canonical_url(&record.source_url).into_owned();
        if self.records.contains_key(&key) {
            return Err(AppError::General(format!(
                "Schema '{}' registered twice",
                key
            )));
        }
        self.records.insert(key, record);
        Ok(())
    }

    /// Number of cached schemas.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every cached URL, sorted lexicographically.
    pub fn sorted_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.records.keys().cloned().collect();
        urls.sort();
        urls
    }

    /// Records in sorted URL order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &SchemaRecord> + '_ {
        let mut records: Vec<&SchemaRecord> = self.records.values().collect();
        records.sort_by(|a, b| a.source_url.cmp(&b.source_url));
        records.into_iter()
    }

    /// Assigned type name for `url`, once naming has run.
    pub fn type_name(&self, url: &str) -> Option<&str> {
        self.get(url).and_then(|r| r.type_name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SchemaNode;

    #[test]
    fn test_canonical_url() {
        assert_eq!(canonical_url("http://x/a.json"), "http://x/a.json#");
        assert_eq!(canonical_url("http://x/a.json#"), "http://x/a.json#");
        assert!(matches!(canonical_url("http://x/a.json#"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_document_location() {
        assert_eq!(document_location("http://x/a.json#"), "http://x/a.json");
        assert_eq!(document_location("http://x/a.json#/defs/b"), "http://x/a.json");
        assert_eq!(document_location("http://x/a.json"), "http://x/a.json");
    }

    #[test]
    fn test_has_pointer_fragment() {
        assert!(has_pointer_fragment("http://x/a.json#/definitions/b"));
        assert!(has_pointer_fragment("#/definitions/b"));
        assert!(!has_pointer_fragment("http://x/a.json#"));
        assert!(!has_pointer_fragment("http://x/a.json"));
    }

    #[test]
    fn test_lookup_is_canonical() {
        let mut cache = SchemaCache::new();
        cache
            .insert(SchemaRecord::new("http://x/a.json#", SchemaNode::default()))
            .unwrap();

        assert!(cache.contains("http://x/a.json"));
        assert!(cache.contains("http://x/a.json#"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_double_insert_is_rejected() {
        let mut cache = SchemaCache::new();
        cache
            .insert(SchemaRecord::new("http://x/a.json#", SchemaNode::default()))
            .unwrap();
        let err = cache
            .insert(SchemaRecord::new("http://x/a.json", SchemaNode::default()))
            .unwrap_err();
        assert!(matches!(err, AppError::General(_)));
    }

    #[test]
    fn test_sorted_urls() {
        let mut cache = SchemaCache::new();
        for url in ["http://x/c.json#", "http://x/a.json#", "http://x/b.json#"] {
            cache
                .insert(SchemaRecord::new(url, SchemaNode::default()))
                .unwrap();
        }
        assert_eq!(
            cache.sorted_urls(),
            vec!["http://x/a.json#", "http://x/b.json#", "http://x/c.json#"]
        );
        let order: Vec<&str> = cache.iter_sorted().map(|r| r.source_url.as_str()).collect();
        assert_eq!(order, cache.sorted_urls());
    }
}
