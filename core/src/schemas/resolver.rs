#![deny(missing_docs)]

//! # Schema Resolution
//!
//! Fetches a schema document at most once per canonical URL, registers it in
//! the [`SchemaCache`], then follows its nested `$ref` links.
//!
//! Nested references are rewritten to their canonical absolute form before the
//! record is cached, so the emitter can look every link up directly.

use crate::error::{AppError, AppResult};
use crate::fetch::Fetcher;
use crate::model::{SchemaNode, SchemaRecord};
use crate::schemas::cache::{canonical_url, document_location, has_pointer_fragment, SchemaCache};
use url::Url;

/// Borrowed view over a fetcher and the cache it fills.
pub struct Resolver<'s, F: Fetcher> {
    fetcher: &'s F,
    cache: &'s mut SchemaCache,
}

impl<'s, F: Fetcher> Resolver<'s, F> {
    /// Creates a resolver writing into `cache`.
    pub fn new(fetcher: &'s F, cache: &'s mut SchemaCache) -> Self {
        Self { fetcher, cache }
    }

    /// Resolves `url` and returns its canonical cache key.
    ///
    /// An empty URL resolves to `None`. A URL already in the cache is
    /// returned without fetching. A URL pointing into a document
    /// (`a.json#/definitions/b`) is rejected.
    pub fn resolve(&mut self, url: &str) -> AppResult<Option<String>> {
        if url.trim().is_empty() {
            return Ok(None);
        }
        if has_pointer_fragment(url) {
            return Err(AppError::decode(url, "JSON pointer fragments are not supported"));
        }
        let key = canonical_url(url).into_owned();
        if self.cache.contains(&key) {
            tracing::trace!(url = %key, "schema cache hit");
            return Ok(Some(key));
        }
        self.load(&key)?;
        Ok(Some(key))
    }

    /// Cached record for an already resolved key.
    pub fn record_mut(&mut self, key: &str) -> Option<&mut SchemaRecord> {
        self.cache.get_mut(key)
    }

    fn load(&mut self, key: &str) -> AppResult<()> {
        let location = document_location(key);
        tracing::debug!(url = %key, "fetching schema");
        let body = self.fetcher.fetch(location)?;
        let mut root: SchemaNode =
            serde_json::from_str(&body).map_err(|e| AppError::decode(key, e))?;

        let mut failure = None;
        let mut nested = Vec::new();
        root.for_each_reference_mut(&mut |reference| {
            if failure.is_some() {
                return;
            }
            if reference.starts_with('#') {
                tracing::debug!(url = %key, %reference, "local reference left unresolved");
                return;
            }
            match absolute_reference(reference, location) {
                Some(abs) if has_pointer_fragment(&abs) => {
                    failure = Some(format!("unsupported fragment in reference '{}'", reference));
                }
                Some(abs) => {
                    let canonical = canonical_url(&abs).into_owned();
                    *reference = canonical.clone();
                    nested.push(canonical);
                }
                None => failure = Some(format!("cannot resolve reference '{}'", reference)),
            }
        });
        if let Some(message) = failure {
            return Err(AppError::decode(key, message));
        }

        // registered before descending so reference cycles terminate
        self.cache.insert(SchemaRecord::new(key, root))?;
        for reference in nested {
            self.resolve(&reference)?;
        }
        Ok(())
    }
}

/// Makes `reference` absolute against the document it appears in.
///
/// Already-absolute references are returned verbatim so they keep the exact
/// spelling other entries use for the same schema.
fn absolute_reference(reference: &str, base: &str) -> Option<String> {
    if Url::parse(reference).is_ok() {
        return Some(reference.to_string());
    }
    let base = Url::parse(base).ok()?;
    base.join(reference).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MapFetcher;

    fn resolve_all(fetcher: &MapFetcher, urls: &[&str]) -> AppResult<SchemaCache> {
        let mut cache = SchemaCache::new();
        let mut resolver = Resolver::new(fetcher, &mut cache);
        for url in urls {
            resolver.resolve(url)?;
        }
        Ok(cache)
    }

    #[test]
    fn test_empty_url_is_noop() {
        let fetcher = MapFetcher::new();
        let mut cache = SchemaCache::new();
        let key = Resolver::new(&fetcher, &mut cache).resolve("").unwrap();
        assert!(key.is_none());
        assert!(cache.is_empty());
        assert_eq!(fetcher.total_requests(), 0);
    }

    #[test]
    fn test_fetches_once_per_canonical_url() {
        let fetcher = MapFetcher::new().with("http://s/a.json", r#"{"title": "A"}"#);
        let cache = resolve_all(&fetcher, &["http://s/a.json", "http://s/a.json#"]).unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(fetcher.request_count("http://s/a.json"), 1);
        assert_eq!(cache.get("http://s/a.json").unwrap().source_url, "http://s/a.json#");
    }

    #[test]
    fn test_nested_references_are_resolved_and_rewritten() {
        let fetcher = MapFetcher::new()
            .with(
                "http://s/v1/list.json",
                r##"{"title": "List", "type": "object", "properties": {
                    "items": {"type": "array", "items": {"$ref": "item.json"}},
                    "local": {"$ref": "#/definitions/x"}
                }}"##,
            )
            .with(
                "http://s/v1/item.json",
                r#"{"title": "Item", "properties": {"owner": {"$ref": "http://s/common/owner.json#"}}}"#,
            )
            .with("http://s/common/owner.json", r#"{"title": "Owner"}"#);

        let cache = resolve_all(&fetcher, &["http://s/v1/list.json"]).unwrap();

        assert_eq!(
            cache.sorted_urls(),
            vec![
                "http://s/common/owner.json#",
                "http://s/v1/item.json#",
                "http://s/v1/list.json#"
            ]
        );
        let list = cache.get("http://s/v1/list.json#").unwrap();
        assert_eq!(
            list.root.references(),
            vec!["http://s/v1/item.json#", "#/definitions/x"]
        );
    }

    #[test]
    fn test_reference_cycle_terminates() {
        let fetcher = MapFetcher::new()
            .with("http://s/a.json", r#"{"title": "A", "items": {"$ref": "b.json#"}}"#)
            .with("http://s/b.json", r#"{"title": "B", "items": {"$ref": "a.json#"}}"#);

        let cache = resolve_all(&fetcher, &["http://s/a.json#"]).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(fetcher.request_count("http://s/a.json"), 1);
        assert_eq!(fetcher.request_count("http://s/b.json"), 1);
    }

    #[test]
    fn test_nested_fetch_failure_propagates() {
        let fetcher = MapFetcher::new().with(
            "http://s/a.json",
            r#"{"title": "A", "items": {"$ref": "missing.json"}}"#,
        );
        let err = resolve_all(&fetcher, &["http://s/a.json"]).unwrap_err();
        assert!(matches!(err, AppError::Transport { ref url, .. } if url == "http://s/missing.json"));
    }

    #[test]
    fn test_malformed_schema_is_decode_error() {
        let fetcher = MapFetcher::new().with("http://s/a.json", "{ not json");
        let err = resolve_all(&fetcher, &["http://s/a.json"]).unwrap_err();
        assert!(matches!(err, AppError::Decode { ref url, .. } if url == "http://s/a.json#"));
    }

    #[test]
    fn test_nested_pointer_fragment_is_rejected() {
        let fetcher = MapFetcher::new()
            .with(
                "http://s/a.json",
                r#"{"title": "A", "properties": {"owner": {"$ref": "common.json#/definitions/owner"}}}"#,
            )
            .with("http://s/common.json", r#"{"title": "Common"}"#);

        let err = resolve_all(&fetcher, &["http://s/a.json"]).unwrap_err();

        match err {
            AppError::Decode { url, message } => {
                assert_eq!(url, "http://s/a.json#");
                assert!(message.contains("common.json#/definitions/owner"));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(fetcher.request_count("http://s/common.json"), 0);
    }

    #[test]
    fn test_entry_pointer_fragment_is_rejected() {
        let fetcher = MapFetcher::new().with("http://s/common.json", r#"{"title": "Common"}"#);
        let mut cache = SchemaCache::new();

        let err = Resolver::new(&fetcher, &mut cache)
            .resolve("http://s/common.json#/definitions/owner")
            .unwrap_err();

        assert!(matches!(err, AppError::Decode { .. }));
        assert!(cache.is_empty());
        assert_eq!(fetcher.total_requests(), 0);
    }

    #[test]
    fn test_absolute_reference() {
        assert_eq!(
            absolute_reference("b.json#", "http://s/v1/a.json").as_deref(),
            Some("http://s/v1/b.json#")
        );
        assert_eq!(
            absolute_reference("http://other/c.json", "http://s/v1/a.json").as_deref(),
            Some("http://other/c.json")
        );
        assert_eq!(absolute_reference("b.json", "not a url"), None);
    }
}
