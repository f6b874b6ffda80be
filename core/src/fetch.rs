//! # Document Retrieval
//!
//! Transport seam between the loader and the outside world. The loader only
//! ever asks for the body of a location; how it is retrieved is up to the
//! `Fetcher` implementation.

use crate::error::{AppError, AppResult};
use std::cell::RefCell;
use std::collections::HashMap;

/// Retrieves the raw body of a manifest, document or schema.
pub trait Fetcher {
    /// Returns the body stored at `location`.
    ///
    /// Any failure is fatal to the load and must be reported as
    /// [`AppError::Transport`].
    fn fetch(&self, location: &str) -> AppResult<String>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, location: &str) -> AppResult<String> {
        (**self).fetch(location)
    }
}

/// Blocking HTTP fetcher.
#[cfg(feature = "client")]
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher;

#[cfg(feature = "client")]
impl HttpFetcher {
    /// Creates a new HTTP fetcher.
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "client")]
impl Fetcher for HttpFetcher {
    fn fetch(&self, location: &str) -> AppResult<String> {
        tracing::debug!(%location, "GET");
        let mut response = ureq::get(location)
            .call()
            .map_err(|e| AppError::transport(location, e))?;
        response
            .body_mut()
            .read_to_string()
            .map_err(|e| AppError::transport(location, e))
    }
}

/// In-memory fetcher keyed by location.
///
/// Records every request so callers can check how often a location was
/// retrieved.
#[derive(Debug, Default)]
pub struct MapFetcher {
    bodies: HashMap<String, String>,
    requests: RefCell<HashMap<String, usize>>,
}

impl MapFetcher {
    /// Creates an empty fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `body` under `location`, replacing any previous body.
    pub fn insert(&mut self, location: impl Into<String>, body: impl Into<String>) {
        self.bodies.insert(location.into(), body.into());
    }

    /// Builder form of [`MapFetcher::insert`].
    pub fn with(mut self, location: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(location, body);
        self
    }

    /// Number of times `location` was requested, including failed requests.
    pub fn request_count(&self, location: &str) -> usize {
        self.requests.borrow().get(location).copied().unwrap_or(0)
    }

    /// Total number of requests served or refused.
    pub fn total_requests(&self) -> usize {
        self.requests.borrow().values().sum()
    }
}

impl Fetcher for MapFetcher {
    fn fetch(&self, location: &str) -> AppResult<String> {
        *self
            .requests
            .borrow_mut()
            .entry(location.to_string())
            .or_insert(0) += 1;
        self.bodies
            .get(location)
            .cloned()
            .ok_or_else(|| AppError::transport(location, "404 Not Found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_fetcher_counts_requests() {
        let fetcher = MapFetcher::new().with("http://x/a.json", "{}");

        assert_eq!(fetcher.fetch("http://x/a.json").unwrap(), "{}");
        assert_eq!(fetcher.fetch("http://x/a.json").unwrap(), "{}");
        assert_eq!(fetcher.request_count("http://x/a.json"), 2);
        assert_eq!(fetcher.request_count("http://x/b.json"), 0);
    }

    #[test]
    fn test_map_fetcher_missing_is_transport_error() {
        let fetcher = MapFetcher::new();
        let err = fetcher.fetch("http://x/missing.json").unwrap_err();
        assert!(matches!(err, AppError::Transport { ref url, .. } if url == "http://x/missing.json"));
        assert_eq!(fetcher.total_requests(), 1);
    }

    #[test]
    fn test_fetcher_by_reference() {
        fn fetch_twice(f: impl Fetcher) -> AppResult<()> {
            f.fetch("a")?;
            f.fetch("a")?;
            Ok(())
        }

        let fetcher = MapFetcher::new().with("a", "1");
        fetch_twice(&fetcher).unwrap();
        assert_eq!(fetcher.request_count("a"), 2);
    }
}
