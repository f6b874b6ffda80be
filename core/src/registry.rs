#![deny(missing_docs)]

//! # Definition Registry
//!
//! Drives a complete load in two phases:
//!
//! 1. **Discover**: definitions are sorted by URL; each document is fetched,
//!    decoded by kind and linked, which resolves every schema it references.
//! 2. **Name**: post-load patches are applied, then type names are assigned
//!    over the sorted set of schema URLs.
//!
//! All state lives in a [`LoadSession`] that is consumed by the load, so a
//! failed load exposes nothing and independent loads never share a cache.

use crate::error::{AppError, AppResult};
use crate::fetch::Fetcher;
use crate::graph::link_document;
use crate::model::{parse_manifest, Definition, DefinitionId, Document, SchemaRecord};
use crate::naming::assign_type_names;
use crate::schemas::cache::SchemaCache;
use crate::schemas::patch::{apply_patches, builtin_patches, SchemaPatch};
use crate::schemas::resolver::Resolver;
use std::io::Read;

/// Knobs for a load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOptions {
    /// Corrections applied after resolution, in order.
    pub patches: Vec<SchemaPatch>,
}

impl LoadOptions {
    /// Options carrying the built-in upstream corrections.
    pub fn builtin() -> Self {
        Self {
            patches: builtin_patches(),
        }
    }

    /// Appends extra patches.
    pub fn with_patches(mut self, patches: impl IntoIterator<Item = SchemaPatch>) -> Self {
        self.patches.extend(patches);
        self
    }
}

/// The finished graph handed to the emitter.
#[derive(Debug, Clone)]
pub struct LoadedApis {
    /// Definitions sorted by URL, each with its document attached.
    pub definitions: Vec<Definition>,
    /// Every schema URL, sorted lexicographically.
    pub schema_urls: Vec<String>,
    /// Resolved and named schemas.
    pub schemas: SchemaCache,
}

impl LoadedApis {
    /// Follows a back-reference to its definition.
    pub fn definition(&self, id: DefinitionId) -> Option<&Definition> {
        self.definitions.get(id.0)
    }

    /// Looks a schema up by (not necessarily canonical) URL.
    pub fn schema(&self, url: &str) -> Option<&SchemaRecord> {
        self.schemas.get(url)
    }

    /// Schemas in sorted URL order.
    pub fn sorted_schemas(&self) -> impl Iterator<Item = &SchemaRecord> + '_ {
        self.schema_urls.iter().filter_map(|url| self.schemas.get(url))
    }
}

/// State of one load.
pub struct LoadSession<F: Fetcher> {
    fetcher: F,
    cache: SchemaCache,
    options: LoadOptions,
}

impl<F: Fetcher> LoadSession<F> {
    /// Starts a session with the built-in patches.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            cache: SchemaCache::new(),
            options: LoadOptions::builtin(),
        }
    }

    /// Replaces the session options.
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Fetches the manifest at `location` through the session fetcher and loads it.
    pub fn load_remote_manifest(self, location: &str) -> AppResult<LoadedApis> {
        let body = self.fetcher.fetch(location)?;
        self.load_manifest(location, &body)
    }

    /// Loads a manifest read from `reader`; `location` is only used in errors.
    pub fn load_manifest_reader<R: Read>(self, location: &str, mut reader: R) -> AppResult<LoadedApis> {
        let mut body = String::new();
        reader
            .read_to_string(&mut body)
            .map_err(|e| AppError::transport(location, e))?;
        self.load_manifest(location, &body)
    }

    /// Loads a manifest body.
    pub fn load_manifest(self, location: &str, body: &str) -> AppResult<LoadedApis> {
        let definitions = parse_manifest(location, body)?;
        self.load_definitions(definitions)
    }

    /// Loads already decoded definitions.
    pub fn load_definitions(mut self, mut definitions: Vec<Definition>) -> AppResult<LoadedApis> {
        definitions.sort_by(|a, b| a.url.cmp(&b.url));

        for (idx, definition) in definitions.iter_mut().enumerate() {
            let id = DefinitionId(idx);
            tracing::info!(url = %definition.url, name = %definition.name, "loading definition");
            let mut document = fetch_document(&self.fetcher, definition)?;
            let mut resolver = Resolver::new(&self.fetcher, &mut self.cache);
            link_document(id, &mut document, &mut resolver)?;
            definition.document = Some(document);
        }

        apply_patches(&mut self.cache, &self.options.patches)?;
        assign_type_names(&mut self.cache)?;

        let schema_urls = self.cache.sorted_urls();
        tracing::info!(
            definitions = definitions.len(),
            schemas = schema_urls.len(),
            "load complete"
        );
        Ok(LoadedApis {
            definitions,
            schema_urls,
            schemas: self.cache,
        })
    }
}

/// Retrieves a definition's document and decodes it by the definition's kind.
///
/// The kind is checked before any network access.
pub fn fetch_document<F: Fetcher>(fetcher: &F, definition: &Definition) -> AppResult<Document> {
    let kind = definition.kind()?;
    let body = fetcher.fetch(&definition.url)?;
    Document::decode(kind, &definition.url, &body)
}

/// Loads a manifest with the built-in patches.
pub fn load_apis<F: Fetcher, R: Read>(fetcher: F, location: &str, manifest: R) -> AppResult<LoadedApis> {
    LoadSession::new(fetcher).load_manifest_reader(location, manifest)
}
