#![deny(missing_docs)]

//! # apigen Core
//!
//! Loads API-reference and exchange-reference definitions together with the
//! JSON Schemas they reference, and hands a fully resolved, deterministically
//! named graph to a code emitter.

/// Shared error types.
pub mod error;

/// Retrieval of manifests, documents and schemas.
pub mod fetch;

/// Definitions, documents and schema records.
pub mod model;

/// Schema cache, resolution and post-load patches.
pub mod schemas;

/// Identifier normalization and collision avoidance.
pub mod naming;

/// Entry graph linking.
pub mod graph;

/// Load sessions and the finished graph.
pub mod registry;

/// Static model dump.
pub mod dump;

pub use dump::model_data;
pub use error::{AppError, AppResult};
#[cfg(feature = "client")]
pub use fetch::HttpFetcher;
pub use fetch::{Fetcher, MapFetcher};
pub use model::{
    ApiDocument, ApiEntry, Definition, DefinitionId, Document, DocumentKind, ExchangeDocument,
    ExchangeEntry, RouteElement, SchemaNode, SchemaRecord, SchemaType,
};
pub use naming::{normalise, normalise_identifier, NameScope};
pub use registry::{load_apis, LoadOptions, LoadSession, LoadedApis};
pub use schemas::{SchemaCache, SchemaPatch};
