#![deny(missing_docs)]

//! # Data Model
//!
//! - **definition**: manifest entries and the meta-schema -> kind mapping.
//! - **document**: API / exchange reference documents and their entries.
//! - **schema**: decoded JSON Schema documents and cache records.

pub mod definition;
pub mod document;
pub mod schema;

pub use definition::{
    parse_manifest, Definition, DefinitionId, DocumentKind, API_REFERENCE_SCHEMA,
    EXCHANGES_REFERENCE_SCHEMA,
};
pub use document::{ApiDocument, ApiEntry, Document, ExchangeDocument, ExchangeEntry, RouteElement};
pub use schema::{SchemaNode, SchemaRecord, SchemaType};
