#![deny(missing_docs)]

//! # Schema Handling
//!
//! - **cache**: canonical URL keyed store of resolved schemas.
//! - **resolver**: fetch-once recursive resolution of schema documents.
//! - **patch**: declarative corrections applied after resolution.

pub mod cache;
pub mod patch;
pub mod resolver;

pub use cache::{canonical_url, document_location, SchemaCache};
pub use patch::{apply_patches, builtin_patches, parse_patches, SchemaPatch};
pub use resolver::Resolver;
