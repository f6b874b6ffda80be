#![deny(missing_docs)]

//! # Manifest Definitions
//!
//! A manifest is a JSON array of definitions, each pointing at one
//! API-reference or exchange-reference document.

use crate::error::{AppError, AppResult};
use crate::model::document::Document;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Meta-schema URL declared by API-reference documents.
pub const API_REFERENCE_SCHEMA: &str = "http://schemas.taskcluster.net/base/v1/api-reference.json";

/// Meta-schema URL declared by exchange-reference documents.
pub const EXCHANGES_REFERENCE_SCHEMA: &str =
    "http://schemas.taskcluster.net/base/v1/exchanges-reference.json";

/// Non-owning link from a document or entry to its owning definition.
///
/// It is the definition's position in [`crate::LoadedApis::definitions`],
/// which is sorted by definition URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DefinitionId(pub usize);

impl fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which structural model a document decodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentKind {
    /// REST API reference.
    Api,
    /// Publish/subscribe exchange reference.
    Exchange,
}

impl DocumentKind {
    /// Maps a definition's meta-schema URL to a document kind.
    ///
    /// A trailing `#` on the meta-schema URL is tolerated. Anything else
    /// unknown is returned as `None`.
    pub fn from_schema_url(schema_url: &str) -> Option<Self> {
        match schema_url.trim_end_matches('#') {
            API_REFERENCE_SCHEMA => Some(DocumentKind::Api),
            EXCHANGES_REFERENCE_SCHEMA => Some(DocumentKind::Exchange),
            _ => None,
        }
    }
}

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// Location of the API or exchange reference document.
    pub url: String,
    /// Meta-schema URL selecting the document kind.
    #[serde(rename = "schema")]
    pub schema_url: String,
    /// Name of the generated API / exchange type.
    pub name: String,
    /// Root of the human-readable documentation.
    #[serde(rename = "docroot", default)]
    pub doc_root: String,
    /// The decoded document, attached during load.
    #[serde(skip)]
    pub document: Option<Document>,
}

impl Definition {
    /// Resolves the declared meta-schema URL into a document kind.
    pub fn kind(&self) -> AppResult<DocumentKind> {
        DocumentKind::from_schema_url(&self.schema_url).ok_or_else(|| {
            AppError::UnsupportedDocument {
                definition: self.url.clone(),
                schema_url: self.schema_url.clone(),
            }
        })
    }

    /// Documentation link for an entry of this definition, e.g.
    /// `https://docs.example.com/queue/api-docs/#createTask`.
    pub fn entry_doc_link(&self, entry_name: &str) -> String {
        format!("{}/#{}", self.doc_root.trim_end_matches('/'), entry_name)
    }
}

/// Decodes a manifest body.
pub fn parse_manifest(location: &str, body: &str) -> AppResult<Vec<Definition>> {
    serde_json::from_str(body).map_err(|e| AppError::decode(location, e))
}
