#![deny(missing_docs)]

//! # Reference Documents
//!
//! Structural models for API-reference and exchange-reference documents.
//!
//! Fields ending up in generated code are decoded as-is. Derived fields
//! (`method_name`, `type_name`, `field_name`) and back-references
//! (`definition`) are never read from the wire; the graph builder fills
//! them in.

use crate::error::{AppError, AppResult};
use crate::model::definition::{DefinitionId, DocumentKind};
use serde::{Deserialize, Serialize};

/// A decoded reference document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Document {
    /// REST API reference.
    Api(ApiDocument),
    /// Publish/subscribe exchange reference.
    Exchange(ExchangeDocument),
}

impl Document {
    /// Decodes `body` into the variant selected by `kind`.
    pub fn decode(kind: DocumentKind, url: &str, body: &str) -> AppResult<Self> {
        let doc = match kind {
            DocumentKind::Api => serde_json::from_str(body).map(Document::Api),
            DocumentKind::Exchange => serde_json::from_str(body).map(Document::Exchange),
        };
        doc.map_err(|e| AppError::decode(url, e))
    }

    /// Which variant this is.
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Api(_) => DocumentKind::Api,
            Document::Exchange(_) => DocumentKind::Exchange,
        }
    }

    /// Declared document title.
    pub fn title(&self) -> &str {
        match self {
            Document::Api(api) => &api.title,
            Document::Exchange(exchange) => &exchange.title,
        }
    }

    /// Owning definition.
    pub fn definition(&self) -> DefinitionId {
        match self {
            Document::Api(api) => api.definition,
            Document::Exchange(exchange) => exchange.definition,
        }
    }

    /// The API variant, if this is one.
    pub fn as_api(&self) -> Option<&ApiDocument> {
        match self {
            Document::Api(api) => Some(api),
            Document::Exchange(_) => None,
        }
    }

    /// The exchange variant, if this is one.
    pub fn as_exchange(&self) -> Option<&ExchangeDocument> {
        match self {
            Document::Exchange(exchange) => Some(exchange),
            Document::Api(_) => None,
        }
    }
}

/// `api-reference.json` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiDocument {
    /// Document version.
    pub version: String,
    /// Human-readable title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Base URL every route is relative to.
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    /// Operations, in declaration order.
    pub entries: Vec<ApiEntry>,
    /// Owning definition.
    #[serde(skip_deserializing)]
    pub definition: DefinitionId,
}

/// One REST operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEntry {
    /// Entry type tag (always `function` in practice).
    #[serde(rename = "type")]
    pub entry_type: String,
    /// HTTP verb.
    #[serde(rename = "method")]
    pub http_method: String,
    /// Route relative to the base URL; `<name>` marks a positional argument.
    pub route: String,
    /// Positional arguments, in call order.
    #[serde(rename = "args")]
    pub positional_args: Vec<String>,
    /// Entry name.
    pub name: String,
    /// Alternative scope sets; any one satisfies the call.
    #[serde(rename = "scopes")]
    pub required_scopes: Vec<Vec<String>>,
    /// Request payload schema URL.
    #[serde(rename = "input", deserialize_with = "non_empty")]
    pub input_schema: Option<String>,
    /// Response payload schema URL.
    #[serde(rename = "output", deserialize_with = "non_empty")]
    pub output_schema: Option<String>,
    /// Short title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Generated method identifier, unique within the document.
    #[serde(skip_deserializing)]
    pub method_name: String,
    /// Owning definition.
    #[serde(skip_deserializing)]
    pub definition: DefinitionId,
}

impl ApiEntry {
    /// Names of the `<placeholder>` segments of the route, in route order.
    pub fn route_placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.route.as_str();
        while let Some(start) = rest.find('<') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('>') else {
                break;
            };
            names.push(&after[..end]);
            rest = &after[end + 1..];
        }
        names
    }
}

/// `exchanges-reference.json` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeDocument {
    /// Document version.
    pub version: String,
    /// Human-readable title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Prefix shared by every exchange in the document.
    #[serde(rename = "exchangePrefix")]
    pub exchange_prefix: String,
    /// Message bindings, in declaration order.
    pub entries: Vec<ExchangeEntry>,
    /// Owning definition.
    #[serde(skip_deserializing)]
    pub definition: DefinitionId,
}

impl ExchangeDocument {
    /// Fully qualified exchange name of `entry`.
    pub fn exchange_name(&self, entry: &ExchangeEntry) -> String {
        format!("{}{}", self.exchange_prefix, entry.exchange_suffix)
    }
}

/// One message binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeEntry {
    /// Entry type tag (always `topic-exchange` in practice).
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Exchange name relative to the document prefix.
    #[serde(rename = "exchange")]
    pub exchange_suffix: String,
    /// Entry name.
    pub name: String,
    /// Short title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Routing key segments, in key order.
    #[serde(rename = "routingKey")]
    pub routing_key: Vec<RouteElement>,
    /// Message payload schema URL.
    #[serde(deserialize_with = "non_empty")]
    pub schema: Option<String>,
    /// Generated binding type identifier, unique within the document.
    #[serde(skip_deserializing)]
    pub type_name: String,
    /// Owning definition.
    #[serde(skip_deserializing)]
    pub definition: DefinitionId,
}

/// One routing key segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteElement {
    /// Segment name.
    pub name: String,
    /// One-line summary.
    pub summary: String,
    /// Literal value, for constant segments.
    #[serde(deserialize_with = "non_empty")]
    pub constant: Option<String>,
    /// Whether the segment may span several dot-separated words.
    #[serde(rename = "multipleWords")]
    pub multiple_words: bool,
    /// Whether the segment must be given.
    pub required: bool,
    /// Generated field identifier, unique within the entry.
    #[serde(skip_deserializing)]
    pub field_name: String,
}

/// Reads an optional string, treating `""` and `null` as absent.
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
