#![deny(missing_docs)]

//! # Schema Model
//!
//! The subset of JSON Schema this loader understands: titles, object
//! properties, array items and `$ref` links to other schema documents.
//! Everything else in a schema document is ignored on decode.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The `type` keyword, which may hold one type or a list of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// e.g. `"object"`
    Single(String),
    /// e.g. `["string", "null"]`
    Multiple(Vec<String>),
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaType::Single(t) => write!(f, "{}", t),
            SchemaType::Multiple(ts) => write!(f, "{}", ts.join("|")),
        }
    }
}

/// One (sub)schema node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Declared title; the root title seeds the generated type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared JSON type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Optional string format (`date-time`, `uri`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Object properties, in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    /// Names of required properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Array item schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    /// Allowed literal values.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
    /// Link to another schema document. Canonical once resolved.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl SchemaNode {
    /// Visits every `$ref` slot in this node and its descendants, depth first,
    /// properties before items.
    pub fn for_each_reference_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        if let Some(reference) = self.reference.as_mut() {
            f(reference);
        }
        if let Some(props) = self.properties.as_mut() {
            for child in props.values_mut() {
                child.for_each_reference_mut(f);
            }
        }
        if let Some(items) = self.items.as_mut() {
            items.for_each_reference_mut(f);
        }
    }

    /// Collects every `$ref` in this node and its descendants, in visit order.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(reference) = self.reference.as_deref() {
            out.push(reference);
        }
        if let Some(props) = &self.properties {
            for child in props.values() {
                child.collect_references(out);
            }
        }
        if let Some(items) = &self.items {
            items.collect_references(out);
        }
    }
}

/// A fetched, decoded and cached schema document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaRecord {
    /// Canonical URL the schema was fetched from (always ends in `#`).
    pub source_url: String,
    /// The decoded root node.
    pub root: SchemaNode,
    /// Set when any API entry uses this schema as its request payload.
    pub is_input_schema: bool,
    /// Set when any API entry uses this schema as its response payload.
    pub is_output_schema: bool,
    /// Globally unique identifier; assigned once every definition is loaded.
    pub type_name: Option<String>,
}

impl SchemaRecord {
    /// Wraps a decoded root node fetched from `source_url`.
    pub fn new(source_url: impl Into<String>, root: SchemaNode) -> Self {
        Self {
            source_url: source_url.into(),
            root,
            is_input_schema: false,
            is_output_schema: false,
            type_name: None,
        }
    }

    /// The declared root title.
    pub fn title(&self) -> Option<&str> {
        self.root.title.as_deref()
    }

    /// Text the type name is derived from: the title, or failing that the
    /// last path segment of the URL without its extension.
    pub fn naming_hint(&self) -> String {
        if let Some(title) = self.title().filter(|t| !t.trim().is_empty()) {
            return title.to_string();
        }
        let path = self.source_url.split('#').next().unwrap_or_default();
        let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or(path);
        segment
            .split_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(segment)
            .to_string()
    }
}
