//! # Model Dump
//!
//! Human-readable static dump of a finished load: every definition's
//! document, then every schema in sorted URL order. Written next to the
//! generated bindings for reference; nothing reads it back.

use crate::model::{
    ApiDocument, ApiEntry, Document, ExchangeDocument, ExchangeEntry, RouteElement, SchemaNode,
    SchemaRecord,
};
use crate::registry::LoadedApis;
use std::fmt::{self, Display, Formatter};

const PREAMBLE: &str = "Static dump of the API models loaded during code generation.\n\
                        For reference only; no generated code depends on it.\n";

/// Renders the dump of `apis`.
pub fn model_data(apis: &LoadedApis) -> String {
    ModelDump(apis).to_string()
}

/// Display adapter for a whole load.
pub struct ModelDump<'a>(pub &'a LoadedApis);

impl Display for ModelDump<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", PREAMBLE)?;
        for definition in &self.0.definitions {
            underline(f, &definition.url)?;
            if let Some(document) = &definition.document {
                write!(f, "{}", document)?;
            }
            write!(f, "\n\n")?;
        }
        for record in self.0.sorted_schemas() {
            underline(f, &record.source_url)?;
            write!(f, "{}\n\n", record)?;
        }
        Ok(())
    }
}

fn underline(f: &mut Formatter<'_>, text: &str) -> fmt::Result {
    writeln!(f, "{}", text)?;
    writeln!(f, "{}", "=".repeat(text.chars().count()))
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Document::Api(api) => Display::fmt(api, f),
            Document::Exchange(exchange) => Display::fmt(exchange, f),
        }
    }
}

impl Display for ApiDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Version     = '{}'", self.version)?;
        writeln!(f, "Title       = '{}'", self.title)?;
        writeln!(f, "Description = '{}'", self.description)?;
        writeln!(f, "Base URL    = '{}'", self.base_url)?;
        for (i, entry) in self.entries.iter().enumerate() {
            write!(f, "Entry {:<6}= \n{}", i, entry)?;
        }
        Ok(())
    }
}

impl Display for ApiEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "    Entry Type        = '{}'", self.entry_type)?;
        writeln!(f, "    Entry Method      = '{}'", self.http_method)?;
        writeln!(f, "    Entry Route       = '{}'", self.route)?;
        writeln!(f, "    Entry Args        = '{:?}'", self.positional_args)?;
        writeln!(f, "    Entry Name        = '{}'", self.name)?;
        writeln!(f, "    Entry Method Name = '{}'", self.method_name)?;
        writeln!(f, "    Entry Scopes      = '{:?}'", self.required_scopes)?;
        writeln!(f, "    Entry Input       = '{}'", opt(&self.input_schema))?;
        writeln!(f, "    Entry Output      = '{}'", opt(&self.output_schema))?;
        writeln!(f, "    Entry Title       = '{}'", self.title)?;
        writeln!(f, "    Entry Description = '{}'", self.description)
    }
}

impl Display for ExchangeDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Version         = '{}'", self.version)?;
        writeln!(f, "Title           = '{}'", self.title)?;
        writeln!(f, "Description     = '{}'", self.description)?;
        writeln!(f, "Exchange Prefix = '{}'", self.exchange_prefix)?;
        for (i, entry) in self.entries.iter().enumerate() {
            write!(f, "Entry {:<6}= \n{}", i, entry)?;
        }
        Ok(())
    }
}

impl Display for ExchangeEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "    Entry Type        = '{}'", self.entry_type)?;
        writeln!(f, "    Entry Exchange    = '{}'", self.exchange_suffix)?;
        writeln!(f, "    Entry Name        = '{}'", self.name)?;
        writeln!(f, "    Entry Type Name   = '{}'", self.type_name)?;
        writeln!(f, "    Entry Title       = '{}'", self.title)?;
        writeln!(f, "    Entry Description = '{}'", self.description)?;
        for (i, element) in self.routing_key.iter().enumerate() {
            write!(f, "    Routing Key Element {:<6}= \n{}", i, element)?;
        }
        writeln!(f, "    Entry Schema      = '{}'", opt(&self.schema))
    }
}

impl Display for RouteElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "        Element Name      = '{}'", self.name)?;
        writeln!(f, "        Element Field     = '{}'", self.field_name)?;
        writeln!(f, "        Element Summary   = '{}'", self.summary)?;
        writeln!(f, "        Element Constant  = '{}'", opt(&self.constant))?;
        writeln!(f, "        Element M Words   = '{}'", self.multiple_words)?;
        writeln!(f, "        Element Required  = '{}'", self.required)
    }
}

impl Display for SchemaRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Source URL    = '{}'", self.source_url)?;
        writeln!(f, "Type Name     = '{}'", opt(&self.type_name))?;
        writeln!(f, "Input Schema  = '{}'", self.is_input_schema)?;
        writeln!(f, "Output Schema = '{}'", self.is_output_schema)?;
        write_node(f, &self.root, 0)
    }
}

fn write_node(f: &mut Formatter<'_>, node: &SchemaNode, depth: usize) -> fmt::Result {
    let pad = "    ".repeat(depth);
    if let Some(title) = &node.title {
        writeln!(f, "{}Title         = '{}'", pad, title)?;
    }
    if let Some(description) = &node.description {
        writeln!(f, "{}Description   = '{}'", pad, description)?;
    }
    if let Some(schema_type) = &node.schema_type {
        writeln!(f, "{}Type          = '{}'", pad, schema_type)?;
    }
    if let Some(format) = &node.format {
        writeln!(f, "{}Format        = '{}'", pad, format)?;
    }
    if let Some(reference) = &node.reference {
        writeln!(f, "{}Reference     = '{}'", pad, reference)?;
    }
    if !node.required.is_empty() {
        writeln!(f, "{}Required      = '{:?}'", pad, node.required)?;
    }
    if let Some(values) = &node.enum_values {
        let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        writeln!(f, "{}Enum          = '{}'", pad, values.join(", "))?;
    }
    if let Some(props) = &node.properties {
        for (name, child) in props {
            writeln!(f, "{}Property '{}' =", pad, name)?;
            write_node(f, child, depth + 1)?;
        }
    }
    if let Some(items) = &node.items {
        writeln!(f, "{}Items =", pad)?;
        write_node(f, items, depth + 1)?;
    }
    Ok(())
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}
