#![deny(missing_docs)]

//! # Names Command
//!
//! Prints the identifiers a load assigned, as JSON. Useful for reviewing how a
//! manifest change renames generated types before regenerating bindings.

use apigen_core::{Document, DocumentKind, Fetcher, LoadedApis};
use serde::Serialize;

use crate::args::LoadArgs;
use crate::error::CliResult;

/// Arguments for the names command.
#[derive(clap::Args, Debug, Clone)]
pub struct NamesArgs {
    /// Manifest and patch options.
    #[clap(flatten)]
    pub load: LoadArgs,

    /// Emit a single line instead of indented JSON.
    #[clap(long)]
    pub compact: bool,
}

/// Every assigned identifier of one load.
#[derive(Debug, Serialize, PartialEq)]
pub struct NamesReport {
    /// Schemas in sorted URL order.
    pub schemas: Vec<SchemaNames>,
    /// Definitions in load order.
    pub definitions: Vec<DefinitionNames>,
}

/// Type name and payload flags of one schema.
#[derive(Debug, Serialize, PartialEq)]
pub struct SchemaNames {
    /// Canonical schema URL.
    pub url: String,
    /// Assigned type identifier.
    pub type_name: String,
    /// Request payload of some API entry.
    pub input: bool,
    /// Response payload of some API entry.
    pub output: bool,
}

/// Identifiers assigned within one definition.
#[derive(Debug, Serialize, PartialEq)]
pub struct DefinitionNames {
    /// Location of the reference document.
    pub url: String,
    /// Manifest name of the API or exchange type.
    pub name: String,
    /// API or exchange.
    pub kind: DocumentKind,
    /// Entry name to method name, API documents only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<(String, String)>,
    /// Binding names, exchange documents only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<BindingNames>,
}

/// Identifiers of one exchange entry.
#[derive(Debug, Serialize, PartialEq)]
pub struct BindingNames {
    /// Entry name as declared.
    pub entry: String,
    /// Binding type identifier, unique within the document.
    pub type_name: String,
    /// Fully qualified exchange name.
    pub exchange: String,
    /// Routing key field identifiers, in key order.
    pub routing_key_fields: Vec<String>,
}

/// Collects the report from a finished load.
pub fn build_report(loaded: &LoadedApis) -> NamesReport {
    let schemas = loaded
        .sorted_schemas()
        .map(|record| SchemaNames {
            url: record.source_url.clone(),
            type_name: record.type_name.clone().unwrap_or_default(),
            input: record.is_input_schema,
            output: record.is_output_schema,
        })
        .collect();

    let definitions = loaded
        .definitions
        .iter()
        .filter_map(|definition| {
            let document = definition.document.as_ref()?;
            let mut names = DefinitionNames {
                url: definition.url.clone(),
                name: definition.name.clone(),
                kind: document.kind(),
                methods: Vec::new(),
                bindings: Vec::new(),
            };
            match document {
                Document::Api(api) => {
                    names.methods = api
                        .entries
                        .iter()
                        .map(|e| (e.name.clone(), e.method_name.clone()))
                        .collect();
                }
                Document::Exchange(exchange) => {
                    names.bindings = exchange
                        .entries
                        .iter()
                        .map(|e| BindingNames {
                            entry: e.name.clone(),
                            type_name: e.type_name.clone(),
                            exchange: exchange.exchange_name(e),
                            routing_key_fields: e
                                .routing_key
                                .iter()
                                .map(|el| el.field_name.clone())
                                .collect(),
                        })
                        .collect();
                }
            }
            Some(names)
        })
        .collect();

    NamesReport {
        schemas,
        definitions,
    }
}

/// Loads the manifest and prints its names report.
pub fn execute<F: Fetcher>(args: &NamesArgs, fetcher: F) -> CliResult<()> {
    let report = build_report(&args.load.load(fetcher)?);
    let json = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{}", json);
    Ok(())
}
