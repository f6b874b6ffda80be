#![deny(missing_docs)]

//! # Entry Graph Builder
//!
//! Walks the entries of a decoded document in declaration order and:
//! - resolves every schema reference through the cache, rewriting it to its
//!   canonical URL and flagging API payloads as input and/or output,
//! - assigns per-document method / binding names and per-entry routing key
//!   field names,
//! - links documents and entries back to their owning definition.
//!
//! Routes are passed through untouched; `<placeholder>` splicing is left to
//! the emitter.

use crate::error::AppResult;
use crate::fetch::Fetcher;
use crate::model::{ApiDocument, DefinitionId, Document, ExchangeDocument};
use crate::naming::{normalise, NameScope};
use crate::schemas::resolver::Resolver;

/// Role a schema plays for the entry referencing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Input,
    Output,
    Message,
}

/// Links `document` into the graph as the document of definition `id`.
pub fn link_document<F: Fetcher>(
    id: DefinitionId,
    document: &mut Document,
    resolver: &mut Resolver<'_, F>,
) -> AppResult<()> {
    match document {
        Document::Api(api) => link_api(id, api, resolver),
        Document::Exchange(exchange) => link_exchange(id, exchange, resolver),
    }
}

fn link_api<F: Fetcher>(
    id: DefinitionId,
    api: &mut ApiDocument,
    resolver: &mut Resolver<'_, F>,
) -> AppResult<()> {
    api.definition = id;
    let mut methods = NameScope::new();
    for entry in &mut api.entries {
        entry.input_schema = resolve_as(resolver, entry.input_schema.take(), Role::Input)?;
        entry.output_schema = resolve_as(resolver, entry.output_schema.take(), Role::Output)?;
        entry.method_name = normalise(&entry.name, &mut methods)?;
        entry.definition = id;
    }
    Ok(())
}

fn link_exchange<F: Fetcher>(
    id: DefinitionId,
    exchange: &mut ExchangeDocument,
    resolver: &mut Resolver<'_, F>,
) -> AppResult<()> {
    exchange.definition = id;
    let mut bindings = NameScope::new();
    for entry in &mut exchange.entries {
        entry.schema = resolve_as(resolver, entry.schema.take(), Role::Message)?;
        entry.type_name = normalise(&entry.name, &mut bindings)?;

        let mut fields = NameScope::new();
        for element in &mut entry.routing_key {
            element.field_name = normalise(&element.name, &mut fields)?;
        }
        entry.definition = id;
    }
    Ok(())
}

/// Resolves an optional reference and returns its canonical form.
fn resolve_as<F: Fetcher>(
    resolver: &mut Resolver<'_, F>,
    reference: Option<String>,
    role: Role,
) -> AppResult<Option<String>> {
    let Some(reference) = reference else {
        return Ok(None);
    };
    let Some(key) = resolver.resolve(&reference)? else {
        return Ok(None);
    };
    if let Some(record) = resolver.record_mut(&key) {
        match role {
            Role::Input => record.is_input_schema = true,
            Role::Output => record.is_output_schema = true,
            Role::Message => {}
        }
    }
    Ok(Some(key))
}
