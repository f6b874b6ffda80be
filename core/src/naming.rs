#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Derives identifier-safe, collision-free names from free text (schema
//! titles, entry names, routing key segments).
//!
//! Each namespace owns a [`NameScope`]: one global scope for schema types,
//! one per API document for method names, one per exchange document for
//! binding types and one per exchange entry for routing key fields.

use crate::error::{AppError, AppResult};
use crate::schemas::cache::SchemaCache;
use heck::ToPascalCase;
use std::collections::HashSet;

/// Fallback for text that normalizes to nothing.
const UNNAMED: &str = "Unnamed";

/// A set of identifiers already handed out in one namespace.
#[derive(Debug, Clone, Default)]
pub struct NameScope {
    taken: HashSet<String>,
}

impl NameScope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` has been handed out.
    pub fn contains(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Number of names handed out.
    pub fn len(&self) -> usize {
        self.taken.len()
    }

    /// Whether nothing has been handed out yet.
    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }

    /// Reserves `candidate`, or the first free `candidate1`, `candidate2`, ...
    pub fn claim(&mut self, candidate: &str) -> AppResult<String> {
        if self.taken.insert(candidate.to_string()) {
            return Ok(candidate.to_string());
        }
        for suffix in 1..=u32::MAX {
            let name = format!("{}{}", candidate, suffix);
            if self.taken.insert(name.clone()) {
                return Ok(name);
            }
        }
        Err(AppError::NamingExhausted {
            candidate: candidate.to_string(),
        })
    }
}

/// Normalizes free text into a PascalCase identifier.
///
/// Runs of non-alphanumeric characters (including irregular whitespace)
/// separate words; only ASCII letters and digits survive. A leading digit is
/// prefixed with `N`.
///
/// e.g. `"Task  Definition"` -> `TaskDefinition`, `"listArtifacts"` -> `ListArtifacts`
pub fn normalise_identifier(text: &str) -> String {
    let pascal: String = text
        .to_pascal_case()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    match pascal.chars().next() {
        None => UNNAMED.to_string(),
        Some(c) if c.is_ascii_digit() => format!("N{}", pascal),
        Some(_) => pascal,
    }
}

/// Normalizes `text` and claims the result in `scope`.
pub fn normalise(text: &str, scope: &mut NameScope) -> AppResult<String> {
    scope.claim(&normalise_identifier(text))
}

/// Assigns a globally unique type name to every cached schema.
///
/// Schemas are visited in sorted URL order, which makes the assignment
/// independent of the order they were discovered in.
pub fn assign_type_names(cache: &mut SchemaCache) -> AppResult<()> {
    let mut scope = NameScope::new();
    for url in cache.sorted_urls() {
        let Some(record) = cache.get_mut(&url) else {
            continue;
        };
        let name = normalise(&record.naming_hint(), &mut scope)?;
        tracing::debug!(%url, type_name = %name, "assigned type name");
        record.type_name = Some(name);
    }
    Ok(())
}
