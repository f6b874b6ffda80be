#![deny(missing_docs)]

//! # Post-load Schema Patches
//!
//! Upstream schemas occasionally ship with defects that would produce broken
//! bindings. Corrections are declared as `(url, path, value)` triples and
//! applied in a single pass once every schema is resolved.
//!
//! A patch whose schema is not part of the load is skipped. A patch whose
//! schema is loaded but whose path no longer exists fails the load, since the
//! upstream document has changed shape and the patch must be revisited.

use crate::error::{AppError, AppResult};
use crate::model::{SchemaNode, SchemaType};
use crate::schemas::cache::{canonical_url, SchemaCache};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One declarative correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaPatch {
    /// Schema URL; need not be canonical.
    pub url: String,
    /// Slash separated path ending in the field to overwrite, e.g.
    /// `/properties/artifacts/items/type`.
    pub path: String,
    /// Replacement value.
    pub value: Value,
}

impl SchemaPatch {
    /// Creates a patch.
    pub fn new(url: impl Into<String>, path: impl Into<String>, value: Value) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
            value,
        }
    }
}

/// Corrections for known upstream defects.
pub fn builtin_patches() -> Vec<SchemaPatch> {
    vec![
        // artifact entries are declared without a type
        SchemaPatch::new(
            "http://schemas.taskcluster.net/queue/v1/list-artifacts-response.json#",
            "/properties/artifacts/items/type",
            Value::String("object".into()),
        ),
    ]
}

/// Decodes a JSON array of patches.
pub fn parse_patches(location: &str, body: &str) -> AppResult<Vec<SchemaPatch>> {
    serde_json::from_str(body).map_err(|e| AppError::decode(location, e))
}

/// Applies `patches` in order and returns how many were applied.
pub fn apply_patches(cache: &mut SchemaCache, patches: &[SchemaPatch]) -> AppResult<usize> {
    let mut applied = 0;
    for patch in patches {
        let url = canonical_url(&patch.url).into_owned();
        let Some(record) = cache.get_mut(&url) else {
            tracing::debug!(%url, "schema not loaded, patch skipped");
            continue;
        };
        let fail = |message: String| AppError::Patch {
            url: url.clone(),
            message,
        };

        let mut segments: Vec<&str> = patch.path.trim_start_matches('/').split('/').collect();
        let field = segments
            .pop()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| fail(format!("empty path '{}'", patch.path)))?;
        let node = walk(&mut record.root, &segments).map_err(fail)?;
        let previous = set_field(node, field, &patch.value).map_err(fail)?;

        tracing::warn!(
            %url,
            path = %patch.path,
            previous = %previous,
            value = %patch.value,
            "patched upstream schema"
        );
        applied += 1;
    }
    Ok(applied)
}

fn walk<'n>(mut node: &'n mut SchemaNode, segments: &[&str]) -> Result<&'n mut SchemaNode, String> {
    let mut iter = segments.iter();
    while let Some(segment) = iter.next() {
        node = match *segment {
            "properties" => {
                let name = iter
                    .next()
                    .ok_or_else(|| "'properties' must be followed by a name".to_string())?;
                node.properties
                    .as_mut()
                    .and_then(|props| props.get_mut(*name))
                    .ok_or_else(|| format!("no property '{}'", name))?
            }
            "items" => node
                .items
                .as_deref_mut()
                .ok_or_else(|| "no 'items' schema".to_string())?,
            other => return Err(format!("unsupported path segment '{}'", other)),
        };
    }
    Ok(node)
}

/// Overwrites `field` and returns the previous value as JSON.
fn set_field(node: &mut SchemaNode, field: &str, value: &Value) -> Result<Value, String> {
    let as_string = || {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| format!("'{}' must be a string", field))
    };
    let previous = match field {
        "type" => {
            let new: SchemaType = serde_json::from_value(value.clone())
                .map_err(|e| format!("invalid type: {}", e))?;
            node.schema_type.replace(new).map(|t| t.to_string())
        }
        "title" => node.title.replace(as_string()?),
        "description" => node.description.replace(as_string()?),
        "format" => node.format.replace(as_string()?),
        other => return Err(format!("field '{}' cannot be patched", other)),
    };
    Ok(previous.map(Value::String).unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SchemaRecord;

    const LIST_ARTIFACTS: &str =
        "http://schemas.taskcluster.net/queue/v1/list-artifacts-response.json#";

    fn cache_with(url: &str, raw: &str) -> SchemaCache {
        let mut cache = SchemaCache::new();
        cache
            .insert(SchemaRecord::new(url, serde_json::from_str(raw).unwrap()))
            .unwrap();
        cache
    }

    fn artifacts_items(cache: &SchemaCache) -> &SchemaNode {
        let root = &cache.get(LIST_ARTIFACTS).unwrap().root;
        root.properties.as_ref().unwrap()["artifacts"]
            .items
            .as_deref()
            .unwrap()
    }

    #[test]
    fn test_builtin_patch_sets_item_type() {
        let mut cache = cache_with(
            LIST_ARTIFACTS,
            r#"{"title": "List Artifacts Response", "properties": {
                "artifacts": {"type": "array", "items": {"properties": {"name": {"type": "string"}}}}
            }}"#,
        );

        let applied = apply_patches(&mut cache, &builtin_patches()).unwrap();

        assert_eq!(applied, 1);
        assert_eq!(
            artifacts_items(&cache).schema_type,
            Some(SchemaType::Single("object".into()))
        );
    }

    #[test]
    fn test_patch_for_unloaded_schema_is_skipped() {
        let mut cache = cache_with("http://s/other.json#", r#"{"title": "Other"}"#);
        assert_eq!(apply_patches(&mut cache, &builtin_patches()).unwrap(), 0);
    }

    #[test]
    fn test_patch_with_stale_path_fails() {
        let mut cache = cache_with(LIST_ARTIFACTS, r#"{"title": "List", "properties": {}}"#);
        let err = apply_patches(&mut cache, &builtin_patches()).unwrap_err();
        match err {
            AppError::Patch { url, message } => {
                assert_eq!(url, LIST_ARTIFACTS);
                assert_eq!(message, "no property 'artifacts'");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_patch_title_without_fragment() {
        let mut cache = cache_with("http://s/a.json#", r#"{"title": "Old"}"#);
        let patch = SchemaPatch::new("http://s/a.json", "/title", Value::String("New".into()));
        apply_patches(&mut cache, &[patch]).unwrap();
        assert_eq!(cache.get("http://s/a.json").unwrap().title(), Some("New"));
    }

    #[test]
    fn test_unpatchable_field_is_rejected() {
        let mut cache = cache_with("http://s/a.json#", r#"{"title": "A"}"#);
        let patch = SchemaPatch::new("http://s/a.json#", "/required", Value::Null);
        assert!(matches!(
            apply_patches(&mut cache, &[patch]),
            Err(AppError::Patch { .. })
        ));
    }

    #[test]
    fn test_parse_patches() {
        let patches = parse_patches(
            "patches.json",
            r#"[{"url": "http://s/a.json#", "path": "/items/type", "value": "string"}]"#,
        )
        .unwrap();
        assert_eq!(patches[0].path, "/items/type");
        assert_eq!(patches[0].value, Value::String("string".into()));
    }
}
