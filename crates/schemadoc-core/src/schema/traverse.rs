//! Render-time reference lookup and reference-chain traversal
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaResult;
use crate::schema::model::Schema;
use std::borrow::Cow;
use std::collections::HashSet;

/// Target of a `$ref` as seen by the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRef {
    /// Display label; the last path segment of the reference when absent
    pub label: Option<String>,
    /// Page-relative link target
    pub href: String,
    pub schema: Schema,
}

/// Looks `$ref` strings up while normalizing and rendering
///
/// `Ok(None)` marks a reference that cannot be followed; renderers show it
/// as an unknown type instead of failing.
pub trait RefResolver {
    fn resolve(&self, reference: &str) -> SchemaResult<Option<ResolvedRef>>;
}

/// Resolver that follows nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRefs;

impl RefResolver for NoRefs {
    fn resolve(&self, _reference: &str) -> SchemaResult<Option<ResolvedRef>> {
        Ok(None)
    }
}

impl<F> RefResolver for F
where
    F: Fn(&str) -> SchemaResult<Option<ResolvedRef>>,
{
    fn resolve(&self, reference: &str) -> SchemaResult<Option<ResolvedRef>> {
        self(reference)
    }
}

/// Resolved reference with its label filled in
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRef {
    pub label: String,
    pub href: String,
    pub schema: Schema,
}

/// Resolve the `$ref` of `schema`, if it has one that can be followed
pub fn resolve_ref(schema: &Schema, resolver: &dyn RefResolver) -> SchemaResult<Option<LabeledRef>> {
    let Some(reference) = schema.reference.as_deref() else {
        return Ok(None);
    };

    let Some(resolved) = resolver.resolve(reference)? else {
        return Ok(None);
    };

    if resolved.href.is_empty() {
        return Ok(None);
    }

    let label = resolved
        .label
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| fallback_label(reference));

    Ok(Some(LabeledRef {
        label,
        href: resolved.href,
        schema: resolved.schema,
    }))
}

fn fallback_label(reference: &str) -> String {
    match reference.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => reference.to_string(),
    }
}

/// Visit `schema` and then every node reachable through its `$ref` chain
///
/// Each reference is followed at most once. The visitor receives the
/// reference a node was reached through; `None` for `schema` itself.
pub fn traverse_schema_refs<F>(schema: &Schema, resolver: &dyn RefResolver, mut visitor: F) -> SchemaResult<()>
where
    F: FnMut(&Schema, Option<&str>),
{
    let mut stack: Vec<(Cow<'_, Schema>, Option<String>)> = vec![(Cow::Borrowed(schema), None)];
    let mut seen: HashSet<String> = HashSet::new();

    while let Some((node, via)) = stack.pop() {
        visitor(&node, via.as_deref());

        let Some(reference) = node.reference.as_deref() else {
            continue;
        };

        if !seen.insert(reference.to_string()) {
            continue;
        }

        if let Some(resolved) = resolve_ref(&node, resolver)? {
            stack.push((Cow::Owned(resolved.schema), Some(reference.to_string())));
        }
    }

    Ok(())
}
