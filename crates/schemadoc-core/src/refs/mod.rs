//! Reference resolution across documents
//!
//! - [`source`] reads and parses documents
//! - [`resolver`] keeps the document registry and canonicalizes `$ref`s
//! - [`merge`] folds the reference graph of a schema into one self-contained
//!   value with a `$defs` table
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod merge;
pub mod resolver;
pub mod source;

pub use merge::{merge_schema, MergedSchema};
pub use resolver::ReferenceResolver;
pub use source::{parse_document, DocumentSource, Format, FsSource, MemorySource};

use serde_json::Value;

/// Marker naming the document a spliced-in node was read from
///
/// Relative references below a node carrying the marker are resolved
/// against the marked document instead of the enclosing one.
pub const ORIGIN_KEY: &str = "x-schemadoc-origin";

/// Split a reference into its document path and anchor
///
/// The anchor is empty when the reference has no `#`.
pub fn split_reference(reference: &str) -> (&str, &str) {
    match reference.split_once('#') {
        Some((path, anchor)) => (path, anchor),
        None => (reference, ""),
    }
}

/// Object with a string `$ref`
pub fn is_reference(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.get("$ref").is_some_and(Value::is_string))
}

/// Reference with no sibling keys besides the origin marker
pub fn is_empty_reference(value: &Value) -> bool {
    let Some(map) = value.as_object() else {
        return false;
    };

    is_reference(value) && map.keys().all(|key| key == "$ref" || key == ORIGIN_KEY)
}
