//! Reference inlining with a definitions table
//!
//! Bare references (`{"$ref": ...}` and nothing else) are replaced by their
//! target. A reference carrying sibling keys, or one met again while its
//! target is still being expanded, becomes a pointer into `$defs` and its
//! target is expanded once into the definitions table.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaResult;
use crate::refs::resolver::ReferenceResolver;
use crate::refs::source::DocumentSource;
use crate::refs::{is_empty_reference, is_reference, split_reference};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::trace;

/// Result of [`ReferenceResolver::merge`]
#[derive(Debug, Clone, PartialEq)]
pub struct MergedSchema {
    pub schema: Value,
    /// Keyed by the canonical reference of each extracted target
    pub definitions: Map<String, Value>,
}

impl MergedSchema {
    /// Merged schema with the definitions attached under `$defs` when there are any
    pub fn into_value(self) -> Value {
        let MergedSchema {
            mut schema,
            definitions,
        } = self;

        if !definitions.is_empty() {
            if let Value::Object(map) = &mut schema {
                map.insert("$defs".to_string(), Value::Object(definitions));
            }
        }

        schema
    }
}

/// Merge `schema`, looking reference targets up with `get`
pub fn merge_schema(schema: &Value, get: &dyn Fn(&str) -> SchemaResult<Value>) -> SchemaResult<MergedSchema> {
    let mut merger = Merger {
        get,
        definitions: Map::new(),
    };

    let schema = merger.merge(schema.clone(), &HashSet::new(), &HashSet::new())?;
    Ok(MergedSchema {
        schema,
        definitions: merger.definitions,
    })
}

struct Merger<'a> {
    get: &'a dyn Fn(&str) -> SchemaResult<Value>,
    definitions: Map<String, Value>,
}

impl Merger<'_> {
    fn merge(
        &mut self,
        mut schema: Value,
        processing: &HashSet<String>,
        skipped: &HashSet<String>,
    ) -> SchemaResult<Value> {
        // Each branch sees its own copy so sibling subtrees inline independently
        let mut processing = processing.clone();
        let mut skipped = skipped.clone();

        while is_empty_reference(&schema) {
            let reference = reference_of(&schema);
            if !skipped.insert(reference.clone()) {
                break;
            }
            schema = (self.get)(&reference)?;
        }

        if is_reference(&schema) {
            let reference = reference_of(&schema);
            let pointer = definition_pointer(&reference);

            if self.definitions.contains_key(&reference) {
                return Ok(with_reference(schema, pointer));
            }

            if processing.contains(&reference) {
                trace!(reference = %reference, "Reference cycle, emitting definition pointer");
                self.definitions
                    .insert(reference.clone(), pointer_value(&pointer));
                return Ok(with_reference(schema, pointer));
            }

            processing.insert(reference.clone());
            let target = (self.get)(&reference)?;
            let expanded = self.merge(target, &processing, &skipped)?;
            trace!(reference = %reference, "Extracted definition");
            self.definitions.insert(reference.clone(), expanded);
            processing.remove(&reference);

            return Ok(with_reference(schema, pointer));
        }

        match schema {
            Value::Array(items) => items
                .into_iter()
                .map(|item| self.merge(item, &processing, &skipped))
                .collect::<SchemaResult<Vec<_>>>()
                .map(Value::Array),
            Value::Object(map) => {
                let mut merged = Map::with_capacity(map.len());
                for (key, value) in map {
                    let value = self.merge(value, &processing, &skipped)?;
                    merged.insert(key, value);
                }
                Ok(Value::Object(merged))
            }
            other => Ok(other),
        }
    }
}

fn reference_of(schema: &Value) -> String {
    schema
        .get("$ref")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn definition_pointer(reference: &str) -> String {
    let (_, anchor) = split_reference(reference);
    format!("#/$defs{anchor}")
}

fn pointer_value(pointer: &str) -> Value {
    let mut map = Map::new();
    map.insert("$ref".to_string(), Value::String(pointer.to_string()));
    Value::Object(map)
}

fn with_reference(mut schema: Value, pointer: String) -> Value {
    if let Value::Object(map) = &mut schema {
        map.insert("$ref".to_string(), Value::String(pointer));
    }
    schema
}

impl<S: DocumentSource> ReferenceResolver<S> {
    /// Inline the reference graph of `schema` against the loaded documents
    pub fn merge(&self, schema: &Value) -> SchemaResult<MergedSchema> {
        merge_schema(schema, &|reference| self.get(reference).cloned())
    }

    /// Like [`ReferenceResolver::merge`] with definitions under `$defs`
    pub fn merge_schema(&self, schema: &Value) -> SchemaResult<Value> {
        self.merge(schema).map(MergedSchema::into_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    fn merge_with(schema: Value, targets: &[(&str, Value)]) -> MergedSchema {
        let targets: HashMap<String, Value> = targets
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();

        merge_schema(&schema, &|reference| {
            targets
                .get(reference)
                .cloned()
                .ok_or_else(|| SchemaError::unknown_reference(reference, reference))
        })
        .unwrap()
    }

    fn user() -> Value {
        json!({"type": "object", "properties": {"name": {"type": "string"}}})
    }

    #[test]
    fn test_plain_schema_is_unchanged() {
        let schema = json!({"type": "string", "description": "Simple string"});
        let merged = merge_with(schema.clone(), &[]);

        assert_eq!(merged.schema, schema);
        assert!(merged.definitions.is_empty());
    }

    #[test]
    fn test_repeated_bare_references_are_inlined() {
        let merged = merge_with(
            json!({"type": "object", "properties": {
                "author": {"$ref": "#/components/schemas/User"},
                "editor": {"$ref": "#/components/schemas/User"}
            }}),
            &[("#/components/schemas/User", user())],
        );

        assert_eq!(merged.schema["properties"]["author"], user());
        assert_eq!(merged.schema["properties"]["editor"], user());
        assert!(merged.definitions.is_empty());
    }

    #[test]
    fn test_reference_with_siblings_becomes_definition() {
        let merged = merge_with(
            json!({"items": {"$ref": "#/components/schemas/User", "description": "Owner"}}),
            &[("#/components/schemas/User", user())],
        );

        assert_eq!(
            merged.schema,
            json!({"items": {"$ref": "#/$defs/components/schemas/User", "description": "Owner"}})
        );
        assert_eq!(merged.definitions["#/components/schemas/User"], user());
    }

    #[test]
    fn test_self_cycle() {
        let user = json!({"type": "object", "properties": {
            "name": {"type": "string"},
            "friend": {"$ref": "#/components/schemas/User"}
        }});
        let merged = merge_with(user.clone(), &[("#/components/schemas/User", user)]);

        let pointer = json!({"$ref": "#/$defs/components/schemas/User"});
        let inner = json!({"type": "object", "properties": {
            "name": {"type": "string"},
            "friend": pointer
        }});

        assert_eq!(merged.schema["properties"]["friend"], inner);
        assert_eq!(merged.definitions["#/components/schemas/User"], inner);
    }

    #[test]
    fn test_empty_reference_chain_collapses() {
        let merged = merge_with(
            json!({"$ref": "#/components/schemas/Intermediate"}),
            &[
                ("#/components/schemas/Intermediate", json!({"$ref": "#/components/schemas/Final"})),
                ("#/components/schemas/Final", json!({"type": "string"})),
            ],
        );

        assert_eq!(merged.clone().into_value(), json!({"type": "string"}));
        assert!(merged.definitions.is_empty());
    }

    #[test]
    fn test_mutual_empty_references() {
        let ref1 = json!({"$ref": "#/components/schemas/Ref2"});
        let ref2 = json!({"$ref": "#/components/schemas/Ref1"});
        let merged = merge_with(
            ref1.clone(),
            &[("#/components/schemas/Ref1", ref1), ("#/components/schemas/Ref2", ref2)],
        );

        assert_eq!(merged.schema, json!({"$ref": "#/$defs/components/schemas/Ref2"}));

        let keys: Vec<&String> = merged.definitions.keys().collect();
        assert_eq!(keys, vec!["#/components/schemas/Ref2", "#/components/schemas/Ref1"]);
        assert_eq!(
            merged.definitions["#/components/schemas/Ref2"],
            json!({"$ref": "#/$defs/components/schemas/Ref1"})
        );
        assert_eq!(
            merged.definitions["#/components/schemas/Ref1"],
            json!({"$ref": "#/$defs/components/schemas/Ref2"})
        );
    }

    #[test]
    fn test_into_value_attaches_defs() {
        let merged = MergedSchema {
            schema: json!({"type": "object", "x-vendor": true}),
            definitions: json!({"#/a": {"type": "string"}}).as_object().cloned().unwrap(),
        };

        assert_eq!(
            merged.into_value(),
            json!({"type": "object", "x-vendor": true, "$defs": {"#/a": {"type": "string"}}})
        );
    }

    #[test]
    fn test_missing_target_propagates() {
        let error = merge_schema(&json!({"$ref": "#/nope"}), &|reference| {
            Err(SchemaError::unknown_reference(reference, "nope"))
        })
        .unwrap_err();

        assert!(error.is_unknown_target());
    }
}
