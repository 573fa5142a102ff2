//! Normalization through the public API

use pretty_assertions::assert_eq;
use schemadoc_core::{normalize, NoRefs, ResolvedRef, Schema, SchemaResult};
use serde_json::{json, Value};

fn normalized(value: Value) -> Value {
    normalize(&Schema::from_value(&value).unwrap(), &NoRefs).unwrap().to_value()
}

#[test]
fn test_nested_properties_are_normalized() {
    assert_eq!(
        normalized(json!({
            "properties": {
                "kind": {"enum": ["single"]},
                "secret": {"type": "string", "x-hidden": true},
                "choice": {"oneOf": [{"oneOf": [{"type": "string"}, {"type": "integer"}]}]}
            }
        })),
        json!({
            "type": "object",
            "properties": {
                "kind": {"const": "single"},
                "choice": {"oneOf": [{"type": "string"}, {"type": "integer"}]}
            }
        })
    );
}

#[test]
fn test_conditional_branches_become_variants() {
    let value = normalized(json!({
        "type": "object",
        "if": {"properties": {"kind": {"const": "a"}}},
        "then": {"properties": {"a": {"type": "string"}}},
        "else": {"type": "string"}
    }));

    assert_eq!(value["oneOf"][0]["type"], "object");
    assert_eq!(value["oneOf"][1]["type"], "string");
    assert!(value.get("if").is_none());
}

#[test]
fn test_deprecated_target_marks_reference() {
    let resolver = |reference: &str| -> SchemaResult<Option<ResolvedRef>> {
        Ok(Some(ResolvedRef {
            label: Some("Legacy".to_string()),
            href: format!("#{}", reference.rsplit('/').next().unwrap_or_default()),
            schema: Schema::from_value(&json!({"type": "object", "deprecated": true}))?,
        }))
    };

    let schema = Schema::from_value(&json!({
        "type": "object",
        "properties": {"legacy": {"$ref": "#/components/schemas/Legacy"}}
    }))
    .unwrap();

    let normalized = normalize(&schema, &resolver).unwrap();
    let property = &normalized.properties.as_ref().unwrap()["legacy"];

    assert!(property.is_deprecated());
    assert!(!normalized.is_deprecated());
}

#[test]
fn test_one_of_with_all_of_is_unsupported() {
    let schema = Schema::from_value(&json!({
        "oneOf": [{"type": "string"}],
        "allOf": [{"type": "string"}]
    }))
    .unwrap();

    assert!(normalize(&schema, &NoRefs).unwrap_err().is_unsupported_input());
}
