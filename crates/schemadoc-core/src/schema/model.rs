//! Typed schema node
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Keys whose values are lists of alternative schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    OneOf,
    AllOf,
    AnyOf,
}

impl Combinator {
    /// All combinators in evaluation order
    pub const ALL: [Combinator; 3] = [Combinator::OneOf, Combinator::AllOf, Combinator::AnyOf];

    /// Schema keyword
    pub fn key(self) -> &'static str {
        match self {
            Combinator::OneOf => "oneOf",
            Combinator::AllOf => "allOf",
            Combinator::AnyOf => "anyOf",
        }
    }
}

/// `type` keyword: a single name or a union of names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    List(Vec<String>),
}

impl SchemaType {
    pub fn single(name: impl Into<String>) -> Self {
        Self::Single(name.into())
    }

    /// Name of a single-valued type
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(name) => Some(name),
            Self::List(_) => None,
        }
    }

    /// Every declared type name
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Single(name) => vec![name.as_str()],
            Self::List(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// `additionalProperties`: a flag or a schema for extra keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<Schema>),
}

/// `items`: one schema for every element, or a fixed tuple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Items {
    Tuple(Vec<Schema>),
    Single(Box<Schema>),
}

/// A JSON Schema / OpenAPI schema node
///
/// Literal fields (`const`, `default`, `example`) keep an explicit `null`
/// as `Some(Value::Null)`. Keys without a typed field are kept in
/// `extensions` so that `x-` vendor keys survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_only: Option<bool>,

    /// Hidden from generated documentation
    #[serde(rename = "x-hidden", default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_properties: Option<IndexMap<String, Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Schema>>,

    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub if_schema: Option<Box<Schema>>,

    #[serde(rename = "then", default, skip_serializing_if = "Option::is_none")]
    pub then_schema: Option<Box<Schema>>,

    #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
    pub else_schema: Option<Box<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    #[serde(
        rename = "const",
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub const_value: Option<Value>,

    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,

    /// Number in JSON Schema 2019+, flag in OpenAPI 3.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,

    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

fn deserialize_some<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

const PRIMITIVE_TYPES: [&str; 5] = ["string", "number", "integer", "boolean", "null"];

impl Schema {
    /// Convert a raw document node into a schema
    ///
    /// Boolean schemas are rejected; the engine only documents object schemas.
    pub fn from_value(value: &Value) -> SchemaResult<Self> {
        Self::from_value_ref(value, "<inline>")
    }

    /// Like [`Schema::from_value`], naming the reference it was read from
    pub fn from_value_ref(value: &Value, reference: &str) -> SchemaResult<Self> {
        match value {
            Value::Bool(flag) => Err(SchemaError::unsupported_input(format!(
                "boolean schema `{flag}` at '{reference}' where an object schema is required"
            ))),
            _ => serde_json::from_value(value.clone()).map_err(|source| SchemaError::InvalidSchema {
                reference: reference.to_string(),
                source,
            }),
        }
    }

    /// Raw JSON form of the node
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Schema with a single `type`
    pub fn typed(name: &str) -> Self {
        Self {
            schema_type: Some(SchemaType::single(name)),
            ..Self::default()
        }
    }

    /// Single-valued `type`, if declared
    pub fn type_name(&self) -> Option<&str> {
        self.schema_type.as_ref().and_then(SchemaType::as_single)
    }

    pub fn is_type(&self, name: &str) -> bool {
        self.type_name() == Some(name)
    }

    pub fn is_primitive(&self) -> bool {
        self.type_name()
            .map(|name| PRIMITIVE_TYPES.contains(&name))
            .unwrap_or(false)
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated == Some(true)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden == Some(true)
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable == Some(true)
    }

    /// Declares `properties`, `additionalProperties` or `patternProperties`
    pub fn has_object_structure(&self) -> bool {
        self.properties.is_some()
            || self.additional_properties.is_some()
            || self.pattern_properties.is_some()
    }

    pub fn combinator(&self, combinator: Combinator) -> Option<&Vec<Schema>> {
        match combinator {
            Combinator::OneOf => self.one_of.as_ref(),
            Combinator::AllOf => self.all_of.as_ref(),
            Combinator::AnyOf => self.any_of.as_ref(),
        }
    }

    pub fn combinator_mut(&mut self, combinator: Combinator) -> &mut Option<Vec<Schema>> {
        match combinator {
            Combinator::OneOf => &mut self.one_of,
            Combinator::AllOf => &mut self.all_of,
            Combinator::AnyOf => &mut self.any_of,
        }
    }

    /// Any combinator with at least one variant
    pub fn has_combinators(&self) -> bool {
        Combinator::ALL
            .iter()
            .any(|combinator| self.combinator(*combinator).is_some_and(|v| !v.is_empty()))
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|required| required.iter().any(|key| key == name))
    }

    /// Keywords set on this node, in declaration order of the struct
    pub fn defined_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        let mut push = |present: bool, key: &'static str| {
            if present {
                keys.push(key);
            }
        };

        push(self.reference.is_some(), "$ref");
        push(self.schema_type.is_some(), "type");
        push(self.title.is_some(), "title");
        push(self.description.is_some(), "description");
        push(self.deprecated.is_some(), "deprecated");
        push(self.nullable.is_some(), "nullable");
        push(self.read_only.is_some(), "readOnly");
        push(self.write_only.is_some(), "writeOnly");
        push(self.hidden.is_some(), "x-hidden");
        push(self.properties.is_some(), "properties");
        push(self.pattern_properties.is_some(), "patternProperties");
        push(self.additional_properties.is_some(), "additionalProperties");
        push(self.one_of.is_some(), "oneOf");
        push(self.all_of.is_some(), "allOf");
        push(self.any_of.is_some(), "anyOf");
        push(self.if_schema.is_some(), "if");
        push(self.then_schema.is_some(), "then");
        push(self.else_schema.is_some(), "else");
        push(self.items.is_some(), "items");
        push(self.required.is_some(), "required");
        push(self.enum_values.is_some(), "enum");
        push(self.const_value.is_some(), "const");
        push(self.default.is_some(), "default");
        push(self.example.is_some(), "example");
        push(self.examples.is_some(), "examples");
        push(self.minimum.is_some(), "minimum");
        push(self.maximum.is_some(), "maximum");
        push(self.exclusive_minimum.is_some(), "exclusiveMinimum");
        push(self.exclusive_maximum.is_some(), "exclusiveMaximum");
        push(self.min_length.is_some(), "minLength");
        push(self.max_length.is_some(), "maxLength");
        push(self.pattern.is_some(), "pattern");
        push(self.format.is_some(), "format");
        push(self.min_items.is_some(), "minItems");
        push(self.max_items.is_some(), "maxItems");
        push(self.unique_items.is_some(), "uniqueItems");
        push(self.min_properties.is_some(), "minProperties");
        push(self.max_properties.is_some(), "maxProperties");

        keys.extend(
            self.extensions
                .keys()
                .map(String::as_str)
                .filter(|key| *key != crate::refs::ORIGIN_KEY),
        );
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_keeps_explicit_null_literals() {
        let schema: Schema =
            serde_json::from_value(json!({"type": "string", "default": null})).unwrap();

        assert_eq!(schema.default, Some(Value::Null));
        assert_eq!(schema.example, None);
        assert!(schema.is_primitive());
    }

    #[test]
    fn test_extensions_round_trip() {
        let raw = json!({
            "type": "object",
            "x-internal-id": 7,
            "properties": {"b": {"type": "string"}, "a": {"type": "integer"}}
        });
        let schema = Schema::from_value(&raw).unwrap();

        assert_eq!(schema.extensions.get("x-internal-id"), Some(&json!(7)));
        let keys: Vec<_> = schema.properties.as_ref().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(schema.to_value(), raw);
    }

    #[test]
    fn test_boolean_schema_is_unsupported() {
        let error = Schema::from_value(&json!(true)).unwrap_err();
        assert!(error.is_unsupported_input());
    }

    #[test]
    fn test_items_and_additional_forms() {
        let schema = Schema::from_value(&json!({
            "items": [{"type": "string"}],
            "additionalProperties": false
        }))
        .unwrap();

        assert!(matches!(schema.items, Some(Items::Tuple(ref list)) if list.len() == 1));
        assert_eq!(
            schema.additional_properties,
            Some(AdditionalProperties::Bool(false))
        );
    }

    #[test]
    fn test_defined_keys_ignore_origin_marker() {
        let schema = Schema::from_value(&json!({
            "oneOf": [{"type": "string"}],
            "x-schemadoc-origin": "./other.yaml"
        }))
        .unwrap();

        assert_eq!(schema.defined_keys(), vec!["oneOf"]);
    }
}
