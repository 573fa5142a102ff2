//! Placeholder payloads in the style of the older table renderer
//!
//! Unlike [`ExampleGenerator`](super::ExampleGenerator), values here ignore
//! constraints: strings are `"string"`, numbers `0`, booleans `false`. The
//! first `oneOf` variant that yields properties is used for objects.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{Items, RefResolver, Schema};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::VecDeque;

/// Build a sample payload for `schema`
pub fn sample_object(schema: &Schema, resolver: &dyn RefResolver) -> SchemaResult<Value> {
    SampleBuilder { resolver }.object(schema, &[])
}

struct SampleBuilder<'a> {
    resolver: &'a dyn RefResolver,
}

fn infer_type(schema: &Schema) -> Option<&str> {
    if let Some(name) = schema.type_name() {
        return Some(name);
    }

    if schema.properties.is_some() {
        Some("object")
    } else if schema.items.is_some() {
        Some("array")
    } else {
        None
    }
}

fn unsupported_items(schema: &Schema) -> SchemaError {
    SchemaError::unsupported_input(format!(
        "unable to create sample element for {}: only one schema can be passed to items",
        schema.to_value()
    ))
}

impl SampleBuilder<'_> {
    /// Follow `$ref` and fold `allOf` members into one node
    ///
    /// Returns the flattened node with the reference it was reached through.
    fn flatten(&self, schema: &Schema) -> SchemaResult<(Schema, Option<String>)> {
        let mut node = schema.clone();
        let mut via = None;
        let mut followed: Vec<String> = Vec::new();

        while let Some(reference) = node.reference.clone() {
            if followed.contains(&reference) {
                break;
            }
            let Some(resolved) = self.resolver.resolve(&reference)? else {
                break;
            };

            followed.push(reference.clone());
            via = Some(reference);
            let mut target = resolved.schema;
            for (key, value) in node.extensions.iter() {
                target.extensions.entry(key.clone()).or_insert_with(|| value.clone());
            }
            if node.description.is_some() {
                target.description = node.description.clone();
            }
            node = target;
        }

        if let Some(members) = node.all_of.take() {
            for member in &members {
                let (member, _) = self.flatten(member)?;
                merge_into(&mut node, member);
            }
        }

        Ok((node, via))
    }

    /// Picks the node itself when it has a usable shape, else the first such `oneOf` variant
    fn non_null_variant(&self, schema: &Schema) -> SchemaResult<Schema> {
        if let Some(valid) = self.validate(schema)? {
            return Ok(valid);
        }

        let mut queue: VecDeque<Schema> = schema.one_of.iter().flatten().cloned().collect();
        while let Some(variant) = queue.pop_front() {
            if let Some(valid) = self.validate(&variant)? {
                return Ok(valid);
            }
            queue.extend(variant.one_of.iter().flatten().cloned());
        }

        Err(SchemaError::unresolvable_example(&schema.to_value()))
    }

    fn validate(&self, schema: &Schema) -> SchemaResult<Option<Schema>> {
        if !schema.one_of.as_ref().is_some_and(|variants| !variants.is_empty()) {
            return Ok(Some(schema.clone()));
        }

        let (flattened, _) = self.flatten(schema)?;

        if flattened.properties.as_ref().is_some_and(|properties| !properties.is_empty()) {
            let mut valid = schema.clone();
            if let Some(variants) = valid.one_of.take().filter(|variants| !variants.is_empty()) {
                if let Some(extra) = variants.first().and_then(|first| first.properties.clone()) {
                    valid.properties.get_or_insert_with(IndexMap::new).extend(extra);
                }
            }
            return Ok(Some(valid));
        }

        if flattened.one_of.as_ref().is_some_and(|variants| !variants.is_empty()) {
            return Ok(None);
        }

        Ok(Some(schema.clone()))
    }

    fn object(&self, schema: &Schema, callstack: &[String]) -> SchemaResult<Value> {
        if let Some(example) = schema.example.as_ref().filter(|example| truthy(example)) {
            return Ok(example.clone());
        }

        if schema.is_type("array") {
            return match &schema.items {
                Some(Items::Single(item)) => Ok(Value::Array(vec![self.object(item, callstack)?])),
                _ => Err(unsupported_items(schema)),
            };
        }

        let (flattened, via) = self.flatten(schema)?;
        let merged = self.non_null_variant(&flattened)?;
        let (merged, _) = self.flatten(&merged)?;
        let mut result = Map::new();

        let mut down = callstack.to_vec();
        if let Some(reference) = via.filter(|reference| !callstack.contains(reference)) {
            down.push(reference);
        }

        for (name, property) in merged.properties.iter().flatten() {
            if let Some(value) = self.element(property, merged.is_required(name), &down)? {
                result.insert(name.clone(), value);
            }
        }

        Ok(Value::Object(result))
    }

    fn element(&self, property: &Schema, required: bool, callstack: &[String]) -> SchemaResult<Option<Value>> {
        let (value, via) = self.flatten(property)?;

        if let Some(example) = value.example.as_ref().filter(|example| truthy(example)) {
            return Ok(Some(example.clone()));
        }

        if let Some(first) = value.enum_values.as_ref().and_then(|values| values.first()) {
            return Ok(Some(first.clone()));
        }

        if let Some(default) = &value.default {
            return Ok(Some(default.clone()));
        }

        // A reference already on the path stops the walk; required keys stay as null
        let was_visited = via.as_ref().is_some_and(|reference| callstack.contains(reference));
        if was_visited {
            return Ok(required.then_some(Value::Null));
        }

        let mut down = callstack.to_vec();
        if let Some(reference) = via {
            down.push(reference);
        }

        if value.one_of.as_ref().is_some_and(|variants| !variants.is_empty()) {
            let chosen = self.non_null_variant(&value)?;
            return self.element(&chosen, required, &down);
        }

        let schema = self.non_null_variant(&value)?;

        match infer_type(&value) {
            Some("object") => return self.object(&schema, &down).map(Some),
            Some("array") => {
                let Some(Items::Single(item)) = &schema.items else {
                    return Err(unsupported_items(&schema));
                };

                if let Some(variants) = &item.one_of {
                    let items = variants
                        .iter()
                        .map(|variant| self.element(variant, required, &down))
                        .collect::<SchemaResult<Vec<_>>>()?;
                    return Ok(Some(Value::Array(
                        items.into_iter().map(|item| item.unwrap_or(Value::Null)).collect(),
                    )));
                }

                let item = self.element(item, required, &down)?.unwrap_or(Value::Null);
                return Ok(Some(Value::Array(vec![item])));
            }
            Some("string") => {
                return Ok(Some(match schema.format.as_deref() {
                    Some("uuid") => Value::from("c3073b9d-edd0-49f2-a28d-b7ded8ff9a8b"),
                    Some("date-time") => Value::from("2022-12-29T18:02:01Z"),
                    Some("binary") => Value::Null,
                    _ => Value::from("string"),
                }))
            }
            Some("number") | Some("integer") => return Ok(Some(Value::from(0))),
            Some("boolean") => return Ok(Some(Value::Bool(false))),
            _ => {}
        }

        if schema.properties.is_some() {
            return self.object(&schema, &down).map(Some);
        }

        Ok(None)
    }
}

/// Falsy literals (`false`, `0`, `""`, `null`) do not count as examples
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Fold an `allOf` member into the node it belongs to
fn merge_into(node: &mut Schema, member: Schema) {
    if let Some(properties) = member.properties {
        node.properties.get_or_insert_with(IndexMap::new).extend(properties);
    }
    if let Some(required) = member.required {
        let list = node.required.get_or_insert_with(Vec::new);
        for name in required {
            if !list.contains(&name) {
                list.push(name);
            }
        }
    }
    if node.schema_type.is_none() {
        node.schema_type = member.schema_type;
    }
    if node.one_of.is_none() {
        node.one_of = member.one_of;
    }
    if node.items.is_none() {
        node.items = member.items;
    }
    if node.format.is_none() {
        node.format = member.format;
    }
    if node.example.is_none() {
        node.example = member.example;
    }
}
