//! Canonical form of schema nodes
//!
//! Normalization runs before every render: conditionals become `oneOf`
//! variants, trivial combinators collapse, single-value enums turn into
//! constants and deprecation is propagated from variants and reference
//! targets. Applying it twice yields the same node.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use crate::schema::model::{AdditionalProperties, Combinator, Items, Schema, SchemaType};
use crate::schema::traverse::{traverse_schema_refs, RefResolver};
use indexmap::IndexMap;

/// Produce the normalized version of `schema`
///
/// `resolver` is consulted to propagate `deprecated` from the nodes the
/// `$ref` chain leads to.
pub fn normalize(schema: &Schema, resolver: &dyn RefResolver) -> SchemaResult<Schema> {
    let mut normalized = enum_to_const(schema.clone());

    normalized = normalize_conditional(normalized);

    if has_variants(&normalized, Combinator::OneOf) && has_variants(&normalized, Combinator::AllOf) {
        return Err(SchemaError::unsupported_input(
            "a schema node cannot declare both `oneOf` and `allOf`",
        ));
    }

    for combinator in Combinator::ALL {
        normalized = normalize_combinator(normalized, combinator, resolver)?;
    }

    normalized = normalize_nested(normalized, resolver)?;

    if normalized.schema_type.is_none() && normalized.has_object_structure() {
        normalized.schema_type = Some(SchemaType::single("object"));
    }

    if normalized.schema_type.is_none() && normalized.items.is_some() {
        normalized.schema_type = Some(SchemaType::single("array"));
    }

    if !normalized.is_deprecated() && all_variants_deprecated(&normalized) {
        normalized.deprecated = Some(true);
    }

    mark_deprecated_from_refs(normalized, resolver)
}

fn has_variants(schema: &Schema, combinator: Combinator) -> bool {
    schema.combinator(combinator).is_some_and(|variants| !variants.is_empty())
}

fn enum_to_const(mut schema: Schema) -> Schema {
    if schema.const_value.is_some() {
        return schema;
    }

    if let Some(values) = &schema.enum_values {
        if values.len() == 1 {
            schema.const_value = schema.enum_values.take().and_then(|mut values| values.pop());
        }
    }

    schema
}

/// Turn `if`/`then`/`else` into leading `oneOf` variants
///
/// Branches inherit the parent `type` when they declare none. Without any
/// branch the parent loses its `type` along with the conditional.
fn normalize_conditional(mut schema: Schema) -> Schema {
    if schema.if_schema.take().is_none() {
        return schema;
    }

    let branches = [schema.then_schema.take(), schema.else_schema.take()];
    let mut variants: Vec<Schema> = branches
        .into_iter()
        .flatten()
        .map(|branch| {
            let mut branch = *branch;
            if branch.schema_type.is_none() {
                branch.schema_type = schema.schema_type.clone();
            }
            branch
        })
        .collect();

    variants.extend(schema.one_of.take().unwrap_or_default());

    if variants.is_empty() {
        schema.schema_type = None;
        return schema;
    }

    schema.one_of = Some(variants);
    schema
}

/// The combinator is the only keyword besides `type`
fn is_plain_combinator(schema: &Schema, combinator: Combinator) -> bool {
    let keys: Vec<&str> = schema
        .defined_keys()
        .into_iter()
        .filter(|key| *key != "type")
        .collect();

    keys == [combinator.key()]
}

fn normalize_combinator(
    mut schema: Schema,
    combinator: Combinator,
    resolver: &dyn RefResolver,
) -> SchemaResult<Schema> {
    let Some(variants) = schema.combinator_mut(combinator).take() else {
        return Ok(schema);
    };

    let mut flattened = Vec::with_capacity(variants.len());
    for variant in &variants {
        let variant = normalize(variant, resolver)?;

        match variant.combinator(combinator) {
            Some(inner) if !inner.is_empty() && is_plain_combinator(&variant, combinator) => {
                for nested in inner {
                    flattened.push(normalize(nested, resolver)?);
                }
            }
            _ => flattened.push(variant),
        }
    }

    if flattened.is_empty() {
        return Ok(schema);
    }

    let single = flattened.len() == 1;
    *schema.combinator_mut(combinator) = Some(flattened);

    if single && is_plain_combinator(&schema, combinator) {
        let mut only = schema
            .combinator_mut(combinator)
            .take()
            .and_then(|mut variants| variants.pop())
            .unwrap_or_default();
        *only.combinator_mut(combinator) = None;
        return normalize(&only, resolver);
    }

    Ok(schema)
}

fn normalize_map(
    map: Option<IndexMap<String, Schema>>,
    resolver: &dyn RefResolver,
) -> SchemaResult<Option<IndexMap<String, Schema>>> {
    let Some(map) = map else {
        return Ok(None);
    };

    let mut normalized = IndexMap::with_capacity(map.len());
    for (name, value) in map {
        if value.is_hidden() {
            continue;
        }
        normalized.insert(name, normalize(&value, resolver)?);
    }

    Ok(Some(normalized))
}

fn normalize_nested(mut schema: Schema, resolver: &dyn RefResolver) -> SchemaResult<Schema> {
    schema.properties = normalize_map(schema.properties.take(), resolver)?;
    schema.pattern_properties = normalize_map(schema.pattern_properties.take(), resolver)?;

    if let Some(AdditionalProperties::Schema(additional)) = &schema.additional_properties {
        let additional = normalize(additional, resolver)?;
        schema.additional_properties = Some(AdditionalProperties::Schema(Box::new(additional)));
    }

    schema.items = match schema.items.take() {
        Some(Items::Single(item)) => Some(Items::Single(Box::new(normalize(&item, resolver)?))),
        Some(Items::Tuple(items)) => Some(Items::Tuple(
            items
                .iter()
                .map(|item| normalize(item, resolver))
                .collect::<SchemaResult<Vec<_>>>()?,
        )),
        None => None,
    };

    Ok(schema)
}

fn all_variants_deprecated(schema: &Schema) -> bool {
    let mut has_variants = false;

    for combinator in Combinator::ALL {
        let Some(variants) = schema.combinator(combinator).filter(|v| !v.is_empty()) else {
            continue;
        };

        has_variants = true;
        if !variants.iter().all(Schema::is_deprecated) {
            return false;
        }
    }

    has_variants
}

fn mark_deprecated_from_refs(mut schema: Schema, resolver: &dyn RefResolver) -> SchemaResult<Schema> {
    if schema.is_deprecated() {
        return Ok(schema);
    }

    let mut deprecated = false;
    traverse_schema_refs(&schema, resolver, |node, via| {
        if via.is_some() && node.is_deprecated() {
            deprecated = true;
        }
    })?;

    if deprecated {
        schema.deprecated = Some(true);
    }

    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::traverse::{NoRefs, ResolvedRef};
    use serde_json::{json, Value};

    fn norm(value: Value) -> Value {
        normalize(&Schema::from_value(&value).unwrap(), &NoRefs)
            .unwrap()
            .to_value()
    }

    #[test]
    fn test_plain_schema_is_unchanged() {
        let schema = json!({"type": "string", "description": "Plain"});
        assert_eq!(norm(schema.clone()), schema);
    }

    #[test]
    fn test_flattens_plain_nested_one_of() {
        assert_eq!(
            norm(json!({"oneOf": [
                {"oneOf": [{"type": "string"}, {"type": "number"}]},
                {"type": "boolean"}
            ]})),
            json!({"oneOf": [{"type": "string"}, {"type": "number"}, {"type": "boolean"}]})
        );
    }

    #[test]
    fn test_keeps_nested_one_of_with_metadata() {
        let schema = json!({"oneOf": [
            {"description": "Combined", "oneOf": [{"type": "string"}, {"type": "number"}]},
            {"type": "boolean"}
        ]});
        assert_eq!(norm(schema.clone()), schema);
    }

    #[test]
    fn test_single_variant_collapses() {
        assert_eq!(
            norm(json!({"anyOf": [{"type": "integer", "description": "Whole number"}]})),
            json!({"type": "integer", "description": "Whole number"})
        );
    }

    #[test]
    fn test_single_variant_with_siblings_stays() {
        let schema = json!({"description": "Wrapper", "oneOf": [{"type": "string"}]});
        assert_eq!(norm(schema.clone()), schema);
    }

    #[test]
    fn test_empty_combinator_is_dropped() {
        assert_eq!(norm(json!({"type": "string", "anyOf": []})), json!({"type": "string"}));
    }

    #[test]
    fn test_one_of_with_all_of_is_rejected() {
        let schema = Schema::from_value(&json!({
            "oneOf": [{"type": "string"}],
            "allOf": [{"type": "number"}]
        }))
        .unwrap();

        assert!(normalize(&schema, &NoRefs).unwrap_err().is_unsupported_input());
    }

    #[test]
    fn test_conditional_without_type_collapses_to_branch() {
        let normalized = norm(json!({
            "if": {"properties": {"premium": {"const": true}}},
            "then": {"properties": {"maxFeatures": {"const": 100}}}
        }));

        assert_eq!(
            normalized,
            json!({"type": "object", "properties": {"maxFeatures": {"const": 100}}})
        );
    }

    #[test]
    fn test_conditional_branches_inherit_type() {
        let normalized = norm(json!({
            "type": "object",
            "properties": {},
            "if": {"properties": {"country": {"const": "USA"}}},
            "then": {"properties": {"zipCode": {"type": "string"}}},
            "else": {"properties": {"postalCode": {"type": "string"}}},
            "oneOf": [{"type": "string"}]
        }));

        let variants = normalized["oneOf"].as_array().unwrap();
        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0]["type"], json!("object"));
        assert_eq!(variants[1]["properties"]["postalCode"], json!({"type": "string"}));
        assert_eq!(variants[2], json!({"type": "string"}));
        assert!(normalized.get("if").is_none());
    }

    #[test]
    fn test_single_enum_becomes_const() {
        assert_eq!(
            norm(json!({"type": "string", "enum": ["foo"]})),
            json!({"type": "string", "const": "foo"})
        );
        assert_eq!(
            norm(json!({"enum": ["a"], "const": "b"})),
            json!({"enum": ["a"], "const": "b"})
        );
    }

    #[test]
    fn test_hidden_properties_are_dropped() {
        assert_eq!(
            norm(json!({"properties": {
                "visible": {"type": "string"},
                "secret": {"type": "string", "x-hidden": true}
            }})),
            json!({"type": "object", "properties": {"visible": {"type": "string"}}})
        );
    }

    #[test]
    fn test_items_imply_array() {
        assert_eq!(
            norm(json!({"items": {"enum": [1]}})),
            json!({"type": "array", "items": {"const": 1}})
        );
    }

    #[test]
    fn test_deprecated_when_every_variant_is() {
        let all = norm(json!({"oneOf": [
            {"type": "string", "deprecated": true},
            {"type": "number", "deprecated": true}
        ]}));
        let some = norm(json!({"oneOf": [
            {"type": "string", "deprecated": true},
            {"type": "number"}
        ]}));

        assert_eq!(all["deprecated"], json!(true));
        assert!(some.get("deprecated").is_none());
    }

    #[test]
    fn test_deprecated_from_reference_chain() {
        let resolver = |reference: &str| -> SchemaResult<Option<ResolvedRef>> {
            let schema = match reference {
                "#/A" => json!({"$ref": "#/B"}),
                "#/B" => json!({"type": "string", "deprecated": true}),
                _ => return Ok(None),
            };
            Ok(Some(ResolvedRef {
                label: None,
                href: "#entity".to_string(),
                schema: Schema::from_value(&schema)?,
            }))
        };

        let schema = Schema::from_value(&json!({"$ref": "#/A"})).unwrap();
        let normalized = normalize(&schema, &resolver).unwrap();

        assert!(normalized.is_deprecated());
        assert_eq!(normalized.reference.as_deref(), Some("#/A"));
    }

    #[test]
    fn test_is_idempotent_on_conditionals() {
        let once = norm(json!({
            "type": "object",
            "if": {"properties": {"a": {}}},
            "then": {"description": "then"},
            "else": {"oneOf": [{"oneOf": [{"type": "string"}, {"type": "number"}]}]}
        }));

        assert_eq!(norm(once.clone()), once);
    }
}
