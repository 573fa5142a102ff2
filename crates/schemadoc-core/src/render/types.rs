//! Type block: type lines, property tables and array types
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaResult;
use crate::markdown::{block, cut, decorate, deprecated, table, unmask_table_content, TableRow};
use crate::render::context::{ContextOverrides, ExpandType, OrderedProperty, RenderContext};
use crate::render::Block;
use crate::schema::{AdditionalProperties, Combinator, Items, Schema, SchemaType};
use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

const PROPERTY_CLASS: &str = "json-schema-property";
const ADDITIONAL_PROPERTY_CLASS: &str = "json-schema-additional-property";
const PATTERN_PROPERTY_CLASS: &str = "json-schema-pattern-property";
const REQUIRED_PROPERTY_CLASS: &str = "json-schema-required";
const DEPRECATED_PROPERTY_CLASS: &str = "json-schema-deprecated";

fn null_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)(^|\W)null(\W|$)").ok())
        .as_ref()
}

fn type_line_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^(\*\*[^\n:]+:\s*)([^\n]+)([\s\S]*)$").ok())
        .as_ref()
}

/// Append `| null` for nullable schemas unless the value already mentions null
fn add_nullable(value: &str, schema: &Schema) -> String {
    let mentions_null = null_pattern().is_some_and(|pattern| pattern.is_match(value));
    if !schema.is_nullable() || mentions_null {
        return value.to_string();
    }

    format!("{value} | null")
}

fn format_type_value(base: &str, schema: &Schema, suffix: &str) -> String {
    add_nullable(&format!("{base}{suffix}"), schema)
}

fn apply_nullable_to_output(output: &str, schema: &Schema) -> String {
    if !schema.is_nullable() {
        return output.to_string();
    }

    match type_line_pattern().and_then(|pattern| pattern.captures(output)) {
        Some(captures) => {
            let prefix = &captures[1];
            let value = add_nullable(captures[2].trim(), schema);
            let rest = &captures[3];
            format!("{prefix}{value}{rest}")
        }
        None => output.to_string(),
    }
}

/// Render the type of `schema`; `suffix` carries array brackets of enclosing arrays
pub fn render_type(schema: Option<&Schema>, context: &RenderContext<'_>, suffix: &str) -> SchemaResult<String> {
    let type_label = &context.i18n.type_label;

    let Some(schema) = schema else {
        return Ok(format!("**{type_label}**: unknown{suffix}"));
    };

    if schema.is_primitive() {
        let base = match (schema.type_name(), &schema.format) {
            (Some("string"), Some(format)) => format!("string&lt;{format}&gt;"),
            (name, _) => name.unwrap_or_default().to_string(),
        };
        return Ok(format!("**{type_label}**: {}", format_type_value(&base, schema, suffix)));
    }

    if schema.reference.is_some() {
        return Ok(match context.resolve_ref(schema)? {
            Some(resolved) => {
                let link = format!("[{}]({})", resolved.label, resolved.href);
                format!("**{type_label}**: {}", format_type_value(&link, schema, suffix))
            }
            None => format!("**{type_label}**: unknown{suffix}"),
        });
    }

    match &schema.schema_type {
        Some(SchemaType::Single(name)) if name == "object" => {
            if !schema.has_object_structure() {
                return Ok(format!("**{type_label}**: {}", format_type_value("object", schema, suffix)));
            }

            let label = match &schema.title {
                Some(title) => add_nullable(title, schema),
                None => format_type_value("object", schema, suffix),
            };
            let label = format!("**{type_label}**: {label}");
            let content = render_object_type(schema, context)?;

            Ok(match context.expand_type {
                ExpandType::Inline if schema.is_nullable() => block([label, content]),
                ExpandType::Inline => content,
                ExpandType::Titled => block([label, content]),
                ExpandType::Collapsed => cut(&content, &label, &[]),
            })
        }
        Some(SchemaType::Single(name)) if name == "array" => render_array_type(schema, context, suffix),
        Some(SchemaType::List(names)) => {
            let joined = names.join(" | ");
            let base = if suffix.is_empty() {
                joined
            } else {
                format!("({joined}){suffix}")
            };
            Ok(format!("**{type_label}**: {}", add_nullable(&base, schema)))
        }
        Some(SchemaType::Single(name)) => {
            Ok(format!("**{type_label}**: {}", format_type_value(name, schema, suffix)))
        }
        None if schema.has_combinators() => Ok(String::new()),
        None => Ok(format!("**{type_label}**: unknown{suffix}")),
    }
}

/// Properties sorted required first, then by name ignoring case
fn default_order(schema: &Schema) -> Vec<OrderedProperty> {
    let Some(properties) = &schema.properties else {
        return Vec::new();
    };

    let mut ordered: Vec<(bool, OrderedProperty)> = properties
        .iter()
        .map(|(name, value)| {
            (
                schema.is_required(name),
                OrderedProperty {
                    name: name.clone(),
                    schema: value.clone(),
                },
            )
        })
        .collect();

    ordered.sort_by(|(a_required, a), (b_required, b)| match (a_required, b_required) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });

    ordered.into_iter().map(|(_, property)| property).collect()
}

fn ordered_properties(schema: &Schema, context: &RenderContext<'_>) -> Vec<OrderedProperty> {
    if let Some(order) = context.order_properties {
        if let Some(ordered) = order(schema).filter(|ordered| !ordered.is_empty()) {
            return ordered;
        }
    }

    default_order(schema)
}

/// Properties table of an object schema
pub fn render_object_type(schema: &Schema, context: &RenderContext<'_>) -> SchemaResult<String> {
    let labels = &context.i18n;
    let property_context = context.derive(ContextOverrides {
        suppress_table_headers: Some(true),
        ..Default::default()
    });
    let mut rows = Vec::new();

    if !context.suppress_table_headers {
        rows.push(TableRow::Raw(format!(
            "|| **{}** | **{}** ||",
            labels.name, labels.description
        )));
    }

    if schema.properties.is_some() {
        for OrderedProperty { name, schema: value } in ordered_properties(schema, context) {
            if value.is_hidden() || !context.is_visible(&value) {
                continue;
            }

            let mut classes = vec![PROPERTY_CLASS];
            if schema.is_required(&name) {
                classes.push(REQUIRED_PROPERTY_CLASS);
            }
            if value.is_deprecated() {
                classes.push(DEPRECATED_PROPERTY_CLASS);
            }

            let mut label = decorate(&name, &classes);
            if value.is_deprecated() {
                label.push_str(&deprecated(true));
            }

            let mut options = property_context.to_options();
            options.suppress_deprecated_warning = value.is_deprecated();

            rows.push(TableRow::cells(label, context.render_nested(&value, options)?));
        }
    }

    if let Some(additional) = &schema.additional_properties {
        let label = decorate(&labels.additional, &[ADDITIONAL_PROPERTY_CLASS]);
        match additional {
            AdditionalProperties::Bool(flag) if !context.suppress_verbose_additional => {
                let kind = if *flag { "any" } else { "never" };
                rows.push(TableRow::cells(label, format!("**{}**: {kind}", labels.type_label)));
            }
            AdditionalProperties::Bool(_) => {}
            AdditionalProperties::Schema(additional) => {
                let rendered = context.render_nested(additional, property_context.to_options())?;
                rows.push(TableRow::cells(label, rendered));
            }
        }
    }

    for (pattern, value) in schema.pattern_properties.iter().flatten() {
        let label = decorate(&format!("/{pattern}/"), &[PATTERN_PROPERTY_CLASS]);
        let rendered = context.render_nested(value, property_context.to_options())?;
        rows.push(TableRow::cells(label, rendered));
    }

    let content = table(&rows, &["json-schema-properties"]);
    Ok(if context.is_root {
        unmask_table_content(&content)
    } else {
        content
    })
}

fn render_array_type(schema: &Schema, context: &RenderContext<'_>, suffix: &str) -> SchemaResult<String> {
    let type_label = &context.i18n.type_label;
    let mut target: Option<&Schema> = Some(schema);
    let mut depth = 0;
    let mut tuple = false;

    while let Some(current) = target.filter(|node| node.is_type("array")) {
        depth += 1;
        match &current.items {
            Some(Items::Tuple(_)) => {
                tuple = true;
                break;
            }
            Some(Items::Single(item)) => target = Some(item),
            None => target = None,
        }
    }

    let suffix = format!("{suffix}{}", "[]".repeat(depth));

    if tuple {
        return Ok(format!("**{type_label}**: {}", format_type_value("unknown", schema, &suffix)));
    }

    let rendered = render_type(target, context, &suffix)?;

    if !rendered.trim().is_empty() {
        return Ok(apply_nullable_to_output(&rendered, schema));
    }

    // Items defined only through combinators: list them inside an `array` disclosure
    let label = format!("**{type_label}**: {}", add_nullable("array", schema));
    let nested = context.derive(ContextOverrides {
        suppress_title: Some(true),
        expand_type: Some(ExpandType::Titled),
        ..Default::default()
    });

    let mut combined = schema.clone();
    combined.schema_type = None;
    combined.example = None;
    combined.examples = None;
    combined.description = None;
    for combinator in Combinator::ALL {
        *combined.combinator_mut(combinator) = target.and_then(|item| item.combinator(combinator)).cloned();
    }

    let mut options = nested.to_options();
    options.blocks = vec![Block::Combinators, Block::Values, Block::Assertions];
    let content = context.render_nested(&combined, options)?;

    Ok(cut(&content, &label, &[]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::context::RenderOptions;
    use serde_json::json;

    fn render(value: serde_json::Value) -> String {
        let schema = Schema::from_value(&value).unwrap();
        let context = RenderContext::new(&RenderOptions::new());
        render_type(Some(&schema), &context, "").unwrap()
    }

    #[test]
    fn test_primitive_with_format() {
        assert_eq!(render(json!({"type": "string", "format": "uuid"})), "**Type**: string&lt;uuid&gt;");
        assert_eq!(render(json!({"type": "integer", "nullable": true})), "**Type**: integer | null");
    }

    #[test]
    fn test_type_list() {
        assert_eq!(render(json!({"type": ["string", "null"], "nullable": true})), "**Type**: string | null");
        assert_eq!(
            render(json!({"type": "array", "items": {"type": ["string", "number"]}})),
            "**Type**: (string | number)[]"
        );
    }

    #[test]
    fn test_nested_arrays() {
        assert_eq!(
            render(json!({"type": "array", "items": {"type": "array", "items": {"type": "string"}}})),
            "**Type**: string[][]"
        );
        assert_eq!(
            render(json!({"type": "array", "nullable": true, "items": {"type": "string"}})),
            "**Type**: string[] | null"
        );
        assert_eq!(render(json!({"type": "array", "items": [{"type": "string"}]})), "**Type**: unknown[]");
        assert_eq!(render(json!({"type": "array"})), "**Type**: unknown[]");
    }

    #[test]
    fn test_unresolved_reference_is_unknown() {
        assert_eq!(render(json!({"$ref": "#/components/schemas/X"})), "**Type**: unknown");
    }

    #[test]
    fn test_object_without_structure() {
        assert_eq!(render(json!({"type": "object"})), "**Type**: object");
        assert_eq!(render(json!({"oneOf": [{"type": "string"}]})), "");
        assert_eq!(render(json!({})), "**Type**: unknown");
    }

    #[test]
    fn test_add_nullable_checks_existing_null() {
        let nullable = Schema {
            nullable: Some(true),
            ..Schema::default()
        };

        assert_eq!(add_nullable("string | NULL", &nullable), "string | NULL");
        assert_eq!(add_nullable("nullish", &nullable), "nullish | null");
    }

    #[test]
    fn test_default_order_puts_required_first() {
        let schema = Schema::from_value(&json!({
            "required": ["zeta"],
            "properties": {"beta": {}, "Alpha": {}, "zeta": {}}
        }))
        .unwrap();

        let names: Vec<String> = default_order(&schema).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["zeta", "Alpha", "beta"]);
    }
}
