//! Title, deprecation, description, values and assertions blocks
//!
//! Except for `deprecated`, these blocks look at the whole reference chain
//! of the node: the first title, every distinct description, the first
//! default and const, the union of enums, the first value of each bound.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaResult;
use crate::markdown::{block, bold, decorate};
use crate::render::context::RenderContext;
use crate::render::i18n::AssertionLabels;
use crate::schema::{traverse_schema_refs, Schema};
use serde_json::{Number, Value};
use std::collections::HashSet;

pub fn render_title(schema: &Schema, context: &RenderContext<'_>) -> SchemaResult<String> {
    let mut title: Option<String> = None;
    traverse_schema_refs(schema, context.resolver(), |node, _| {
        if title.is_none() {
            title = node.title.clone().filter(|title| !title.is_empty());
        }
    })?;

    let is_object = schema.is_type("object") && schema.has_object_structure();

    match title {
        Some(title) if !is_object && !context.suppress_title => Ok(bold(&title)),
        _ => Ok(String::new()),
    }
}

pub fn render_deprecated(schema: &Schema, context: &RenderContext<'_>) -> String {
    if context.suppress_deprecated_warning || !schema.is_deprecated() {
        return String::new();
    }

    let labels = &context.i18n.deprecated;
    format!(
        "{}{{title=\"{}\"}}",
        decorate(&labels.title, &["json-schema-deprecated-title"]),
        labels.message
    )
}

pub fn render_description(schema: &Schema, context: &RenderContext<'_>) -> SchemaResult<String> {
    let mut seen = HashSet::new();
    let mut descriptions = Vec::new();

    traverse_schema_refs(schema, context.resolver(), |node, _| {
        if let Some(description) = node.description.as_deref().filter(|d| !d.is_empty()) {
            if seen.insert(description.to_string()) {
                descriptions.push(description.to_string());
            }
        }
    })?;

    Ok(block(descriptions))
}

/// Literal as shown in value listings: strings raw, everything else as JSON
pub(crate) fn format_literal(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => format_number(number),
        other => other.to_string(),
    }
}

/// Integral floats print without a fraction
pub(crate) fn format_number(number: &Number) -> String {
    match number.as_f64() {
        Some(value) if !number.is_i64() && !number.is_u64() && value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", value as i64)
        }
        _ => number.to_string(),
    }
}

pub fn render_values(schema: &Schema, context: &RenderContext<'_>) -> SchemaResult<String> {
    let mut default: Option<Value> = None;
    let mut constant: Option<Value> = None;
    let mut enum_values: Vec<Value> = Vec::new();
    let mut enum_keys: HashSet<String> = HashSet::new();

    traverse_schema_refs(schema, context.resolver(), |node, _| {
        if default.is_none() {
            default = node.default.clone();
        }
        if constant.is_none() {
            constant = node.const_value.clone();
        }
        for value in node.enum_values.iter().flatten() {
            if enum_keys.insert(value.to_string()) {
                enum_values.push(value.clone());
            }
        }
    })?;

    let labels = &context.i18n.values;
    let label = |text: &str| decorate(&format!("{text}:"), &["json-schema-value"]);
    let mut parts = Vec::new();

    if let Some(value) = default {
        parts.push(format!("{} `{}`", label(&labels.default), format_literal(&value)));
    }

    if let Some(value) = constant {
        parts.push(format!("{} `{}`", label(&labels.const_value), format_literal(&value)));
    }

    if !enum_values.is_empty() {
        let items = enum_values
            .iter()
            .map(|value| format!("`{}`", format_literal(value)))
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("{} {items}", label(&labels.enum_values)));
    }

    Ok(block(parts))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assertion {
    Minimum,
    Maximum,
    ExclusiveMinimum,
    ExclusiveMaximum,
    MinLength,
    MaxLength,
    Pattern,
    MinItems,
    MaxItems,
    UniqueItems,
    MinProperties,
    MaxProperties,
}

const ASSERTIONS: [Assertion; 12] = [
    Assertion::Minimum,
    Assertion::Maximum,
    Assertion::ExclusiveMinimum,
    Assertion::ExclusiveMaximum,
    Assertion::MinLength,
    Assertion::MaxLength,
    Assertion::Pattern,
    Assertion::MinItems,
    Assertion::MaxItems,
    Assertion::UniqueItems,
    Assertion::MinProperties,
    Assertion::MaxProperties,
];

const ASSERTABLE_TYPES: [&str; 6] = ["string", "number", "integer", "boolean", "array", "object"];

impl Assertion {
    fn types(self) -> &'static [&'static str] {
        match self {
            Self::Minimum | Self::Maximum | Self::ExclusiveMinimum | Self::ExclusiveMaximum => {
                &["number", "integer"]
            }
            Self::MinLength | Self::MaxLength | Self::Pattern => &["string"],
            Self::MinItems | Self::MaxItems | Self::UniqueItems => &["array"],
            Self::MinProperties | Self::MaxProperties => &["object"],
        }
    }

    fn label(self, labels: &AssertionLabels) -> &str {
        match self {
            Self::Minimum => &labels.min_value,
            Self::Maximum => &labels.max_value,
            Self::ExclusiveMinimum => &labels.exclusive_min,
            Self::ExclusiveMaximum => &labels.exclusive_max,
            Self::MinLength => &labels.min_length,
            Self::MaxLength => &labels.max_length,
            Self::Pattern => &labels.pattern,
            Self::MinItems => &labels.min_items,
            Self::MaxItems => &labels.max_items,
            Self::UniqueItems => &labels.unique_items,
            Self::MinProperties => &labels.min_properties,
            Self::MaxProperties => &labels.max_properties,
        }
    }

    fn value(self, schema: &Schema) -> Option<Value> {
        let count = |value: Option<u64>| value.map(Value::from);
        match self {
            Self::Minimum => schema.minimum.clone().map(Value::Number),
            Self::Maximum => schema.maximum.clone().map(Value::Number),
            Self::ExclusiveMinimum => schema.exclusive_minimum.clone(),
            Self::ExclusiveMaximum => schema.exclusive_maximum.clone(),
            Self::MinLength => count(schema.min_length),
            Self::MaxLength => count(schema.max_length),
            Self::Pattern => schema.pattern.clone().map(Value::String),
            Self::MinItems => count(schema.min_items),
            Self::MaxItems => count(schema.max_items),
            Self::UniqueItems => schema.unique_items.map(Value::Bool),
            Self::MinProperties => count(schema.min_properties),
            Self::MaxProperties => count(schema.max_properties),
        }
    }
}

/// Types of a node among those assertions apply to
fn assertable_types(schema: &Schema) -> Vec<String> {
    schema
        .schema_type
        .as_ref()
        .map(|types| {
            types
                .names()
                .into_iter()
                .filter(|name| ASSERTABLE_TYPES.contains(name))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub fn render_assertions(schema: &Schema, context: &RenderContext<'_>) -> SchemaResult<String> {
    let mut collected: Vec<Option<(Value, Vec<String>)>> = vec![None; ASSERTIONS.len()];

    traverse_schema_refs(schema, context.resolver(), |node, _| {
        let types = assertable_types(node);
        for (slot, assertion) in collected.iter_mut().zip(ASSERTIONS) {
            if slot.is_none() {
                *slot = assertion.value(node).map(|value| (value, types.clone()));
            }
        }
    })?;

    let mut parts = Vec::new();
    for (entry, assertion) in collected.into_iter().zip(ASSERTIONS) {
        let Some((value, types)) = entry else { continue };

        if assertion == Assertion::UniqueItems && value != Value::Bool(true) {
            continue;
        }

        if !types.iter().any(|name| assertion.types().contains(&name.as_str())) {
            continue;
        }

        let label = decorate(
            &format!("{}:", assertion.label(&context.i18n.assertions)),
            &["json-schema-assertion"],
        );
        parts.push(format!("{label} `{}`", format_literal(&value)));
    }

    Ok(block(parts))
}
