//! Example synthesis for schemas without explicit examples
//!
//! Generation prefers literal values declared on the schema (`example`,
//! `examples`, `const`, `enum`, `default`), then follows `$ref` and
//! combinators, and finally builds a value from the inferred type and its
//! constraints. Recursion is bounded by [`MAX_DEPTH`] and by a set of
//! references already followed.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod sample;

pub use sample::sample_object;

use crate::error::SchemaResult;
use crate::schema::{traverse_schema_refs, Items, RefResolver, Schema, SchemaType};
use regex::Regex;
use serde_json::{Map, Number, Value};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Deepest nesting level a generated value reaches
pub const MAX_DEPTH: usize = 5;

/// Upper bound for `minItems` copies and `minLength` padding
pub const MAX_GENERATED_LEN: u64 = 1024;

const FORMAT_SAMPLES: [(&str, &str); 10] = [
    ("email", "user@example.com"),
    ("date-time", "2025-01-01T00:00:00Z"),
    ("date", "2025-01-01"),
    ("time", "12:00:00"),
    ("uri", "https://example.com"),
    ("url", "https://example.com"),
    ("hostname", "example.com"),
    ("ipv4", "192.168.0.1"),
    ("ipv6", "2001:db8::1"),
    ("uuid", "123e4567-e89b-12d3-a456-426614174000"),
];

const PATTERN_EXAMPLES: [(&str, &str); 10] = [
    ("^[0-9]{5}$", "12345"),
    ("^[0-9]{5}(-[0-9]{4})?$", "12345-6789"),
    ("^[A-Z]{2}[0-9]{5}$", "AB12345"),
    ("^[a-z]+$", "example"),
    ("^[A-Z]+$", "EXAMPLE"),
    ("^[0-9]+$", "123"),
    ("^[a-zA-Z0-9]+$", "abc123"),
    (r"^\d{4}-\d{2}-\d{2}$", "2025-01-15"),
    ("^#[0-9a-fA-F]{6}$", "#FF5733"),
    (r"^\+?[0-9\s-()]+$", "+7 (555) 123-4567"),
];

const PATTERN_MAX_LENGTH: usize = 10;

struct PatternShapes {
    digits: Regex,
    letters: Regex,
    alphanumeric: Regex,
}

fn pattern_shapes() -> Option<&'static PatternShapes> {
    static SHAPES: OnceLock<Option<PatternShapes>> = OnceLock::new();
    SHAPES
        .get_or_init(|| {
            Some(PatternShapes {
                digits: Regex::new(r"^\^?\\?d?\[0-9\]\{(\d+)\}\$?$").ok()?,
                letters: Regex::new(r"^\^?\[([a-zA-Z]-[a-zA-Z])\]\{(\d+)\}\$?$").ok()?,
                alphanumeric: Regex::new(r"^\^?\[a-zA-Z0-9\]\{(\d+)\}\$?$").ok()?,
            })
        })
        .as_ref()
}

fn format_sample(format: Option<&str>) -> Option<&'static str> {
    let format = format?;
    FORMAT_SAMPLES
        .iter()
        .find(|(name, _)| *name == format)
        .map(|(_, sample)| *sample)
}

/// Sample string for a handful of recognized pattern shapes
pub fn pattern_example(pattern: &str) -> Option<String> {
    if let Some((_, sample)) = PATTERN_EXAMPLES.iter().find(|(known, _)| *known == pattern) {
        return Some((*sample).to_string());
    }

    let shapes = pattern_shapes()?;
    let length = |text: &str| text.parse::<usize>().ok().map(|n| n.min(PATTERN_MAX_LENGTH));

    if let Some(captures) = shapes.digits.captures(pattern) {
        return length(&captures[1]).map(|n| "1".repeat(n));
    }

    if let Some(captures) = shapes.letters.captures(pattern) {
        let letter = if captures[1].contains("A-Z") { "A" } else { "a" };
        return length(&captures[2]).map(|n| letter.repeat(n));
    }

    if let Some(captures) = shapes.alphanumeric.captures(pattern) {
        return length(&captures[1]).map(|n| {
            let mut sample: String = "abc123".chars().take(n).collect();
            while sample.len() < n {
                sample.push('x');
            }
            sample
        });
    }

    None
}

/// Type a value would be generated as
pub fn infer_type(schema: &Schema) -> Option<&str> {
    match &schema.schema_type {
        Some(SchemaType::Single(name)) => return Some(name.as_str()),
        Some(SchemaType::List(names)) if !names.is_empty() => return names.first().map(String::as_str),
        _ => {}
    }

    if schema.has_object_structure() {
        Some("object")
    } else if schema.items.is_some() {
        Some("array")
    } else {
        None
    }
}

/// JSON text with object keys sorted, used to compare examples
fn stable_key(value: &Value) -> String {
    fn sorted(value: &Value) -> Value {
        match value {
            Value::Object(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                let mut result = Map::new();
                for key in keys {
                    result.insert(key.clone(), sorted(&map[key]));
                }
                Value::Object(result)
            }
            Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
            other => other.clone(),
        }
    }

    sorted(value).to_string()
}

#[derive(Default)]
struct Collector {
    list: Vec<Value>,
    keys: HashSet<String>,
}

impl Collector {
    fn add(&mut self, value: &Value) {
        if self.keys.insert(stable_key(value)) {
            self.list.push(value.clone());
        }
    }
}

/// Example synthesis bound to a reference resolver and a visibility mode
pub struct ExampleGenerator<'a> {
    resolver: &'a dyn RefResolver,
    read_only: bool,
    write_only: bool,
}

impl<'a> ExampleGenerator<'a> {
    pub fn new(resolver: &'a dyn RefResolver) -> Self {
        Self {
            resolver,
            read_only: false,
            write_only: false,
        }
    }

    /// Read context: `writeOnly` properties are left out
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Write context: `readOnly` properties are left out
    pub fn write_only(mut self) -> Self {
        self.write_only = true;
        self
    }

    pub fn with_visibility(mut self, read_only: bool, write_only: bool) -> Self {
        self.read_only = read_only;
        self.write_only = write_only;
        self
    }

    /// Explicit examples along the ref chain, or one generated value
    ///
    /// Values are de-duplicated by structure, ignoring key order.
    pub fn collect(&self, schema: &Schema) -> SchemaResult<Vec<Value>> {
        let mut collector = Collector::default();

        traverse_schema_refs(schema, self.resolver, |node, _| {
            if let Some(example) = &node.example {
                collector.add(example);
            }
            for example in node.examples.iter().flatten() {
                collector.add(example);
            }
        })?;

        if collector.list.is_empty() {
            if let Some(generated) = self.generate(schema)? {
                collector.add(&generated);
            }
        }

        Ok(collector.list)
    }

    /// One synthesized value; `None` when nothing can be produced
    pub fn generate(&self, schema: &Schema) -> SchemaResult<Option<Value>> {
        let mut seen = HashSet::new();
        self.generate_at(Some(schema), 0, &mut seen)
    }

    fn is_visible(&self, property: &Schema) -> bool {
        if self.write_only && property.read_only == Some(true) {
            return false;
        }

        !(self.read_only && property.write_only == Some(true))
    }

    fn generate_at(
        &self,
        schema: Option<&Schema>,
        depth: usize,
        seen: &mut HashSet<String>,
    ) -> SchemaResult<Option<Value>> {
        let Some(schema) = schema.filter(|_| depth <= MAX_DEPTH) else {
            return Ok(None);
        };

        if let Some(direct) = pick_direct(schema) {
            return Ok(Some(direct));
        }

        if let Some(reference) = &schema.reference {
            if seen.insert(reference.clone()) {
                if let Some(resolved) = self.resolver.resolve(reference)? {
                    if let Some(value) = self.generate_at(Some(&resolved.schema), depth, seen)? {
                        return Ok(Some(value));
                    }
                }
            }
        }

        if let Some(value) = self.generate_from_combinators(schema, depth, seen)? {
            return Ok(Some(value));
        }

        self.generate_by_type(schema, depth, seen).map(Some)
    }

    fn generate_from_combinators(
        &self,
        schema: &Schema,
        depth: usize,
        seen: &mut HashSet<String>,
    ) -> SchemaResult<Option<Value>> {
        for variant in schema.all_of.iter().flatten() {
            if let Some(value) = self.generate_at(Some(variant), depth + 1, seen)? {
                return Ok(Some(value));
            }
        }

        if let Some(variant) = schema.one_of.as_ref().and_then(|variants| variants.first()) {
            return self.generate_at(Some(variant), depth + 1, seen);
        }

        if let Some(variant) = schema.any_of.as_ref().and_then(|variants| variants.first()) {
            return self.generate_at(Some(variant), depth + 1, seen);
        }

        Ok(None)
    }

    fn generate_by_type(&self, schema: &Schema, depth: usize, seen: &mut HashSet<String>) -> SchemaResult<Value> {
        Ok(match infer_type(schema) {
            Some("string") => Value::String(string_example(schema)),
            Some("integer") => numeric_example(schema, true),
            Some("number") => numeric_example(schema, false),
            Some("boolean") => Value::Bool(true),
            Some("array") => self.array_example(schema, depth, seen)?,
            Some("object") => self.object_example(schema, depth, seen)?,
            _ => Value::Null,
        })
    }

    fn array_example(&self, schema: &Schema, depth: usize, seen: &mut HashSet<String>) -> SchemaResult<Value> {
        let count = schema.min_items.unwrap_or(1).clamp(1, MAX_GENERATED_LEN);
        let item = match &schema.items {
            Some(Items::Single(item)) => Some(item.as_ref()),
            Some(Items::Tuple(items)) => items.first(),
            None => None,
        };
        let base = self.generate_at(item, depth + 1, seen)?.unwrap_or(Value::Null);
        let unique = schema.unique_items == Some(true);

        let items = (0..count)
            .map(|index| if unique { make_unique(&base, index) } else { base.clone() })
            .collect();

        Ok(Value::Array(items))
    }

    fn object_example(&self, schema: &Schema, depth: usize, seen: &mut HashSet<String>) -> SchemaResult<Value> {
        let mut result = Map::new();

        for (name, property) in schema.properties.iter().flatten() {
            if !self.is_visible(property) {
                continue;
            }

            if let Some(value) = self.generate_at(Some(property), depth + 1, seen)? {
                result.insert(name.clone(), value);
            }
        }

        Ok(Value::Object(result))
    }
}

/// Literal value declared on the node itself
fn pick_direct(schema: &Schema) -> Option<Value> {
    let value = schema
        .example
        .clone()
        .or_else(|| schema.examples.as_ref().and_then(|examples| examples.first().cloned()))
        .or_else(|| schema.const_value.clone())
        .or_else(|| schema.enum_values.as_ref().and_then(|values| values.first().cloned()))
        .or_else(|| schema.default.clone())?;

    if !schema.is_type("string") {
        return Some(value);
    }

    Some(match value {
        Value::Number(number) => Value::String(number.to_string()),
        Value::Bool(flag) => Value::String(flag.to_string()),
        other => other,
    })
}

fn string_example(schema: &Schema) -> String {
    let format = format_sample(schema.format.as_deref());
    let mut value = schema
        .pattern
        .as_deref()
        .and_then(pattern_example)
        .or_else(|| format.map(str::to_string))
        .unwrap_or_else(|| "example".to_string());

    let min = schema.min_length.unwrap_or(0).min(MAX_GENERATED_LEN) as usize;
    while value.chars().count() < min {
        value.push('a');
    }

    if let Some(max) = schema.max_length {
        value = value.chars().take(max as usize).collect();
    }

    value
}

fn number_value(value: f64, integer: bool) -> Value {
    if integer {
        return Value::from(value as i64);
    }

    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}

fn numeric_example(schema: &Schema, integer: bool) -> Value {
    if let Some(minimum) = &schema.minimum {
        return Value::Number(minimum.clone());
    }

    if let Some(bound) = schema.exclusive_minimum.as_ref().and_then(Value::as_f64) {
        return if integer {
            number_value(bound.trunc() + 1.0, true)
        } else {
            number_value(bound + 0.1, false)
        };
    }

    if let Some(maximum) = &schema.maximum {
        return Value::Number(maximum.clone());
    }

    if let Some(bound) = schema.exclusive_maximum.as_ref().and_then(Value::as_f64) {
        return if integer {
            number_value(bound.trunc() - 1.0, true)
        } else {
            number_value(bound - 0.1, false)
        };
    }

    if integer {
        Value::from(0)
    } else {
        number_value(0.5, false)
    }
}

/// Perturb the `index`-th copy of an array item so copies differ
fn make_unique(base: &Value, index: u64) -> Value {
    if index == 0 {
        return base.clone();
    }

    match base {
        Value::Number(number) => match (number.as_i64(), number.as_f64()) {
            (Some(value), _) => Value::from(value.saturating_add(index as i64)),
            (None, Some(value)) => number_value(value + index as f64, false),
            _ => base.clone(),
        },
        Value::String(text) => Value::String(format!("{text}{index}")),
        Value::Bool(flag) => Value::Bool(if index % 2 == 0 { *flag } else { !flag }),
        Value::Array(items) => {
            let mut items = items.clone();
            items.push(Value::from(index));
            Value::Array(items)
        }
        Value::Object(map) => {
            let mut map = map.clone();
            map.insert("_index".to_string(), Value::from(index));
            Value::Object(map)
        }
        Value::Null => Value::Null,
    }
}
