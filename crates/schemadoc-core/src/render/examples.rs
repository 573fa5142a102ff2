//! Examples block
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaResult;
use crate::example::{infer_type, ExampleGenerator};
use crate::markdown::{block, code, cut, decorate};
use crate::render::blocks::format_number;
use crate::render::context::RenderContext;
use crate::schema::{traverse_schema_refs, Schema};
use serde_json::Value;

/// Inline code for scalars, a fenced JSON block for objects and arrays
pub fn format_example(value: &Value) -> String {
    match value {
        Value::Null => "`null`".to_string(),
        Value::String(text) => format!("`{}`", text.replace('`', "\\`")),
        Value::Number(number) => format!("`{}`", format_number(number)),
        Value::Bool(flag) => format!("`{flag}`"),
        Value::Array(_) | Value::Object(_) => {
            let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            code(&pretty, "json")
        }
    }
}

/// Whether any enum along the ref chain lists strings only
fn has_string_enum(schema: &Schema, context: &RenderContext<'_>) -> SchemaResult<bool> {
    let mut found = false;
    traverse_schema_refs(schema, context.resolver(), |node, _| {
        if let Some(values) = node.enum_values.as_ref().filter(|values| !values.is_empty()) {
            found = found || values.iter().all(Value::is_string);
        }
    })?;

    Ok(found)
}

/// A `default` along the ref chain and no explicit example anywhere on it
fn has_default_only(schema: &Schema, context: &RenderContext<'_>) -> SchemaResult<bool> {
    let mut has_default = false;
    let mut has_example = false;
    traverse_schema_refs(schema, context.resolver(), |node, _| {
        has_default = has_default || node.default.is_some();
        has_example = has_example
            || node.example.is_some()
            || node.examples.as_ref().is_some_and(|examples| !examples.is_empty());
    })?;

    Ok(has_default && !has_example)
}

pub fn render_examples(schema: &Schema, context: &RenderContext<'_>) -> SchemaResult<String> {
    if context.suppress_examples {
        return Ok(String::new());
    }

    let inferred = infer_type(schema);
    if matches!(inferred, Some("boolean" | "number" | "integer")) {
        return Ok(String::new());
    }

    if matches!(inferred, None | Some("string"))
        && (has_string_enum(schema, context)? || has_default_only(schema, context)?)
    {
        return Ok(String::new());
    }

    let examples: Vec<String> = ExampleGenerator::new(context.resolver())
        .with_visibility(context.read_only, context.write_only)
        .collect(schema)?
        .iter()
        .map(format_example)
        .collect();

    let labels = &context.i18n;
    match examples.as_slice() {
        [] => Ok(String::new()),
        [single] if !single.contains('\n') => {
            let text = if labels.example.ends_with(':') {
                labels.example.clone()
            } else {
                format!("{}:", labels.example)
            };
            Ok(format!("{} {single}", decorate(&text, &["json-schema-example"])))
        }
        [_] => Ok(cut(&block(&examples), &format!("**{}**", labels.example), &[".json-schema-example"])),
        _ => Ok(cut(&block(&examples), &format!("**{}**", labels.examples), &[".json-schema-example"])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::context::RenderOptions;
    use serde_json::json;

    fn render(value: Value) -> String {
        let context = RenderContext::new(&RenderOptions::new());
        render_examples(&Schema::from_value(&value).unwrap(), &context).unwrap()
    }

    #[test]
    fn test_format_example() {
        assert_eq!(format_example(&Value::Null), "`null`");
        assert_eq!(format_example(&json!("a`b")), "`a\\`b`");
        assert_eq!(format_example(&json!(18)), "`18`");
        assert_eq!(format_example(&json!(false)), "`false`");
        assert_eq!(format_example(&json!([1])), "```json translate=no\n[\n  1\n]\n```");
    }

    #[test]
    fn test_single_line_example_is_inline() {
        assert_eq!(
            render(json!({"example": "demo"})),
            "_Example:_{.json-schema-reset .json-schema-example} `demo`"
        );
    }

    #[test]
    fn test_skipped_for_scalars_and_string_enums() {
        assert_eq!(render(json!({"type": "integer", "example": 1})), "");
        assert_eq!(render(json!({"type": "boolean"})), "");
        assert_eq!(render(json!({"type": "string", "enum": ["a", "b"]})), "");
        assert_eq!(render(json!({"type": "string", "default": "x"})), "");
    }

    #[test]
    fn test_mixed_enum_still_renders() {
        assert_eq!(
            render(json!({"enum": [1, "a"]})),
            "_Example:_{.json-schema-reset .json-schema-example} `1`"
        );
    }

    #[test]
    fn test_suppressed() {
        let context = RenderContext::new(&RenderOptions::new().suppress_examples());
        let schema = Schema::from_value(&json!({"example": "demo"})).unwrap();
        assert_eq!(render_examples(&schema, &context).unwrap(), "");
    }
}
