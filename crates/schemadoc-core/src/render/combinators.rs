//! `oneOf` / `allOf` / `anyOf` disclosures
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaResult;
use crate::markdown::{block, cut};
use crate::render::context::{ContextOverrides, ExpandType, RenderContext};
use crate::schema::{Combinator, Schema};

fn combinator_label<'c>(combinator: Combinator, context: &'c RenderContext<'_>) -> &'c str {
    let labels = &context.i18n.combinators;
    match combinator {
        Combinator::OneOf => &labels.one_of,
        Combinator::AllOf => &labels.all_of,
        Combinator::AnyOf => &labels.any_of,
    }
}

fn marker(combinator: Combinator) -> &'static str {
    match combinator {
        Combinator::AllOf => "and",
        Combinator::OneOf | Combinator::AnyOf => "or",
    }
}

/// `**One of**: A **or** B` when every variant is titled, else `**One of N types**`
fn combinator_title(variants: &[Schema], combinator: Combinator, context: &RenderContext<'_>) -> String {
    let label = combinator_label(combinator, context);
    let titles: Vec<&str> = variants
        .iter()
        .filter_map(|variant| variant.title.as_deref())
        .filter(|title| !title.is_empty())
        .collect();

    if !titles.is_empty() && titles.len() == variants.len() {
        let separator = format!(" **{}** ", marker(combinator));
        return format!("**{label}**: {}", titles.join(&separator));
    }

    let count = variants.len();
    let noun = if count == 1 { "type" } else { "types" };
    format!("**{label} {count} {noun}**")
}

/// Bullet item: first line after `- `, the rest indented under it
fn bullet(rendered: &str) -> String {
    let mut lines = rendered.trim_end().split('\n');
    let first = lines.next().unwrap_or_default();
    let mut item = format!("- {first}");

    for line in lines {
        item.push('\n');
        if !line.is_empty() {
            item.push_str("  ");
            item.push_str(line);
        }
    }

    item
}

fn render_variants(schema: &Schema, combinator: Combinator, context: &RenderContext<'_>) -> SchemaResult<String> {
    let Some(variants) = schema.combinator(combinator).filter(|variants| !variants.is_empty()) else {
        return Ok(String::new());
    };

    let variant_context = context.derive(ContextOverrides {
        suppress_title: Some(false),
        suppress_table_headers: Some(true),
        expand_type: Some(ExpandType::Titled),
        ..Default::default()
    });

    let items = variants
        .iter()
        .map(|variant| {
            context
                .render_nested(variant, variant_context.to_options())
                .map(|rendered| bullet(&rendered))
        })
        .collect::<SchemaResult<Vec<_>>>()?
        .join("\n\n");

    let title = combinator_title(variants, combinator, context);
    let data_marker = format!("data-marker={}", marker(combinator));

    Ok(cut(&items, &title, &[".json-schema-combinators", &data_marker]))
}

pub fn render_combinators(schema: &Schema, context: &RenderContext<'_>) -> SchemaResult<String> {
    if !schema.has_combinators() {
        return Ok(String::new());
    }

    let mut parts = Vec::with_capacity(Combinator::ALL.len());
    for combinator in Combinator::ALL {
        parts.push(render_variants(schema, combinator, context)?);
    }

    Ok(block(parts))
}
