//! Block-based schema renderer
//!
//! A render call normalizes the schema once and then emits the selected
//! blocks in order:
//!
//! `title → deprecated → type → combinators → description → values → assertions → examples`
//!
//! Each block returns an empty string when it does not apply; non-empty
//! fragments are joined with a blank line. Nested tables keep their pipes
//! masked until the root call unmasks the final output.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod blocks;
pub mod combinators;
pub mod context;
pub mod examples;
pub mod i18n;
pub mod session;
pub mod types;

pub use context::{
    ContextOverrides, DefaultRenderer, ExpandType, OrderProperties, OrderedProperty, RenderContext,
    RenderOptions, SchemaRenderer,
};
pub use examples::format_example;
pub use i18n::{I18nLabels, I18nOverrides};
pub use session::{RenderMode, Renderer, RendererConfig};

use crate::error::{SchemaError, SchemaResult};
use crate::markdown::{block, unmask_table_content};
use crate::schema::{normalize, Schema};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Render blocks, in default order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Block {
    Title,
    Deprecated,
    Type,
    Combinators,
    Description,
    Values,
    Assertions,
    Examples,
    /// Every default block not listed elsewhere, spelled `...`
    Rest,
}

/// Blocks emitted when none are selected
pub const DEFAULT_BLOCKS: [Block; 8] = [
    Block::Title,
    Block::Deprecated,
    Block::Type,
    Block::Combinators,
    Block::Description,
    Block::Values,
    Block::Assertions,
    Block::Examples,
];

impl Block {
    pub fn as_str(self) -> &'static str {
        match self {
            Block::Title => "title",
            Block::Deprecated => "deprecated",
            Block::Type => "type",
            Block::Combinators => "combinators",
            Block::Description => "description",
            Block::Values => "values",
            Block::Assertions => "assertions",
            Block::Examples => "examples",
            Block::Rest => "...",
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Block {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "title" => Block::Title,
            "deprecated" => Block::Deprecated,
            "type" => Block::Type,
            "combinators" => Block::Combinators,
            "description" => Block::Description,
            "values" => Block::Values,
            "assertions" => Block::Assertions,
            "examples" => Block::Examples,
            "..." => Block::Rest,
            other => {
                return Err(SchemaError::unsupported_input(format!("unknown render block '{other}'")))
            }
        })
    }
}

impl TryFrom<String> for Block {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Block> for String {
    fn from(block: Block) -> Self {
        block.as_str().to_string()
    }
}

/// Expand the `...` placeholder; an empty selection means the defaults
pub fn resolve_blocks(blocks: &[Block]) -> Vec<Block> {
    if blocks.is_empty() {
        return DEFAULT_BLOCKS.to_vec();
    }

    let Some(rest) = blocks.iter().position(|block| *block == Block::Rest) else {
        return blocks.to_vec();
    };

    let (before, after) = (&blocks[..rest], &blocks[rest + 1..]);
    let remaining = DEFAULT_BLOCKS
        .iter()
        .filter(|block| !before.contains(block) && !after.contains(block));

    before.iter().chain(remaining).chain(after.iter()).copied().collect()
}

/// Render `schema` into a markdown fragment
pub fn render_schema(schema: &Schema, options: RenderOptions<'_>) -> SchemaResult<String> {
    let context = RenderContext::new(&options);
    let normalized = normalize(schema, context.resolver())?;

    let mut outputs = Vec::with_capacity(options.blocks.len() + 2);
    outputs.push(options.before.clone());

    for selected in resolve_blocks(&options.blocks) {
        let fragment = match selected {
            Block::Title => blocks::render_title(&normalized, &context)?,
            Block::Deprecated => blocks::render_deprecated(&normalized, &context),
            Block::Type => types::render_type(Some(&normalized), &context, "")?,
            Block::Combinators => combinators::render_combinators(&normalized, &context)?,
            Block::Description => blocks::render_description(&normalized, &context)?,
            Block::Values => blocks::render_values(&normalized, &context)?,
            Block::Assertions => blocks::render_assertions(&normalized, &context)?,
            Block::Examples => examples::render_examples(&normalized, &context)?,
            Block::Rest => continue,
        };
        outputs.push(fragment);
    }

    outputs.push(options.after.clone());

    let output = block(outputs);
    Ok(if context.is_root {
        unmask_table_content(&output)
    } else {
        output
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_blocks_expands_rest() {
        assert_eq!(resolve_blocks(&[]), DEFAULT_BLOCKS.to_vec());
        assert_eq!(resolve_blocks(&[Block::Type]), vec![Block::Type]);
        assert_eq!(
            resolve_blocks(&[Block::Title, Block::Deprecated, Block::Description, Block::Rest]),
            vec![
                Block::Title,
                Block::Deprecated,
                Block::Description,
                Block::Type,
                Block::Combinators,
                Block::Values,
                Block::Assertions,
                Block::Examples,
            ]
        );
        assert_eq!(
            resolve_blocks(&[Block::Rest, Block::Title]),
            vec![
                Block::Deprecated,
                Block::Type,
                Block::Combinators,
                Block::Description,
                Block::Values,
                Block::Assertions,
                Block::Examples,
                Block::Title,
            ]
        );
    }

    #[test]
    fn test_block_names() {
        let blocks: Vec<Block> = serde_json::from_str(r#"["type", "..."]"#).unwrap();
        assert_eq!(blocks, vec![Block::Type, Block::Rest]);
        assert!("nope".parse::<Block>().is_err());
        assert_eq!(Block::Combinators.to_string(), "combinators");
    }
}
