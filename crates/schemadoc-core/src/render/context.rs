//! Render options and the per-call render context
//!
//! [`RenderOptions`] is what callers hand to [`render_schema`]; the
//! [`RenderContext`] built from it is threaded through every block renderer.
//! Child contexts are derived with [`RenderContext::derive`] and never
//! mutated in place.
//!
//! [`render_schema`]: crate::render::render_schema
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaResult;
use crate::render::i18n::{I18nLabels, I18nOverrides};
use crate::render::Block;
use crate::schema::{LabeledRef, NoRefs, RefResolver, Schema};

/// How object types with structure are laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpandType {
    /// Properties table inside a disclosure titled with the type
    #[default]
    Collapsed,
    /// Properties table only
    Inline,
    /// Type line followed by the properties table
    Titled,
}

/// Property picked for an object table
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedProperty {
    pub name: String,
    pub schema: Schema,
}

/// Custom property order; `None` or an empty list falls back to the default order
pub type OrderProperties = dyn Fn(&Schema) -> Option<Vec<OrderedProperty>>;

/// Renders nested schemas (property cells, combinator variants, array items)
pub trait SchemaRenderer {
    fn render(&self, schema: &Schema, options: RenderOptions<'_>) -> SchemaResult<String>;
}

/// The plain [`render_schema`](crate::render::render_schema) pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl SchemaRenderer for DefaultRenderer {
    fn render(&self, schema: &Schema, options: RenderOptions<'_>) -> SchemaResult<String> {
        crate::render::render_schema(schema, options)
    }
}

static NO_REFS: NoRefs = NoRefs;
static DEFAULT_RENDERER: DefaultRenderer = DefaultRenderer;

/// Options of one [`render_schema`](crate::render::render_schema) call
#[derive(Clone, Default)]
pub struct RenderOptions<'a> {
    /// Resolves `$ref` strings; nothing is followed when unset
    pub resolver: Option<&'a dyn RefResolver>,
    /// Renderer for nested schemas; the default pipeline when unset
    pub renderer: Option<&'a dyn SchemaRenderer>,
    /// Markdown inserted before the rendered blocks
    pub before: String,
    /// Markdown appended after the rendered blocks
    pub after: String,
    /// Read context: `writeOnly` properties are hidden
    pub read_only: bool,
    /// Write context: `readOnly` properties are hidden
    pub write_only: bool,
    pub suppress_examples: bool,
    pub suppress_title: bool,
    pub suppress_deprecated_warning: bool,
    pub suppress_table_headers: bool,
    /// Skip `[additional]` rows for `additionalProperties: true|false`
    pub suppress_verbose_additional: bool,
    /// Whether this call unmasks table pipes; a top-level call when unset
    pub is_root: Option<bool>,
    pub expand_type: ExpandType,
    pub order_properties: Option<&'a OrderProperties>,
    /// Blocks to emit; the default pipeline when empty
    pub blocks: Vec<Block>,
    pub i18n: I18nLabels,
}

impl<'a> RenderOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(mut self, resolver: &'a dyn RefResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_renderer(mut self, renderer: &'a dyn SchemaRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_blocks(mut self, blocks: impl IntoIterator<Item = Block>) -> Self {
        self.blocks = blocks.into_iter().collect();
        self
    }

    pub fn with_expand_type(mut self, expand_type: ExpandType) -> Self {
        self.expand_type = expand_type;
        self
    }

    pub fn with_order_properties(mut self, order: &'a OrderProperties) -> Self {
        self.order_properties = Some(order);
        self
    }

    /// Apply label overrides on top of the current labels
    pub fn with_i18n(mut self, overrides: &I18nOverrides) -> Self {
        self.i18n.apply(overrides);
        self
    }

    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before = before.into();
        self
    }

    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = after.into();
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.write_only = true;
        self
    }

    pub fn suppress_examples(mut self) -> Self {
        self.suppress_examples = true;
        self
    }

    pub fn suppress_title(mut self) -> Self {
        self.suppress_title = true;
        self
    }

    pub fn suppress_verbose_additional(mut self) -> Self {
        self.suppress_verbose_additional = true;
        self
    }
}

/// Overrides applied when deriving a child context
///
/// `is_root` and `expand_type` do not inherit: they reset to `false` and
/// [`ExpandType::Collapsed`] unless given.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextOverrides {
    pub read_only: Option<bool>,
    pub write_only: Option<bool>,
    pub suppress_title: Option<bool>,
    pub suppress_table_headers: Option<bool>,
    pub is_root: Option<bool>,
    pub expand_type: Option<ExpandType>,
}

/// Configuration threaded through every block renderer of one call
#[derive(Clone)]
pub struct RenderContext<'a> {
    pub read_only: bool,
    pub write_only: bool,
    pub suppress_examples: bool,
    pub suppress_title: bool,
    pub suppress_deprecated_warning: bool,
    pub suppress_table_headers: bool,
    pub suppress_verbose_additional: bool,
    pub is_root: bool,
    pub expand_type: ExpandType,
    pub order_properties: Option<&'a OrderProperties>,
    pub i18n: I18nLabels,
    resolver: &'a dyn RefResolver,
    renderer: &'a dyn SchemaRenderer,
}

impl<'a> RenderContext<'a> {
    /// Context of a top-level call built from its options
    pub fn new(options: &RenderOptions<'a>) -> Self {
        Self {
            read_only: options.read_only,
            write_only: options.write_only,
            suppress_examples: options.suppress_examples,
            suppress_title: options.suppress_title,
            suppress_deprecated_warning: options.suppress_deprecated_warning,
            suppress_table_headers: options.suppress_table_headers,
            suppress_verbose_additional: options.suppress_verbose_additional,
            is_root: options.is_root.unwrap_or(true),
            expand_type: options.expand_type,
            order_properties: options.order_properties,
            i18n: options.i18n.clone(),
            resolver: options.resolver.unwrap_or(&NO_REFS),
            renderer: options.renderer.unwrap_or(&DEFAULT_RENDERER),
        }
    }

    /// Child context with `overrides` applied
    pub fn derive(&self, overrides: ContextOverrides) -> Self {
        Self {
            read_only: overrides.read_only.unwrap_or(self.read_only),
            write_only: overrides.write_only.unwrap_or(self.write_only),
            suppress_title: overrides.suppress_title.unwrap_or(self.suppress_title),
            suppress_table_headers: overrides
                .suppress_table_headers
                .unwrap_or(self.suppress_table_headers),
            is_root: overrides.is_root.unwrap_or(false),
            expand_type: overrides.expand_type.unwrap_or_default(),
            ..self.clone()
        }
    }

    /// Options for a nested render call
    ///
    /// The nested call is never root and uses the default nested renderer;
    /// a custom renderer only intercepts the renders it is handed.
    pub fn to_options(&self) -> RenderOptions<'a> {
        RenderOptions {
            resolver: Some(self.resolver),
            renderer: None,
            before: String::new(),
            after: String::new(),
            read_only: self.read_only,
            write_only: self.write_only,
            suppress_examples: self.suppress_examples,
            suppress_title: self.suppress_title,
            suppress_deprecated_warning: self.suppress_deprecated_warning,
            suppress_table_headers: self.suppress_table_headers,
            suppress_verbose_additional: self.suppress_verbose_additional,
            is_root: Some(false),
            expand_type: self.expand_type,
            order_properties: self.order_properties,
            blocks: Vec::new(),
            i18n: self.i18n.clone(),
        }
    }

    pub fn resolver(&self) -> &'a dyn RefResolver {
        self.resolver
    }

    /// Render a nested schema through the context's renderer
    pub fn render_nested(&self, schema: &Schema, options: RenderOptions<'_>) -> SchemaResult<String> {
        self.renderer.render(schema, options)
    }

    pub fn resolve_ref(&self, schema: &Schema) -> SchemaResult<Option<LabeledRef>> {
        crate::schema::resolve_ref(schema, self.resolver)
    }

    /// Whether a property is shown under the active visibility mode
    pub fn is_visible(&self, property: &Schema) -> bool {
        if self.write_only && property.read_only == Some(true) {
            return false;
        }

        !(self.read_only && property.write_only == Some(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_resets_root_and_expansion() {
        let options = RenderOptions::new()
            .with_expand_type(ExpandType::Inline)
            .write_only();
        let context = RenderContext::new(&options);

        assert!(context.is_root);
        assert_eq!(context.expand_type, ExpandType::Inline);

        let child = context.derive(ContextOverrides {
            suppress_table_headers: Some(true),
            ..Default::default()
        });

        assert!(!child.is_root);
        assert_eq!(child.expand_type, ExpandType::Collapsed);
        assert!(child.suppress_table_headers);
        assert!(child.write_only);
    }

    #[test]
    fn test_to_options_is_not_root() {
        let context = RenderContext::new(&RenderOptions::new().with_expand_type(ExpandType::Titled));
        let options = context.to_options();

        assert_eq!(options.is_root, Some(false));
        assert_eq!(options.expand_type, ExpandType::Titled);
        assert!(options.renderer.is_none());
    }

    #[test]
    fn test_visibility() {
        let write = RenderContext::new(&RenderOptions::new().write_only());
        let read = RenderContext::new(&RenderOptions::new().read_only());
        let read_only_field = Schema {
            read_only: Some(true),
            ..Schema::default()
        };

        assert!(!write.is_visible(&read_only_field));
        assert!(read.is_visible(&read_only_field));
    }
}
