//! Page-level render session
//!
//! A [`Renderer`] renders the schemas of one documentation page. It records
//! every entity a rendered schema links to, so that [`Renderer::refs`] can
//! emit one standalone section per linked entity afterwards, and it keeps
//! anchors unique across the page.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use crate::example::ExampleGenerator;
use crate::markdown::{block, bold, cut, entity, slugify, title};
use crate::refs::{is_empty_reference, is_reference, DocumentSource, FsSource, ReferenceResolver};
use crate::render::context::{ExpandType, RenderOptions, SchemaRenderer};
use crate::render::examples::format_example;
use crate::render::i18n::{I18nLabels, I18nOverrides};
use crate::render::{render_schema, Block};
use crate::schema::{RefResolver, ResolvedRef, Schema};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

const PRIMITIVE_TYPES: [&str; 5] = ["string", "number", "integer", "boolean", "null"];

/// Visibility mode of a rendered schema
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Response payloads: `writeOnly` properties are hidden
    #[default]
    Read,
    /// Request payloads: `readOnly` properties are hidden
    Write,
}

impl RenderMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Read => "read",
            RenderMode::Write => "write",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(RenderMode::Read),
            "write" => Ok(RenderMode::Write),
            other => Err(SchemaError::unsupported_input(format!("unknown render mode '{other}'"))),
        }
    }
}

/// Settings shared by every render of a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RendererConfig {
    pub i18n: I18nOverrides,
    pub suppress_examples: bool,
}

/// Render session over a resolved document set
pub struct Renderer<'r, S: DocumentSource = FsSource> {
    refs: &'r ReferenceResolver<S>,
    labels: I18nLabels,
    suppress_examples: bool,
    used_anchors: RefCell<HashMap<String, usize>>,
    linked_refs: RefCell<IndexSet<String>>,
    rendered_refs: RefCell<HashSet<String>>,
    rendered_blocks: RefCell<HashSet<String>>,
    resolved_refs: RefCell<HashMap<String, Option<ResolvedRef>>>,
}

/// Renders the nested schemas of a session call collapsed, with every default block
struct NestedRenderer;

impl SchemaRenderer for NestedRenderer {
    fn render(&self, schema: &Schema, mut options: RenderOptions<'_>) -> SchemaResult<String> {
        options.expand_type = ExpandType::Collapsed;
        options.blocks = vec![Block::Rest];
        render_schema(schema, options)
    }
}

impl<S: DocumentSource> RefResolver for Renderer<'_, S> {
    fn resolve(&self, reference: &str) -> SchemaResult<Option<ResolvedRef>> {
        if let Some(cached) = self.resolved_refs.borrow().get(reference) {
            return Ok(cached.clone());
        }

        let resolved = self.resolve_ref(reference, &mut HashSet::new())?;
        self.resolved_refs
            .borrow_mut()
            .insert(reference.to_string(), resolved.clone());
        Ok(resolved)
    }
}

fn rendered_key(reference: &str, mode: RenderMode) -> String {
    format!("{reference}-{mode}")
}

impl<'r, S: DocumentSource> Renderer<'r, S> {
    pub fn new(refs: &'r ReferenceResolver<S>) -> Self {
        Self::with_config(refs, &RendererConfig::default())
    }

    pub fn with_config(refs: &'r ReferenceResolver<S>, config: &RendererConfig) -> Self {
        Self {
            refs,
            labels: I18nLabels::merged(&config.i18n),
            suppress_examples: config.suppress_examples,
            used_anchors: RefCell::new(HashMap::new()),
            linked_refs: RefCell::new(IndexSet::new()),
            rendered_refs: RefCell::new(HashSet::new()),
            rendered_blocks: RefCell::new(HashSet::new()),
            resolved_refs: RefCell::new(HashMap::new()),
        }
    }

    /// Options every session render starts from
    fn base_options(&self, mode: RenderMode) -> RenderOptions<'_> {
        let mut options = RenderOptions::new()
            .with_resolver(self)
            .suppress_title()
            .suppress_verbose_additional();
        options.i18n = self.labels.clone();
        options.suppress_examples = self.suppress_examples;
        match mode {
            RenderMode::Read => options.read_only = true,
            RenderMode::Write => options.write_only = true,
        }
        options
    }

    /// `$ref` to the registered entity an inline schema is a copy of
    ///
    /// Keeps a known entity from being rendered again as an anonymous object.
    fn known_entity<'v>(&self, schema: &'v Value) -> Cow<'v, Value> {
        if is_reference(schema) {
            return Cow::Borrowed(schema);
        }

        match self.refs.find(schema) {
            Some(reference) => {
                debug!(reference = %reference, "inline schema matches a registered entity");
                Cow::Owned(json!({ "$ref": reference }))
            }
            None => Cow::Borrowed(schema),
        }
    }

    /// Type and combinators of a schema with its properties inline
    ///
    /// A top-level `$ref`, or an inline copy of a registered entity, is
    /// rendered in place of its entity section.
    pub fn table(&self, schema: &Value, mode: RenderMode) -> SchemaResult<String> {
        let schema = self.known_entity(schema);
        let schema = schema.as_ref();
        let mut target = Schema::from_value(schema)?;

        if is_reference(schema) {
            let reference = schema["$ref"].as_str().unwrap_or_default();
            let resolved = self.resolve(reference)?;
            self.rendered_refs.borrow_mut().insert(rendered_key(reference, mode));
            if let Some(resolved) = resolved {
                target = resolved.schema;
            }
        }

        let options = self
            .base_options(mode)
            .with_renderer(&NestedRenderer)
            .with_expand_type(ExpandType::Inline)
            .with_blocks([Block::Type, Block::Combinators]);

        render_schema(&target, options)
    }

    /// Linked entities not yet rendered for `mode`, in link order
    fn pending_refs(&self, mode: RenderMode) -> Vec<String> {
        let rendered = self.rendered_refs.borrow();
        self.linked_refs
            .borrow()
            .iter()
            .filter(|reference| !rendered.contains(&rendered_key(reference, mode)))
            .cloned()
            .collect()
    }

    /// Anchor for an entity link, suffixed with a counter on reuse
    fn allocate_anchor(&self, href: &str) -> String {
        let mut used = self.used_anchors.borrow_mut();
        match used.get_mut(href) {
            Some(count) => {
                let anchor = format!("{href}{count}");
                *count += 1;
                anchor
            }
            None => {
                used.insert(href.to_string(), 1);
                href.to_string()
            }
        }
    }

    /// Standalone sections of every entity linked so far
    ///
    /// Sections rendered for an entity may link further entities; those are
    /// rendered in following rounds until nothing is pending. Identical
    /// section bodies are emitted once.
    pub fn refs(&self, mode: RenderMode) -> SchemaResult<Vec<String>> {
        let mut results = Vec::new();
        let mut pending = self.pending_refs(mode);

        while !pending.is_empty() {
            for reference in pending {
                let resolved = self.resolve(&reference)?;
                self.rendered_refs.borrow_mut().insert(rendered_key(&reference, mode));

                let Some(ResolvedRef { label, href, schema }) = resolved else {
                    warn!(reference = %reference, "linked reference can not be resolved");
                    continue;
                };

                let anchor = self.allocate_anchor(&href);
                let options = self
                    .base_options(mode)
                    .with_renderer(&NestedRenderer)
                    .with_expand_type(ExpandType::Inline)
                    .with_blocks([Block::Title, Block::Deprecated, Block::Description, Block::Rest]);

                let result = render_schema(&schema, options)?;

                if !self.rendered_blocks.borrow_mut().insert(result.clone()) {
                    debug!(reference = %reference, "entity section already emitted");
                    continue;
                }

                let label = label.unwrap_or_else(|| reference.clone());
                results.push(entity(&block([title(3, &label, &anchor), result])));
            }

            pending = self.pending_refs(mode);
        }

        Ok(results)
    }

    /// First example of a schema, formatted; empty when there is none
    pub fn example(&self, schema: &Value, mode: RenderMode) -> SchemaResult<String> {
        let schema = Schema::from_value(&self.known_entity(schema))?;
        let examples = ExampleGenerator::new(self)
            .with_visibility(mode == RenderMode::Read, mode == RenderMode::Write)
            .collect(&schema)?;

        Ok(examples.first().map(format_example).unwrap_or_default())
    }

    /// Self-contained copy of a schema with its definitions under `$defs`
    pub fn merge_schema(&self, schema: &Value) -> SchemaResult<Value> {
        self.refs.merge_schema(schema)
    }

    /// `### Body` section: example, table and the linked entity sections
    pub fn body(&self, schema: Option<&Value>, mode: RenderMode, content_type: Option<&str>) -> SchemaResult<String> {
        let Some(schema) = schema else {
            return Ok(String::new());
        };

        let content_type = content_type.unwrap_or("schema");
        let heading = title(3, "Body", "");

        if let Some(kind) = schema.get("type").and_then(Value::as_str).filter(|kind| PRIMITIVE_TYPES.contains(kind)) {
            let format = schema.get("format").and_then(Value::as_str);
            let description = schema.get("description").and_then(Value::as_str);

            return Ok(block([
                heading,
                content_type.to_string(),
                format!("{} {kind}", bold("Type:")),
                format.map(|f| format!("{} {f}", bold("Format:"))).unwrap_or_default(),
                description
                    .map(|d| format!("{} {d}", bold("Description:")))
                    .unwrap_or_default(),
            ]));
        }

        let example = self.example(schema, mode)?;
        let table = self.table(schema, mode)?;

        let mut parts = vec![
            "<div class=\"openapi-entity\">".to_string(),
            heading,
            cut(&example, content_type, &[]),
            table,
            "</div>".to_string(),
        ];
        parts.extend(self.refs(mode)?);

        Ok(block(parts))
    }

    /// Resolve a reference for rendering, skipping empty-reference hops
    ///
    /// Unknown references resolve to `None`. Every reference resolved here
    /// is linked for [`Renderer::refs`].
    fn resolve_ref(&self, reference: &str, visited: &mut HashSet<String>) -> SchemaResult<Option<ResolvedRef>> {
        if visited.contains(reference) {
            return Ok(None);
        }

        let value = match self.refs.get(reference) {
            Ok(value) => value,
            Err(error) => {
                debug!(reference = %reference, error = %error, "reference not found");
                return Ok(None);
            }
        };

        visited.insert(reference.to_string());

        if is_empty_reference(value) {
            let next = value["$ref"].as_str().unwrap_or_default();
            return self.resolve_ref(next, visited);
        }

        self.linked_refs.borrow_mut().insert(reference.to_string());

        let label = reference.rsplit('/').next().unwrap_or(reference).to_string();
        let href = format!("#entity-{}", slugify(&label));
        let schema = Schema::from_value_ref(value, reference)?;

        Ok(Some(ResolvedRef {
            label: Some(label),
            href,
            schema,
        }))
    }

    /// References linked by the renders so far
    pub fn linked_refs(&self) -> Vec<String> {
        self.linked_refs.borrow().iter().cloned().collect()
    }
}
