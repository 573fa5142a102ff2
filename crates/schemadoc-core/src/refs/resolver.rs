//! Document registry and `$ref` rebasing
//!
//! The resolver owns every document loaded during one rendering
//! invocation. References are rewritten into a canonical `key#anchor` form
//! where `key` is empty for the root document and the document path for
//! every other one, so a canonical reference can be looked up with
//! [`ReferenceResolver::get`] regardless of which file it was written in.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use crate::refs::source::{dirname, join_path, parse_document, DocumentSource, FsSource};
use crate::refs::{split_reference, ORIGIN_KEY};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Properties compared when looking an inline node up among registered entities
const IDENTITY_FIELDS: [&str; 5] = ["properties", "additionalProperties", "allOf", "oneOf", "enum"];

/// Registry of loaded documents for one rendering invocation
#[derive(Debug)]
pub struct ReferenceResolver<S: DocumentSource = FsSource> {
    source: S,
    root: String,
    documents: HashMap<String, Value>,
}

impl ReferenceResolver<FsSource> {
    /// Read, parse and resolve a root document from the file system
    pub fn from_file(root: impl Into<String>) -> SchemaResult<Self> {
        Self::open(FsSource, root)
    }
}

impl<S: DocumentSource> ReferenceResolver<S> {
    /// Create a resolver around an already parsed root document
    ///
    /// References inside `document` are left untouched until
    /// [`ReferenceResolver::resolve_root`] runs.
    pub fn new(source: S, root: impl Into<String>, document: Value) -> Self {
        let mut documents = HashMap::new();
        documents.insert(String::new(), document);

        Self {
            source,
            root: root.into(),
            documents,
        }
    }

    /// Read the root document through `source` and resolve it
    pub fn open(source: S, root: impl Into<String>) -> SchemaResult<Self> {
        let root = root.into();
        let text = source.read(&root)?;
        let document = parse_document(&root, &text)?;

        let mut resolver = Self::new(source, root, document);
        resolver.resolve_root()?;
        Ok(resolver)
    }

    /// Rewrite every reference of the root document into canonical form
    pub fn resolve_root(&mut self) -> SchemaResult<()> {
        let mut document = self.documents.get("").cloned().unwrap_or(Value::Null);
        let root = self.root.clone();

        self.visit(&mut document, &root)?;
        self.documents.insert(String::new(), document);
        Ok(())
    }

    /// Rewrite the references of `value` into canonical form
    ///
    /// `origin` is the document `value` was read from; the root document
    /// when omitted. External documents are loaded on first sight.
    pub fn resolve(&mut self, value: &mut Value, origin: Option<&str>) -> SchemaResult<()> {
        let origin = origin.map(str::to_string).unwrap_or_else(|| self.root.clone());
        self.visit(value, &origin)
    }

    fn visit(&mut self, value: &mut Value, origin: &str) -> SchemaResult<()> {
        match value {
            Value::Object(map) => {
                let origin = match map.get(ORIGIN_KEY).and_then(Value::as_str) {
                    Some(marker) => {
                        let (path, _) = split_reference(marker);
                        if path.is_empty() {
                            origin.to_string()
                        } else {
                            join_path(&dirname(origin), path)
                        }
                    }
                    None => origin.to_string(),
                };

                if let Some(reference) = map.get("$ref").and_then(Value::as_str).map(str::to_string) {
                    let canonical = self.load(&reference, &origin)?;
                    map.insert("$ref".to_string(), Value::String(canonical));
                }

                for (key, child) in map.iter_mut() {
                    if key != "$ref" {
                        self.visit(child, &origin)?;
                    }
                }
                Ok(())
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    self.visit(item, origin)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Canonicalize `reference` written inside document `origin`
    ///
    /// Loads the target document if needed and checks that the anchor
    /// exists in it.
    pub fn load(&mut self, reference: &str, origin: &str) -> SchemaResult<String> {
        let (path, anchor) = split_reference(reference);
        let file = if path.is_empty() {
            origin.to_string()
        } else {
            join_path(&dirname(origin), path)
        };
        let key = self.key_for(&file);

        if !self.documents.contains_key(&key) {
            self.load_document(&key, &file)?;
        }

        if let Some(document) = self.documents.get(&key) {
            if walk_anchor(document, anchor).is_err() {
                return Err(SchemaError::unknown_ref_target(&key, anchor, origin));
            }
        }

        Ok(format!("{key}#{anchor}"))
    }

    fn load_document(&mut self, key: &str, file: &str) -> SchemaResult<()> {
        debug!(file = %file, "Loading referenced document");

        let text = self.source.read(file)?;
        let mut document = parse_document(file, &text)?;

        // Registered before resolution so that documents referencing each
        // other do not load again
        self.documents.insert(key.to_string(), document.clone());
        self.visit(&mut document, file)?;
        self.documents.insert(key.to_string(), document);
        Ok(())
    }

    fn key_for(&self, file: &str) -> String {
        if file == self.root {
            String::new()
        } else {
            file.to_string()
        }
    }

    /// Look up the node a canonical reference points to
    pub fn get(&self, reference: &str) -> SchemaResult<&Value> {
        let (path, anchor) = split_reference(reference);
        let key = self.key_for(path);

        let document = self
            .documents
            .get(&key)
            .ok_or_else(|| SchemaError::unknown_reference(reference, path))?;

        walk_anchor(document, anchor).map_err(|segment| SchemaError::unknown_reference(reference, segment))
    }

    /// Best-effort reverse lookup of a registered entity
    ///
    /// Returns the canonical reference of the `components/schemas` entry
    /// whose identifying fields all equal those of `node`.
    pub fn find(&self, node: &Value) -> Option<String> {
        let node = node.as_object()?;
        if !IDENTITY_FIELDS.iter().any(|field| node.contains_key(*field)) {
            return None;
        }

        let mut keys: Vec<&String> = self.documents.keys().collect();
        keys.sort();

        for key in keys {
            let schemas = self.documents[key]
                .pointer("/components/schemas")
                .and_then(Value::as_object);

            let Some(schemas) = schemas else { continue };

            for (name, candidate) in schemas {
                let Some(candidate) = candidate.as_object() else { continue };

                let same = IDENTITY_FIELDS
                    .iter()
                    .all(|field| node.get(*field) == candidate.get(*field));

                if same {
                    return Some(format!("{key}#/components/schemas/{name}"));
                }
            }
        }

        None
    }

    /// Path of the root document
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Loaded documents keyed by canonical document key
    pub fn documents(&self) -> &HashMap<String, Value> {
        &self.documents
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Walk `/`-separated anchor segments, returning the first missing segment on failure
fn walk_anchor<'a>(document: &'a Value, anchor: &str) -> Result<&'a Value, String> {
    let mut current = document;

    for segment in anchor.split('/').skip(1) {
        let decoded = segment.replace("~1", "/").replace("~0", "~");

        let next = match current {
            Value::Object(map) => map.get(&decoded),
            Value::Array(items) => decoded.parse::<usize>().ok().and_then(|index| items.get(index)),
            _ => None,
        };

        current = next.ok_or(decoded)?;
    }

    Ok(current)
}
