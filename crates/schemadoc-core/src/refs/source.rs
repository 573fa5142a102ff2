//! Document reading and parsing
//!
//! Documents are addressed by `/`-separated path strings, which is also the
//! form canonical references carry (`/specs/common.yaml#/components/...`).
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

/// Capability to read the raw text of a document
pub trait DocumentSource {
    fn read(&self, path: &str) -> SchemaResult<String>;
}

/// Reads documents from the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl DocumentSource for FsSource {
    fn read(&self, path: &str) -> SchemaResult<String> {
        std::fs::read_to_string(path).map_err(|source| SchemaError::io_error(path, source))
    }
}

/// In-memory document set, recording every read
#[derive(Debug, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
    reads: RefCell<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document under `path`
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Paths read so far, in order
    pub fn reads(&self) -> Vec<String> {
        self.reads.borrow().clone()
    }
}

impl DocumentSource for MemorySource {
    fn read(&self, path: &str) -> SchemaResult<String> {
        self.reads.borrow_mut().push(path.to_string());
        self.files.get(path).cloned().ok_or_else(|| {
            SchemaError::io_error(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "document not registered"),
            )
        })
    }
}

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml and anything unrecognised)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension; YAML is the fallback since it
    /// also reads most JSON
    pub fn from_path(path: &str) -> Self {
        match Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Parse document text according to the format implied by `path`
pub fn parse_document(path: &str, content: &str) -> SchemaResult<Value> {
    match Format::from_path(path) {
        Format::Json => {
            serde_json::from_str(content).map_err(|e| SchemaError::json_parse_error(path, e))
        }
        Format::Yaml => {
            // Through the YAML value model so that non-string keys (`200:`) survive
            let yaml_value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| SchemaError::yaml_parse_error(path, e))?;

            serde_json::to_value(yaml_value).map_err(|e| SchemaError::json_parse_error(path, e))
        }
    }
}

/// Directory part of a path, `.` when there is none
pub fn dirname(path: &str) -> String {
    match path.rfind('/') {
        Some(0) => "/".to_string(),
        Some(index) => path[..index].to_string(),
        None => ".".to_string(),
    }
}

/// Join `path` onto `base` and normalize `.` and `..` segments lexically
pub fn join_path(base: &str, path: &str) -> String {
    let combined = if path.starts_with('/') || base.is_empty() {
        path.to_string()
    } else {
        format!("{base}/{path}")
    };

    normalize_path(&combined)
}

fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(last) if *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("/root/spec", "./common.yaml"), "/root/spec/common.yaml");
        assert_eq!(join_path("/root/spec", "../shared/a.yaml"), "/root/shared/a.yaml");
        assert_eq!(join_path("/root/spec", "/abs/b.yaml"), "/abs/b.yaml");
        assert_eq!(join_path(".", "a.yaml"), "a.yaml");
        assert_eq!(join_path("specs", "../../x.yaml"), "../x.yaml");
    }

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("/root/spec/main.yaml"), "/root/spec");
        assert_eq!(dirname("/main.yaml"), "/");
        assert_eq!(dirname("main.yaml"), ".");
    }

    #[test]
    fn test_parse_yaml_with_numeric_keys() {
        let value = parse_document("api.yaml", "responses:\n  200:\n    description: ok\n").unwrap();
        assert_eq!(value, json!({"responses": {"200": {"description": "ok"}}}));
    }

    #[test]
    fn test_parse_json_error_carries_path() {
        let error = parse_document("broken.json", "{").unwrap_err();
        assert_eq!(error.path().map(|p| p.display().to_string()), Some("broken.json".to_string()));
    }

    #[test]
    fn test_memory_source_records_reads() {
        let source = MemorySource::new().with_file("/a.yaml", "a: 1");

        assert_eq!(source.read("/a.yaml").unwrap(), "a: 1");
        assert!(source.read("/b.yaml").is_err());
        assert_eq!(source.reads(), vec!["/a.yaml", "/b.yaml"]);
    }
}
