//! Error types for reference resolution, normalization and rendering
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for engine operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors surfaced by the schema engine
///
/// Reference cycles and empty-reference chains are not errors; they are
/// resolved to definition pointers by the resolver and never reach this type.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Input shape the engine does not handle (boolean schema, tuple items
    /// where one schema is required, `oneOf` together with `allOf`)
    #[error("Unsupported input: {reason}")]
    UnsupportedInput { reason: String },

    /// The anchor path of a reference does not exist in the loaded document
    #[error("Unknown ref target: {file}#{anchor} from {referencing}")]
    UnknownRefTarget {
        file: String,
        anchor: String,
        referencing: String,
    },

    /// A segment of a reference key is missing from the registry
    #[error("Unknown reference '{reference}': segment '{segment}' not found")]
    UnknownReference { reference: String, segment: String },

    /// No `oneOf` variant produced a concrete sample
    #[error("Unable to create sample element: \n {schema}")]
    UnresolvableExample { schema: String },

    /// A reference target exists but is not a schema object
    #[error("Reference '{reference}' does not point to a schema: {source}")]
    InvalidSchema {
        reference: String,
        source: serde_json::Error,
    },

    /// Document read errors
    #[error("Failed to read document '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML document '{path}': {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON document '{path}': {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl SchemaError {
    /// Create an unsupported input error
    pub fn unsupported_input(reason: impl Into<String>) -> Self {
        Self::UnsupportedInput {
            reason: reason.into(),
        }
    }

    /// Create an unknown ref target error
    pub fn unknown_ref_target(
        file: impl Into<String>,
        anchor: impl Into<String>,
        referencing: impl Into<String>,
    ) -> Self {
        Self::UnknownRefTarget {
            file: file.into(),
            anchor: anchor.into(),
            referencing: referencing.into(),
        }
    }

    /// Create an unknown reference error
    pub fn unknown_reference(reference: impl Into<String>, segment: impl Into<String>) -> Self {
        Self::UnknownReference {
            reference: reference.into(),
            segment: segment.into(),
        }
    }

    /// Create an unresolvable example error, embedding the offending schema
    pub fn unresolvable_example(schema: &serde_json::Value) -> Self {
        let schema = serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());
        Self::UnresolvableExample { schema }
    }

    /// Create an I/O error
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a YAML parse error
    pub fn yaml_parse_error(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::YamlParse {
            path: path.into(),
            source,
        }
    }

    /// Create a JSON parse error
    pub fn json_parse_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::JsonParse {
            path: path.into(),
            source,
        }
    }

    /// Whether the error signals out-of-scope input
    pub fn is_unsupported_input(&self) -> bool {
        matches!(self, Self::UnsupportedInput { .. })
    }

    /// Whether the error is a missing reference target
    pub fn is_unknown_target(&self) -> bool {
        matches!(
            self,
            Self::UnknownRefTarget { .. } | Self::UnknownReference { .. }
        )
    }

    /// Document path attached to the error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } | Self::YamlParse { path, .. } | Self::JsonParse { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}
