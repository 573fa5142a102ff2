//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

mod completions;
mod example;
mod merge;
mod render;

pub use completions::handle_completions;
pub use example::handle_example;
pub use merge::handle_merge;
pub use render::{handle_body, handle_render};

use crate::cli::SchemaArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use schemadoc_core::{ReferenceResolver, RenderMode};
use serde_json::{json, Value};
use std::path::Path;
use tracing::debug;

/// Load and resolve the document set rooted at `path`
pub(crate) fn load_document(path: &Path) -> Result<ReferenceResolver> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let _timer = Timer::with_details("load_document", &path.display().to_string());
    let refs = ReferenceResolver::from_file(path.to_string_lossy())?;
    debug!(documents = refs.documents().len(), "Document set loaded");

    Ok(refs)
}

/// Canonical reference for the `--schema` argument
///
/// A bare name addresses `#/components/schemas/{name}` of the root document.
pub(crate) fn schema_reference(schema: &str) -> Result<String> {
    let schema = schema.trim();

    if schema.is_empty() {
        return Err(Error::invalid_args("the schema reference must not be empty"));
    }

    if schema.contains('#') {
        Ok(schema.to_string())
    } else {
        Ok(format!("#/components/schemas/{schema}"))
    }
}

/// The document, the `$ref` schema and the mode a command works on
pub(crate) struct Target {
    pub refs: ReferenceResolver,
    pub schema: Value,
    pub mode: RenderMode,
}

impl Target {
    /// Load the document and check that the schema reference exists
    pub(crate) fn load(args: &SchemaArgs, config: &Config) -> Result<Self> {
        let reference = schema_reference(&args.schema)?;
        let refs = load_document(&args.document)?;
        refs.get(&reference)?;

        let mode = args.mode.map(RenderMode::from).unwrap_or(config.render.mode);
        debug!(reference = %reference, mode = %mode, "Target resolved");

        Ok(Self {
            refs,
            schema: json!({ "$ref": reference }),
            mode,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;

    pub(crate) const PETSTORE: &str = r##"openapi: 3.0.0
components:
  schemas:
    Pet:
      type: object
      required: [name]
      properties:
        name:
          type: string
          example: Rex
        owner:
          $ref: "#/components/schemas/Owner"
        secret:
          type: string
          writeOnly: true
    Owner:
      type: object
      properties:
        id:
          type: integer
          readOnly: true
          example: 7
"##;

    /// Write the pet store document into a fresh directory
    pub(crate) fn petstore() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openapi.yaml");
        std::fs::write(&path, PETSTORE).unwrap();
        (dir, path)
    }

    pub(crate) fn target_args(document: PathBuf, schema: &str) -> SchemaArgs {
        SchemaArgs {
            document,
            schema: schema.to_string(),
            mode: None,
        }
    }

    #[test]
    fn test_schema_reference() {
        assert_eq!(schema_reference("Pet").unwrap(), "#/components/schemas/Pet");
        assert_eq!(schema_reference("#/definitions/Pet").unwrap(), "#/definitions/Pet");
        assert!(schema_reference("  ").unwrap_err().should_show_help());
    }

    #[test]
    fn test_missing_document() {
        let error = load_document(Path::new("/nonexistent/openapi.yaml")).unwrap_err();
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_target_mode_falls_back_to_config() {
        let (_dir, path) = petstore();
        let mut config = Config::default();
        config.render.mode = RenderMode::Write;

        let target = Target::load(&target_args(path.clone(), "Pet"), &config).unwrap();
        assert_eq!(target.mode, RenderMode::Write);
        assert_eq!(target.schema, json!({"$ref": "#/components/schemas/Pet"}));

        let mut args = target_args(path, "Pet");
        args.mode = Some(crate::cli::Mode::Read);
        assert_eq!(Target::load(&args, &config).unwrap().mode, RenderMode::Read);
    }

    #[test]
    fn test_unknown_schema_is_an_error() {
        let (_dir, path) = petstore();
        let error = Target::load(&target_args(path, "Missing"), &Config::default())
            .err()
            .unwrap();
        assert_eq!(error.exit_code(), 2);
    }
}
