//! Schemadoc Core - JSON Schema to markdown documentation engine
//!
//! This crate turns the schemas of an OpenAPI / JSON Schema document set
//! into markdown fragments ready to be embedded in documentation pages.
//!
//! # Main Components
//!
//! - **Reference resolution**: load documents, canonicalize `$ref`s across
//!   files and fold reference graphs into self-contained schemas
//! - **Normalization**: rewrite a schema into the shape the renderer expects
//! - **Rendering**: block-based markdown output with disclosure blocks and
//!   property tables, plus a page session that emits linked entity sections
//! - **Examples**: explicit example collection and example synthesis
//!
//! # Example
//!
//! ```no_run
//! use schemadoc_core::{ReferenceResolver, RenderMode, Renderer, SchemaResult};
//! use serde_json::json;
//!
//! fn example() -> SchemaResult<()> {
//!     let refs = ReferenceResolver::from_file("spec/openapi.yaml")?;
//!     let session = Renderer::new(&refs);
//!
//!     let schema = json!({"$ref": "#/components/schemas/User"});
//!     let table = session.table(&schema, RenderMode::Read)?;
//!     let sections = session.refs(RenderMode::Read)?;
//!
//!     println!("{table}\n\n{}", sections.join("\n\n"));
//!     Ok(())
//! }
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod example;
pub mod markdown;
pub mod refs;
pub mod render;
pub mod schema;

// Re-export main types for convenience
pub use error::{SchemaError, SchemaResult};
pub use example::{sample_object, ExampleGenerator};
pub use refs::{
    merge_schema, DocumentSource, FsSource, MemorySource, MergedSchema, ReferenceResolver,
};
pub use render::{
    format_example, render_schema, Block, ExpandType, I18nLabels, I18nOverrides, RenderContext,
    RenderMode, RenderOptions, Renderer, RendererConfig, SchemaRenderer,
};
pub use schema::{normalize, NoRefs, RefResolver, ResolvedRef, Schema};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
