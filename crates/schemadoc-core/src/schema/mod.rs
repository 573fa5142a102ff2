//! Schema model, normalization and reference-chain traversal
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod model;
pub mod normalize;
pub mod traverse;

pub use model::{AdditionalProperties, Combinator, Items, Schema, SchemaType};
pub use normalize::normalize;
pub use traverse::{resolve_ref, traverse_schema_refs, LabeledRef, NoRefs, RefResolver, ResolvedRef};
