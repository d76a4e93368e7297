//! # struct_schema
//!
//! Generates a JSON Schema document describing the JSON serialization of a Rust
//! type. Types describe themselves through [`SchemaType`], normally derived:
//!
//! ```ignore
//! use struct_schema::SchemaType;
//!
//! #[derive(SchemaType)]
//! struct Order {
//!     #[schema(required, min_length = 3)]
//!     id:       String,
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     note:     Option<String>,
//!     quantity: u32,
//! }
//!
//! let text = struct_schema::generate::<Order>()?;
//! ```
//!
//! Every node is nullable, records are closed (`additionalProperties: false`),
//! nested records are inlined, and a record that contains itself is reported
//! as [`Error::CyclicType`].

mod builder;
mod classify;
mod document;
mod error;
mod generator;
mod impls;
mod json_schema;
mod property;
mod shape;
mod validators;

pub use builder::{DEFAULT_MAX_DEPTH, SchemaBuilder};
pub use classify::{Classification, Classifier, DATE, DATE_TIME, FormatRule, TIME, UUID};
pub use document::Document;
pub use error::{Error, Result};
pub use generator::{Generator, document, generate};
pub use json_schema::{
    Annotation, DEFAULT_SCHEMA, ENUM_DELIMITER, JsonSchemaType, SKIP_MARKER, WILDCARD_KEY,
};
pub use property::{ConstValue, Property, TypeSet};
pub use shape::{Annotations, FieldShape, SchemaType, ShapeKind, StructuralKind, TypeShape};
pub use struct_schema_macros::SchemaType;
