//! # Schema Module
//!
//! Structural schema generation for API documentation.
//!
//! The schema module derives an OpenAPI-style schema object from the shape of a
//! Rust type. A type describes itself through the [`Reflect`] trait, which
//! returns a [`Shape`] tree (primitives, structs with tagged fields, lists,
//! maps). The compiler walks that tree and produces a [`Schema`] value that
//! serializes to the documentation JSON the response layer embeds.
//!
//! ## Overview
//!
//! - [`Schema`] / [`SchemaKind`] / [`SchemaFormat`] - the serializable schema
//!   object (`type`, `format`, `properties`, `required`, `items`,
//!   `additionalProperties`, `description`, `example`)
//! - [`Reflect`] / [`Shape`] / [`FieldShape`] - the structural description a
//!   type provides, including serde-style field tags
//! - [`compile`] / [`generate`] - the pure recursive walk from shape to schema
//!
//! ## Example
//!
//! ```rust
//! use routedoc::schema::{self, FieldShape, Reflect, Shape};
//!
//! struct Pet {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl Reflect for Pet {
//!     fn shape() -> Shape {
//!         Shape::Struct(vec![
//!             FieldShape::new("id", Shape::Int64).validate("required"),
//!             FieldShape::new("name", Shape::Str),
//!         ])
//!     }
//! }
//!
//! let docs = schema::generate::<Pet>("schema");
//! assert!(docs.contains_key("schema"));
//! ```
//!
//! The walk is a pure function of the type's shape and tags: no live value is
//! required, optional fields reflect as their pointee, and unsupported shapes
//! silently produce no entry (absence means "not representable", not failure).

mod compile;
mod reflect;
mod types;

pub use compile::{compile, generate, generate_for, MAP_VALUE_PLACEHOLDER};
pub use reflect::{FieldShape, Reflect, Shape};
pub use types::{Schema, SchemaFormat, SchemaKind};
