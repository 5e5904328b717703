//! Tartan Core - path-mapped transformation of HR records
//!
//! This crate rewrites records from a provider's JSON shape into a unified
//! schema, driven by a declarative table of path-to-path mappings.
//!
//! # Main Components
//!
//! - **Paths**: parsing of dotted/indexed path expressions and reading or
//!   writing trees by path
//! - **Mapping tables**: serde-loadable tables, compiled once per use
//! - **Mapper**: applies a compiled table to a record, skipping absent values
//! - **Batch**: applies one table to many records in parallel
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tartan_core::mapping::{Mapper, MappingTable};
//!
//! let table = MappingTable::new()
//!     .with_entry("a.b[0].c", "x.y[2].z")
//!     .compile();
//! let result = Mapper::new(&table).apply(&json!({"a": {"b": [{"c": 5}]}}));
//!
//! assert_eq!(result.document, json!({"x": {"y": [{}, {}, {"z": 5}]}}));
//! ```

pub mod error;
pub mod mapping;
pub mod path;

pub use error::{Error, Result};
pub use mapping::{
    transform, transform_batch, CompiledTable, MappingEntry, MappingTable, Mapper, Transformation,
};
pub use path::{Path, PathError, Segment};

/// The universal document representation for source and destination records
pub type Tree = serde_json::Value;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
