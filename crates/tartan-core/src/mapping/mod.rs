//! Table-driven record transformation
//!
//! This module turns source records into destination documents using a
//! declarative table of path-to-path mappings.
//!
//! Copyright (c) 2025 Tartan Team
//! Licensed under the Apache-2.0 license

pub mod batch;
pub mod builtin;
pub mod mapper;
pub mod report;
pub mod table;

pub use batch::{records_from_document, transform_batch};
pub use mapper::{transform, Mapper};
pub use report::{SkipReason, SkippedEntry, TransformReport, Transformation};
pub use table::{CompiledRule, CompiledTable, MappingEntry, MappingTable};
