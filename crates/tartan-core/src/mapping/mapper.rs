//! Mapping executor
//!
//! Applies a compiled mapping table to one source record: every rule reads
//! its source path and, when a value is present, writes a copy at its
//! destination path. Absent sources are skipped rather than written as
//! `null`, and later rules overwrite earlier ones on colliding destinations.
//!
//! Copyright (c) 2025 Tartan Team
//! Licensed under the Apache-2.0 license

use super::report::{SkipReason, SkippedEntry, TransformReport, Transformation};
use super::table::{CompiledTable, MappingEntry, MappingTable};
use crate::path::{read, write};
use crate::Tree;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Applies a compiled table to source records
///
/// The mapper borrows its table and holds no other state, so one mapper can
/// be shared across threads and reused for any number of records.
#[derive(Debug, Clone, Copy)]
pub struct Mapper<'a> {
    table: &'a CompiledTable,
}

impl<'a> Mapper<'a> {
    /// Create a new mapper over a compiled table
    pub fn new(table: &'a CompiledTable) -> Self {
        Self { table }
    }

    /// The table this mapper applies
    pub fn table(&self) -> &'a CompiledTable {
        self.table
    }

    /// Transform one record, returning the destination and what was skipped
    pub fn apply(&self, source: &Tree) -> Transformation {
        let mut document = Value::Object(Map::new());
        let mut report = TransformReport {
            applied: 0,
            skipped: self.table.invalid.clone(),
        };

        for rule in &self.table.rules {
            match read(source, &rule.source) {
                Some(value) => {
                    write(&mut document, &rule.destination, value.clone());
                    report.applied += 1;
                }
                None => {
                    trace!(
                        entry = rule.index,
                        source_path = %rule.source,
                        "Source value absent, skipping entry"
                    );
                    report.skipped.push(SkippedEntry {
                        index: rule.index,
                        source_path: rule.source.to_string(),
                        dest_path: rule.destination.to_string(),
                        reason: SkipReason::SourceAbsent,
                    });
                }
            }
        }

        report.skipped.sort_by_key(|entry| entry.index);

        debug!(
            table = self.table.name.as_deref().unwrap_or("<unnamed>"),
            applied = report.applied,
            skipped = report.skipped.len(),
            "Record transformed"
        );

        Transformation { document, report }
    }

    /// Transform one record and keep only the destination document
    pub fn apply_document(&self, source: &Tree) -> Tree {
        self.apply(source).document
    }
}

/// Transform `source` with an uncompiled list of entries
///
/// Malformed entries are logged and skipped; the call itself never fails.
pub fn transform(source: &Tree, entries: &[MappingEntry]) -> Tree {
    let table = MappingTable {
        name: None,
        entries: entries.to_vec(),
    };
    let compiled = table.compile();
    Mapper::new(&compiled).apply_document(source)
}
