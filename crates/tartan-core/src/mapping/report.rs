//! Transformation results and per-entry skip reporting

use crate::Tree;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a mapping entry did not produce a write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The source path failed to parse
    InvalidSourcePath { message: String },
    /// The destination path failed to parse
    InvalidDestinationPath { message: String },
    /// Nothing was reachable at the source path
    SourceAbsent,
}

impl SkipReason {
    /// Whether this skip comes from a malformed table entry
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, SkipReason::SourceAbsent)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidSourcePath { message } => write!(f, "invalid source path: {}", message),
            SkipReason::InvalidDestinationPath { message } => {
                write!(f, "invalid destination path: {}", message)
            }
            SkipReason::SourceAbsent => write!(f, "source value absent"),
        }
    }
}

/// A mapping entry that was not applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    /// Position of the entry in its table
    pub index: usize,
    pub source_path: String,
    pub dest_path: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry {} ({} -> {}): {}",
            self.index, self.source_path, self.dest_path, self.reason
        )
    }
}

/// Summary of one record's transformation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformReport {
    /// Number of entries that wrote a value
    pub applied: usize,
    /// Entries that were skipped, in table order
    pub skipped: Vec<SkippedEntry>,
}

impl TransformReport {
    /// Entries skipped because the source had no value
    pub fn absent(&self) -> impl Iterator<Item = &SkippedEntry> {
        self.skipped
            .iter()
            .filter(|entry| entry.reason == SkipReason::SourceAbsent)
    }

    /// Entries skipped because of a malformed path
    pub fn invalid(&self) -> impl Iterator<Item = &SkippedEntry> {
        self.skipped
            .iter()
            .filter(|entry| entry.reason.is_configuration_error())
    }

    /// Whether every entry in the table wrote a value
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// The destination document together with its report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub document: Tree,
    pub report: TransformReport,
}

impl Transformation {
    /// Drop the report and keep the document
    pub fn into_document(self) -> Tree {
        self.document
    }
}
