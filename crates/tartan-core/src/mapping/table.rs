//! Mapping tables
//!
//! A mapping table is an ordered list of `source_path -> dest_path` entries,
//! usually loaded from external configuration. Compiling a table parses every
//! path exactly once; entries with malformed paths are set aside as
//! configuration errors instead of failing the whole table.
//!
//! Copyright (c) 2025 Tartan Team
//! Licensed under the Apache-2.0 license

use super::report::{SkipReason, SkippedEntry};
use crate::path::Path;
use crate::{Error, Result, Tree};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One row of a mapping table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Path to read from the source document
    #[serde(rename = "source_path")]
    pub source: String,
    /// Path to write in the destination document
    #[serde(rename = "dest_path", alias = "unified_path", alias = "destination")]
    pub destination: String,
    /// Free-form note for table maintainers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MappingEntry {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// On-disk forms a table may take: an object with `entries`, or a bare list
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTable {
    Named {
        #[serde(default)]
        name: Option<String>,
        entries: Vec<MappingEntry>,
    },
    Entries(Vec<MappingEntry>),
}

impl From<RawTable> for MappingTable {
    fn from(raw: RawTable) -> Self {
        match raw {
            RawTable::Named { name, entries } => Self { name, entries },
            RawTable::Entries(entries) => Self { name: None, entries },
        }
    }
}

/// An ordered list of mapping entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTable")]
pub struct MappingTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub entries: Vec<MappingEntry>,
}

impl MappingTable {
    /// Create an empty, unnamed table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            entries: Vec::new(),
        }
    }

    /// Append an entry (builder style)
    pub fn with_entry(mut self, source: impl Into<String>, destination: impl Into<String>) -> Self {
        self.entries.push(MappingEntry::new(source, destination));
        self
    }

    /// Append an entry
    pub fn push(&mut self, entry: MappingEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a table from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a table from an already decoded JSON value
    pub fn from_value(value: Tree) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Load a table from a JSON file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse every path once, setting aside malformed entries
    pub fn compile(&self) -> CompiledTable {
        let mut rules = Vec::with_capacity(self.entries.len());
        let mut invalid = Vec::new();

        for (index, entry) in self.entries.iter().enumerate() {
            match compile_entry(index, entry) {
                Ok(rule) => rules.push(rule),
                Err(skipped) => {
                    warn!(
                        table = self.name.as_deref().unwrap_or("<unnamed>"),
                        entry = index,
                        source_path = %entry.source,
                        dest_path = %entry.destination,
                        reason = %skipped.reason,
                        "Skipping malformed mapping entry"
                    );
                    invalid.push(skipped);
                }
            }
        }

        CompiledTable {
            name: self.name.clone(),
            rules,
            invalid,
        }
    }

    /// Fail if any entry has a malformed path
    pub fn validate(&self) -> Result<()> {
        let compiled = self.compile();
        if compiled.is_valid() {
            return Ok(());
        }

        Err(Error::InvalidMappingTable {
            message: format!(
                "{} of {} entries have malformed paths",
                compiled.invalid.len(),
                self.entries.len()
            ),
            errors: compiled.invalid,
        })
    }
}

impl<S, D> FromIterator<(S, D)> for MappingTable
where
    S: Into<String>,
    D: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, D)>>(iter: I) -> Self {
        Self {
            name: None,
            entries: iter
                .into_iter()
                .map(|(source, destination)| MappingEntry::new(source, destination))
                .collect(),
        }
    }
}

fn compile_entry(index: usize, entry: &MappingEntry) -> std::result::Result<CompiledRule, SkippedEntry> {
    let skipped = |reason| SkippedEntry {
        index,
        source_path: entry.source.clone(),
        dest_path: entry.destination.clone(),
        reason,
    };

    let source = Path::parse(&entry.source).map_err(|e| {
        skipped(SkipReason::InvalidSourcePath {
            message: e.to_string(),
        })
    })?;
    let destination = Path::parse(&entry.destination).map_err(|e| {
        skipped(SkipReason::InvalidDestinationPath {
            message: e.to_string(),
        })
    })?;

    Ok(CompiledRule {
        index,
        source,
        destination,
        description: entry.description.clone(),
    })
}

/// A table entry whose paths have been parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRule {
    /// Position of the entry in its table
    pub index: usize,
    pub source: Path,
    pub destination: Path,
    pub description: Option<String>,
}

/// A mapping table ready to be applied to records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledTable {
    pub name: Option<String>,
    /// Usable entries, in table order
    pub rules: Vec<CompiledRule>,
    /// Entries rejected because of malformed paths
    pub invalid: Vec<SkippedEntry>,
}

impl CompiledTable {
    /// Whether every entry compiled
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Entries rejected at compile time
    pub fn errors(&self) -> &[SkippedEntry] {
        &self.invalid
    }

    /// Destination paths fed by `source`, in table order
    pub fn destinations_for<'a>(&'a self, source: &'a Path) -> impl Iterator<Item = &'a Path> + 'a {
        self.rules
            .iter()
            .filter(move |rule| &rule.source == source)
            .map(|rule| &rule.destination)
    }

    /// Whether any rule reads from `source`
    pub fn has_mapping(&self, source: &Path) -> bool {
        self.rules.iter().any(|rule| &rule.source == source)
    }
}
