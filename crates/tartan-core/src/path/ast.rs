//! Typed path representation
//!
//! A [`Path`] is a non-empty sequence of [`Segment`]s. Each segment names a
//! field of a mapping and may select one element of the sequence stored
//! under that field.
//!
//! Copyright (c) 2025 Tartan Team
//! Licensed under the Apache-2.0 license

use super::error::PathError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Largest sequence index a path may select
///
/// Writes pad sequences with placeholders up to the index, so the bound also
/// caps how much a single write can allocate.
pub const MAX_INDEX: usize = 1_000_000;

/// One step of a path: a field name plus an optional sequence index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Field name, matching `[A-Za-z0-9_]+`
    pub name: String,
    /// Element within the sequence stored under `name`
    pub index: Option<usize>,
}

impl Segment {
    /// Create a plain field segment (`name`)
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    /// Create an indexed segment (`name[index]`)
    pub fn indexed(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index: Some(index),
        }
    }

    /// Whether this segment selects a sequence element
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// Check this segment against the path grammar
    ///
    /// `position` is the segment's byte offset within `input`, the rendered
    /// path it belongs to.
    fn validate(&self, position: usize, input: &str) -> Result<(), PathError> {
        if self.name.is_empty() {
            return Err(PathError::empty_segment(position, input));
        }

        if let Some((offset, ch)) = self
            .name
            .char_indices()
            .find(|&(_, ch)| !super::parser::is_identifier_char(ch))
        {
            return Err(PathError::syntax(
                "Invalid character in field name",
                position + offset,
                input,
                vec!["letter, digit or _".to_string()],
                ch.to_string(),
            ));
        }

        match self.index {
            Some(index) if index > MAX_INDEX => Err(PathError::invalid_index(
                index.to_string(),
                position + self.name.len(),
                input,
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.name, index),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A parsed, validated path such as `salaries[0].deductionDetails[1].amount`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Build a path from segments
    ///
    /// Rejects an empty list, names outside `[A-Za-z0-9_]+` and indices
    /// above [`MAX_INDEX`], so every `Path` renders to a string that parses
    /// back to itself.
    pub fn new(segments: Vec<Segment>) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::Empty);
        }

        let path = Self { segments };
        let input = path.to_string();
        let mut position = 0;
        for segment in &path.segments {
            segment.validate(position, &input)?;
            position += segment.to_string().len() + 1;
        }

        Ok(path)
    }

    /// Parse a path string
    pub fn parse(input: &str) -> Result<Self, PathError> {
        super::parser::Parser::new(input)?.parse()
    }

    /// All segments, in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments (always at least 1)
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: a path has at least one segment
    pub fn is_empty(&self) -> bool {
        false
    }

    /// First segment
    pub fn first(&self) -> &Segment {
        &self.segments[0]
    }

    /// Terminal segment
    pub fn last(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    /// The path without its terminal segment, or `None` for a single segment
    pub fn parent(&self) -> Option<Path> {
        if self.segments.len() == 1 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// A new path extended by one segment
    pub fn child(&self, segment: Segment) -> Result<Path, PathError> {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self::new(segments)
    }

    /// Whether `prefix` is a leading run of this path's segments
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Path {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Path::parse(&raw).map_err(serde::de::Error::custom)
    }
}
