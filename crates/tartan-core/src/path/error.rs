//! Error types for path parsing
//!
//! Parse failures carry the offending input and the byte position at which
//! the grammar was violated so that mapping-table authors can locate the
//! problem quickly.
//!
//! Copyright (c) 2025 Tartan Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Errors produced while turning a path string into a [`Path`](super::Path)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path string was empty
    #[error("Empty path expression")]
    Empty,

    /// A token between two separators was empty (e.g. `a..b`)
    #[error("Empty segment at position {position} in '{input}'")]
    EmptySegment { position: usize, input: String },

    /// Unexpected character while parsing
    #[error("Syntax error at position {position} in '{input}': {message}")]
    Syntax {
        message: String,
        position: usize,
        input: String,
        expected: Vec<String>,
        found: String,
    },

    /// A bracketed index could not be parsed
    #[error("Invalid index '{index}' at position {position} in '{input}'")]
    InvalidIndex {
        index: String,
        position: usize,
        input: String,
    },

    /// A `[` without its closing `]`
    #[error("Unterminated index at position {position} in '{input}'")]
    UnterminatedIndex { position: usize, input: String },
}

impl PathError {
    /// Create a syntax error with what was expected and found
    pub fn syntax(
        message: impl Into<String>,
        position: usize,
        input: impl Into<String>,
        expected: Vec<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::Syntax {
            message: message.into(),
            position,
            input: input.into(),
            expected,
            found: found.into(),
        }
    }

    /// Create an empty segment error
    pub fn empty_segment(position: usize, input: impl Into<String>) -> Self {
        Self::EmptySegment {
            position,
            input: input.into(),
        }
    }

    /// Create an invalid index error
    pub fn invalid_index(index: impl Into<String>, position: usize, input: impl Into<String>) -> Self {
        Self::InvalidIndex {
            index: index.into(),
            position,
            input: input.into(),
        }
    }

    /// Create an unterminated index error
    pub fn unterminated_index(position: usize, input: impl Into<String>) -> Self {
        Self::UnterminatedIndex {
            position,
            input: input.into(),
        }
    }

    /// Byte offset of the failure, if the error has one
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::EmptySegment { position, .. }
            | Self::Syntax { position, .. }
            | Self::InvalidIndex { position, .. }
            | Self::UnterminatedIndex { position, .. } => Some(*position),
        }
    }

    /// The path string that failed to parse
    pub fn input(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::EmptySegment { input, .. }
            | Self::Syntax { input, .. }
            | Self::InvalidIndex { input, .. }
            | Self::UnterminatedIndex { input, .. } => input,
        }
    }

    /// Get the error message with a caret under the failing position
    pub fn detailed_message(&self) -> String {
        let mut result = self.to_string();

        if let Self::Syntax { expected, found, .. } = self {
            result.push_str(&format!("\nExpected one of: {}", expected.join(", ")));
            result.push_str(&format!("\nFound: {}", found));
        }

        let input = self.input();
        if let Some(position) = self.position() {
            if let Some(prefix) = input.get(..position).filter(|_| !input.is_empty()) {
                result.push_str(&format!("\nInput: {}", input));
                result.push_str(&format!("\n       {}^", " ".repeat(prefix.chars().count())));
            }
        }

        result
    }
}
