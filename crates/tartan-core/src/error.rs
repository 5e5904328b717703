//! Error types for the Tartan core library
//!
//! This module defines the error handling for Tartan, using thiserror for
//! error definitions.

use crate::mapping::SkippedEntry;
use crate::path::PathError;
use thiserror::Error;

/// Main error type for Tartan operations
#[derive(Error, Debug)]
pub enum Error {
    /// A path expression failed to parse
    #[error("Invalid path: {0}")]
    Path(#[from] PathError),

    /// A mapping table contained one or more unusable entries
    #[error("Invalid mapping table: {message}")]
    InvalidMappingTable {
        message: String,
        errors: Vec<SkippedEntry>,
    },

    /// A built-in table was requested by an unknown name
    #[error("Unknown mapping table '{name}' (available: {available})")]
    UnknownTable { name: String, available: String },

    /// A document had a shape the operation cannot handle
    #[error("Unexpected document shape: {message}")]
    InvalidDocument { message: String },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid document error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}
