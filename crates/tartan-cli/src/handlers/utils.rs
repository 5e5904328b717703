//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tartan_core::mapping::builtin::{self, ADP_EMPLOYEE};
use tartan_core::mapping::MappingTable;
use tartan_core::Tree;
use tracing::debug;

/// Where a mapping table came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// A table file
    File(PathBuf),
    /// A table shipped with tartan-core
    Builtin(String),
}

impl fmt::Display for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::File(path) => write!(f, "{}", path.display()),
            TableSource::Builtin(name) => write!(f, "built-in table '{}'", name),
        }
    }
}

impl TableSource {
    /// Pick the table to use
    ///
    /// Command-line choices win over the configured defaults, and a file
    /// wins over a built-in name at each level. With nothing configured the
    /// ADP employee table is used.
    pub fn resolve(mappings: Option<&Path>, builtin: Option<&str>, config: &Config) -> Self {
        if let Some(path) = mappings {
            return TableSource::File(path.to_path_buf());
        }
        if let Some(name) = builtin {
            return TableSource::Builtin(name.to_string());
        }
        if let Some(path) = &config.default_mappings {
            return TableSource::File(path.clone());
        }
        TableSource::Builtin(
            config
                .default_builtin
                .clone()
                .unwrap_or_else(|| ADP_EMPLOYEE.to_string()),
        )
    }

    /// Load the table this source names
    pub async fn load(&self) -> Result<MappingTable> {
        match self {
            TableSource::File(path) => load_table_file(path).await,
            TableSource::Builtin(name) => Ok(builtin::lookup(name)?),
        }
    }
}

/// Whether a file should be read as YAML (by extension)
pub fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Read a JSON or YAML document from disk
pub async fn read_document(path: &Path) -> Result<Tree> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = tokio::fs::read_to_string(path).await?;
    debug!(path = %path.display(), bytes = content.len(), "Read document");

    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: format!("YAML ({})", e),
        })
    } else {
        serde_json::from_str(&content).map_err(|e| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: format!("JSON ({})", e),
        })
    }
}

/// Load a mapping table file (JSON or YAML)
pub async fn load_table_file(path: &Path) -> Result<MappingTable> {
    let document = read_document(path).await?;
    Ok(MappingTable::from_value(document)?)
}

/// Write text to a file, creating parent directories as needed
pub async fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}
