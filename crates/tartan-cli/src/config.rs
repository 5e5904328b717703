//! Configuration management for the CLI
//!
//! Configuration comes from the `--config` argument (or `TARTAN_CONFIG`)
//! when given. Otherwise `<config_dir>/tartan/config.{yaml,json,toml}` is
//! read and a project file (`.tartan.yaml`, `.tartan.yml`, `.tartan.json`
//! or `.tartan.toml` in the working directory) is merged over it.
//!
//! Missing sections fall back to their defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mapping table file used by `transform` when none is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_mappings: Option<PathBuf>,

    /// Built-in table used by `transform` when no table file applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_builtin: Option<String>,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output when the terminal supports it
    pub color: bool,

    /// Show a spinner while transforming batches
    pub progress: bool,

    /// Pretty-print transformed documents
    pub pretty: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given (trace, debug, info, warn, error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: String,

    /// Log file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
            pretty: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: "compact".to_string(),
            file: None,
        }
    }
}

/// Serialization formats a configuration file may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Yaml,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_str_with_format(&content, FileFormat::from_path(path)).map_err(|e| {
            Error::config(format!("Failed to load {}: {}", path.display(), e))
        })
    }

    fn from_str_with_format(content: &str, format: FileFormat) -> Result<Self> {
        let config = match format {
            FileFormat::Yaml => serde_yaml::from_str(content)?,
            FileFormat::Toml => toml::from_str(content)?,
            FileFormat::Json => serde_json::from_str(content)?,
        };
        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// A user-level file is read first and a project file in the working
    /// directory is merged over it.
    pub fn load() -> Result<Self> {
        let mut config = match first_existing(Self::user_config_paths()) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(path) = first_existing(Self::project_config_paths()) {
            config.merge(Self::from_file(&path)?);
        }

        Ok(config)
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// The most specific configuration file that would be read
    pub fn resolve_path(file: Option<&Path>) -> Option<PathBuf> {
        match file {
            Some(path) => Some(path.to_path_buf()),
            None => first_existing(Self::project_config_paths())
                .or_else(|| first_existing(Self::user_config_paths())),
        }
    }

    fn project_config_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from(".tartan.yaml"),
            PathBuf::from(".tartan.yml"),
            PathBuf::from(".tartan.json"),
            PathBuf::from(".tartan.toml"),
        ]
    }

    fn user_config_paths() -> Vec<PathBuf> {
        match dirs::config_dir() {
            Some(config_dir) => {
                let tartan_dir = config_dir.join("tartan");
                vec![
                    tartan_dir.join("config.yaml"),
                    tartan_dir.join("config.json"),
                    tartan_dir.join("config.toml"),
                ]
            }
            None => Vec::new(),
        }
    }

    /// Merge with another config (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.default_mappings.is_some() {
            self.default_mappings = other.default_mappings;
        }
        if other.default_builtin.is_some() {
            self.default_builtin = other.default_builtin;
        }
        if other.logging.level.is_some() {
            self.logging.level = other.logging.level;
        }
        if other.logging.file.is_some() {
            self.logging.file = other.logging.file;
        }
        self.logging.format = other.logging.format;
        self.output = other.output;
    }
}

fn first_existing(paths: Vec<PathBuf>) -> Option<PathBuf> {
    paths.into_iter().find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.default_mappings.is_none());
        assert!(config.default_builtin.is_none());
        assert!(config.output.color);
        assert!(config.output.progress);
        assert!(!config.output.pretty);
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "default_builtin: adp-employee\noutput:\n  pretty: true\nlogging:\n  level: debug\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.default_builtin.as_deref(), Some("adp-employee"));
        assert!(config.output.pretty);
        assert!(config.output.color);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "default_mappings = \"tables/adp.json\"\n\n[output]\ncolor = false\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.default_mappings, Some(PathBuf::from("tables/adp.json")));
        assert!(!config.output.color);
    }

    #[test]
    fn test_from_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"logging": {"format": "json"}}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/tartan.yaml"));
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert_eq!(err.exit_code(), 5);
        assert!(err.to_string().contains("config.json"));
    }

    #[test]
    fn test_resolve_path_prefers_explicit_file() {
        let explicit = Path::new("custom.yaml");
        assert_eq!(Config::resolve_path(Some(explicit)), Some(PathBuf::from("custom.yaml")));
    }

    #[test]
    fn test_merge() {
        let mut base = Config {
            default_builtin: Some("adp-employee".to_string()),
            ..Config::default()
        };
        let other = Config {
            default_mappings: Some(PathBuf::from("table.json")),
            output: OutputConfig {
                pretty: true,
                ..OutputConfig::default()
            },
            ..Config::default()
        };

        base.merge(other);
        assert_eq!(base.default_builtin.as_deref(), Some("adp-employee"));
        assert_eq!(base.default_mappings, Some(PathBuf::from("table.json")));
        assert!(base.output.pretty);
    }

    #[test]
    fn test_roundtrip_toml() {
        let config = Config {
            default_builtin: Some("adp-employee".to_string()),
            ..Config::default()
        };
        let text = toml::to_string(&config).unwrap();
        let parsed = Config::from_str_with_format(&text, FileFormat::Toml).unwrap();
        assert_eq!(parsed, config);
    }
}
