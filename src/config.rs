//! Settings for the client and the CLI
//!
//! Settings are read from a YAML file (JSON is accepted too, being a YAML
//! subset). Every field has a default, so an empty file is valid.
//!
//! ```yaml
//! flatten:
//!   layers: 3
//!   drop_deeper: true
//! search_limit_cap: 1000
//! fixtures: ./recorded
//! output:
//!   compression: zstd
//! ```

use crate::error::{Error, Result};
use crate::flatten::FlattenOptions;
use crate::table::{Compression, ParquetWriterConfig};
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum number of results the user search endpoint returns
pub const DEFAULT_SEARCH_LIMIT_CAP: usize = 1000;

// ============================================================================
// Top-Level Settings
// ============================================================================

/// Complete settings loaded from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Flattening applied to full API objects (users, statuses, lists)
    #[serde(default = "FlattenOptions::full")]
    pub flatten: FlattenOptions,

    /// Limit above which search calls log an advisory warning
    #[serde(default = "default_search_limit_cap")]
    pub search_limit_cap: usize,

    /// Fixture directory for the replay client
    #[serde(default)]
    pub fixtures: Option<PathBuf>,

    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,

    /// Log level for the CLI
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_search_limit_cap() -> usize {
    DEFAULT_SEARCH_LIMIT_CAP
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            flatten: FlattenOptions::full(),
            search_limit_cap: DEFAULT_SEARCH_LIMIT_CAP,
            fixtures: None,
            output: OutputSettings::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a YAML (or JSON) string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = if content.trim().is_empty() {
            Settings::default()
        } else {
            serde_yaml::from_str(content)?
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read settings file '{}': {e}",
                    path.display()
                ))
            }
        })?;
        Self::from_yaml(&content)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.search_limit_cap == 0 {
            return Err(Error::invalid_value(
                "search_limit_cap",
                "must be greater than zero",
            ));
        }
        if self.output.row_group_size == 0 {
            return Err(Error::invalid_value(
                "output.row_group_size",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Parquet writer configuration for these settings
    pub fn parquet_config(&self) -> ParquetWriterConfig {
        ParquetWriterConfig::new()
            .with_compression(self.output.compression)
            .with_row_group_size(self.output.row_group_size)
    }
}

// ============================================================================
// Output Settings
// ============================================================================

/// Parquet output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Compression codec
    #[serde(default)]
    pub compression: Compression,

    /// Rows per row group
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

fn default_row_group_size() -> usize {
    1024 * 1024
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            row_group_size: default_row_group_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.flatten, FlattenOptions::full());
        assert_eq!(settings.search_limit_cap, 1000);
        assert!(settings.fixtures.is_none());
        assert_eq!(settings.output.compression, Compression::Snappy);
    }

    #[test]
    fn test_empty_content_is_default() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
        assert_eq!(Settings::from_yaml("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r"
flatten:
  layers: 2
  drop_deeper: false
search_limit_cap: 500
fixtures: ./recorded
output:
  compression: zstd
log_level: debug
";
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.flatten, FlattenOptions::new(2, false));
        assert_eq!(settings.search_limit_cap, 500);
        assert_eq!(settings.fixtures, Some(PathBuf::from("./recorded")));
        assert_eq!(settings.output.compression, Compression::Zstd);
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert_eq!(settings.parquet_config().compression(), Compression::Zstd);
    }

    #[test]
    fn test_parse_json() {
        let settings = Settings::from_yaml(r#"{"flatten": {"layers": 5}}"#).unwrap();
        assert_eq!(settings.flatten, FlattenOptions::new(5, true));
    }

    #[test]
    fn test_invalid_values() {
        let err = Settings::from_yaml("search_limit_cap: 0").unwrap_err();
        assert!(err.to_string().contains("search_limit_cap"));

        let err = Settings::from_yaml("output:\n  row_group_size: 0").unwrap_err();
        assert!(err.to_string().contains("row_group_size"));

        assert!(Settings::from_yaml("flatten: [1, 2]").is_err());
    }

    #[test]
    fn test_from_missing_file() {
        let err = Settings::from_file("/no/such/settings.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "search_limit_cap: 10\n").unwrap();
        assert_eq!(Settings::from_file(&path).unwrap().search_limit_cap, 10);
    }
}
