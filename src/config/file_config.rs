//! Configuration file support for cer-citations.
//!
//! This module reads and writes the TOML configuration file.
//!
//! # Configuration File Format
//!
//! ```toml
//! [scanner]
//! max_matches = 50
//! query_size_limit = 1048576
//! # pattern = '\[(?P<document>[^,]+),\s*pg\s*(?P<page>[0-9]+),\s*para\s*(?P<paragraph>[0-9]+)\]'
//!
//! [highlights]
//! "SOC 2 Type II Report-p12-para3" = "Logical access to production systems is restricted"
//! "Access Control Policy" = "Access reviews are performed quarterly"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use std::path::Path;

use super::Config;
use crate::scanner::HighlightTable;

/// Load configuration from a TOML file, without environment overrides
pub fn load_file(path: &Path) -> Result<Config, ConfigFileError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io(e.to_string()))?;

    toml::from_str(&content).map_err(|e| ConfigFileError::Parse(e.to_string()))
}

/// Save configuration to a TOML file, creating parent directories
pub fn save_file(config: &Config, path: &Path) -> Result<(), ConfigFileError> {
    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    }
    std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
}

/// Starter configuration written by `config init`
pub fn sample_config() -> Config {
    Config {
        highlights: HighlightTable::new()
            .with_entry(
                "SOC 2 Type II Report-p12-para3",
                "Logical access to production systems is restricted",
            )
            .with_entry(
                "Access Control Policy",
                "Access reviews are performed quarterly",
            )
            .with_entry(
                "Incident Response Plan-p4-para2",
                "within 72 hours of discovery",
            ),
        ..Config::default()
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
