//! Configuration management.

mod file_config;

pub use file_config::{load_file, sample_config, save_file, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::scanner::{HighlightTable, DEFAULT_QUERY_SIZE_LIMIT, MAX_MATCHES};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "CER_CITATIONS";

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "cer-citations.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Scanner settings
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Highlight snippets keyed by composite key or document name
    #[serde(default)]
    pub highlights: HighlightTable,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scanner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Maximum marker matches processed per call
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,

    /// Custom marker pattern with `document`, `page` and `paragraph` groups
    #[serde(default)]
    pub pattern: Option<String>,

    /// Compiled-size limit for search queries, in bytes
    #[serde(default = "default_query_size_limit")]
    pub query_size_limit: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_matches: default_max_matches(),
            pattern: None,
            query_size_limit: default_query_size_limit(),
        }
    }
}

fn default_max_matches() -> usize {
    MAX_MATCHES
}

fn default_query_size_limit() -> usize {
    DEFAULT_QUERY_SIZE_LIMIT
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `"json"` for structured output, anything else for the default format
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Settings that may be overridden from the environment.
///
/// Highlight keys are free-form document titles, so the table is read
/// straight from the TOML file instead of going through key normalization.
#[derive(Debug, Default, Deserialize)]
struct LayeredSettings {
    #[serde(default)]
    scanner: ScannerConfig,

    #[serde(default)]
    logging: LoggingConfig,
}

/// `CER_CITATIONS_<SECTION>__<KEY>` variables, e.g. `CER_CITATIONS_SCANNER__MAX_MATCHES`
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from a file, with `CER_CITATIONS_*` environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?;

    let layered: LayeredSettings = settings.try_deserialize()?;
    let file = load_file(path).map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;

    tracing::debug!(
        path = %path.display(),
        highlights = file.highlights.len(),
        "Loaded configuration"
    );

    Ok(Config {
        scanner: layered.scanner,
        highlights: file.highlights,
        logging: layered.logging,
    })
}

/// Get the default configuration, with environment overrides applied
pub fn get_config() -> Config {
    let layered = config::Config::builder()
        .add_source(environment())
        .build()
        .and_then(|settings| settings.try_deserialize::<LayeredSettings>());

    match layered {
        Ok(layered) => Config {
            scanner: layered.scanner,
            highlights: HighlightTable::default(),
            logging: layered.logging,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring invalid environment configuration");
            Config::default()
        }
    }
}

/// Default per-user configuration path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cer-citations").join("config.toml"))
}

/// Find a configuration file in the working directory or the user config dir
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    default_config_path().filter(|path| path.is_file())
}
