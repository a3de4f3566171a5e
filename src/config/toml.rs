//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional; missing values fall back to
/// [`defaults`](super::defaults) when converted to an
/// [`EngineConfig`](super::EngineConfig).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Transport cache configuration
    #[serde(default)]
    pub cache: CacheSection,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetrySection,

    /// HTTP transport configuration
    #[serde(default)]
    pub transport: TransportSection,
}

/// Transport cache configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheSection {
    /// Maximum number of cached transports
    pub capacity: Option<usize>,

    /// Idle lifetime of a cached transport in seconds
    pub idle_ttl: Option<u64>,
}

/// Retry configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Attempt budget for calls that do not pass one
    pub attempts: Option<u32>,

    /// Delay between attempts in seconds
    pub delay: Option<u64>,
}

/// HTTP transport configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportSection {
    /// Per-request timeout in seconds
    pub timeout: Option<u64>,

    /// User-Agent header sent with every request
    pub user_agent: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}
