//! Validated engine configuration.
//!
//! All validation is performed during construction from a [`TomlConfig`].

use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Fully validated settings for one engine instance.
///
/// [`Default`] yields the built-in values: 10 cached transports, a 1 hour
/// idle lifetime, a 2 second retry delay, and a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of cached transports
    pub cache_capacity: NonZeroUsize,

    /// Idle lifetime of a cached transport
    pub cache_idle_ttl: Duration,

    /// Delay between attempts
    pub retry_delay: Duration,

    /// Attempt budget for calls that do not pass one
    pub default_attempts: u32,

    /// Per-request timeout; `None` leaves the client default
    pub request_timeout: Option<Duration>,

    /// User-Agent header; `None` leaves the client default
    pub user_agent: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: defaults::cache_capacity(),
            cache_idle_ttl: defaults::cache_idle_ttl(),
            retry_delay: defaults::retry_delay(),
            default_attempts: defaults::ATTEMPTS,
            request_timeout: None,
            user_agent: None,
        }
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timeout = self
            .request_timeout
            .map_or_else(|| "none".to_string(), |t| format!("{}s", t.as_secs()));

        write!(
            f,
            "EngineConfig {{ cache: {}/{}s, retry: {}x/{}s, timeout: {}, user_agent: {} }}",
            self.cache_capacity,
            self.cache_idle_ttl.as_secs(),
            self.default_attempts,
            self.retry_delay.as_secs(),
            timeout,
            self.user_agent.as_deref().unwrap_or("default"),
        )
    }
}

impl EngineConfig {
    /// Builds a configuration from parsed TOML, filling gaps with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `cache.capacity` is zero
    /// - `retry.attempts` is zero
    /// - `cache.idle_ttl`, `retry.delay` or `transport.timeout` is zero
    pub fn from_toml(toml: &TomlConfig) -> Result<Self, ConfigError> {
        let capacity = toml.cache.capacity.unwrap_or(defaults::CACHE_CAPACITY);
        let cache_capacity = NonZeroUsize::new(capacity).ok_or(ConfigError::InvalidCapacity)?;

        let default_attempts = toml.retry.attempts.unwrap_or(defaults::ATTEMPTS);
        if default_attempts == 0 {
            return Err(ConfigError::InvalidAttempts);
        }

        let cache_idle_ttl = positive_secs(
            "cache.idle_ttl",
            toml.cache.idle_ttl.unwrap_or(defaults::CACHE_IDLE_TTL_SECS),
        )?;
        let retry_delay = positive_secs(
            "retry.delay",
            toml.retry.delay.unwrap_or(defaults::RETRY_DELAY_SECS),
        )?;
        let request_timeout = toml
            .transport
            .timeout
            .map(|secs| positive_secs("transport.timeout", secs))
            .transpose()?;

        Ok(Self {
            cache_capacity,
            cache_idle_ttl,
            retry_delay,
            default_attempts,
            request_timeout,
            user_agent: toml.transport.user_agent.clone(),
        })
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let toml = TomlConfig::load(path)?;
        let config = Self::from_toml(&toml)?;
        tracing::debug!(path = %path.display(), %config, "Loaded engine configuration");
        Ok(config)
    }
}

fn positive_secs(field: &'static str, seconds: u64) -> Result<Duration, ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::zero_duration(field));
    }
    Ok(Duration::from_secs(seconds))
}
