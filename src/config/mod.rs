//! Engine configuration.
//!
//! This module provides:
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated engine settings ([`EngineConfig`])
//! - Default values ([`defaults`])
//!
//! Values missing from the file fall back to the built-in defaults.
//! Zero capacities, zero attempt budgets and zero durations are rejected.

pub mod defaults;
mod error;
mod toml;
mod validated;


pub use error::ConfigError;
pub use self::toml::{CacheSection, RetrySection, TomlConfig, TransportSection};
pub use validated::EngineConfig;
