//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::num::NonZeroUsize;
use std::time::Duration;

/// Default attempt budget for calls that do not pass one.
pub const ATTEMPTS: u32 = 1;

/// Default maximum number of cached transports.
pub const CACHE_CAPACITY: usize = 10;

/// Default idle lifetime of a cached transport in seconds.
pub const CACHE_IDLE_TTL_SECS: u64 = 3600;

/// Default delay between attempts in seconds.
pub const RETRY_DELAY_SECS: u64 = 2;

/// Default cache capacity as `NonZeroUsize`.
#[must_use]
pub const fn cache_capacity() -> NonZeroUsize {
    match NonZeroUsize::new(CACHE_CAPACITY) {
        Some(capacity) => capacity,
        None => NonZeroUsize::MIN,
    }
}

/// Default cache idle lifetime as Duration.
#[must_use]
pub const fn cache_idle_ttl() -> Duration {
    Duration::from_secs(CACHE_IDLE_TTL_SECS)
}

/// Default delay between attempts as Duration.
#[must_use]
pub const fn retry_delay() -> Duration {
    Duration::from_secs(RETRY_DELAY_SECS)
}
