//! Retry policy for the call engine.

use std::time::Duration;

use crate::config::defaults;

/// Attempt budget and fixed delay between attempts.
///
/// # Defaults
///
/// - `max_attempts`: 1 (no retry)
/// - `delay`: 2 seconds
///
/// # Example
///
/// ```
/// use restfan::engine::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_attempts(3)
///     .with_delay(Duration::from_millis(500));
///
/// assert!(policy.should_retry(2));
/// assert!(!policy.should_retry(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial attempt).
    ///
    /// A value of 1 means no retries; only the initial attempt is made.
    pub max_attempts: u32,

    /// Delay between two consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Minimum value for `max_attempts`.
    pub const MIN_MAX_ATTEMPTS: u32 = 1;

    /// Creates a policy with the default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: defaults::ATTEMPTS,
            delay: defaults::retry_delay(),
        }
    }

    /// Sets the attempt budget.
    ///
    /// Values below 1 are raised to 1: at least one attempt always happens.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = if max_attempts < Self::MIN_MAX_ATTEMPTS {
            Self::MIN_MAX_ATTEMPTS
        } else {
            max_attempts
        };
        self
    }

    /// Sets the delay between attempts.
    ///
    /// Zero delay is supported (useful for testing) but creates a tight
    /// retry loop.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns true if another attempt may follow attempt number `attempt`.
    ///
    /// `attempt` is 1-based: 1 is the initial attempt.
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
