//! Bounded retry around the call executor.

use std::time::Duration;

use super::{CallError, CallExecutor, IsRetryable, RetryPolicy};
use crate::config::EngineConfig;
use crate::request::{RequestSpec, ResponseEnvelope};
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{ReqwestFactory, TransportCache, TransportFactory};

/// Runs a request with a bounded number of attempts and a fixed delay.
///
/// This is the single retry core behind every calling convention.
///
/// # Stop rules
///
/// - A 2xx response ends the loop immediately.
/// - A non-2xx response is retried while attempts remain; on the last
///   attempt it is returned as-is (an unsuccessful envelope, not an error).
/// - A network failure is retried while attempts remain; on the last
///   attempt it becomes [`CallError::CallFailed`].
/// - Any other error (invalid request, transport unavailable) stops
///   immediately.
///
/// Attempts are strictly sequential. The delay between two attempts
/// suspends only the task running this call.
///
/// # Type Parameters
///
/// - `F`: the transport factory behind the executor's cache
/// - `S`: the sleeper used between attempts (defaults to [`TokioSleeper`])
pub struct RetryCoordinator<F: TransportFactory, S = TokioSleeper> {
    executor: CallExecutor<F>,
    sleeper: S,
    policy: RetryPolicy,
}

impl<F: TransportFactory> RetryCoordinator<F, TokioSleeper> {
    /// Creates a coordinator with the default 2 second delay.
    #[must_use]
    pub fn new(executor: CallExecutor<F>) -> Self {
        Self {
            executor,
            sleeper: TokioSleeper,
            policy: RetryPolicy::default(),
        }
    }
}

impl RetryCoordinator<ReqwestFactory, TokioSleeper> {
    /// Builds the production engine described by `config`.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        let factory = ReqwestFactory::new()
            .with_timeout(config.request_timeout)
            .with_user_agent(config.user_agent.clone());
        let cache = TransportCache::with_limits(factory, config.cache_capacity, config.cache_idle_ttl);

        Self::new(CallExecutor::new(cache))
            .with_delay(config.retry_delay)
            .with_default_attempts(config.default_attempts)
    }
}

impl<F: TransportFactory, S> RetryCoordinator<F, S> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RetryCoordinator<F, S2> {
        RetryCoordinator {
            executor: self.executor,
            sleeper,
            policy: self.policy,
        }
    }

    /// Sets the delay between attempts.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.policy = self.policy.with_delay(delay);
        self
    }

    /// Sets the attempt budget used by calls that do not pass one.
    #[must_use]
    pub const fn with_default_attempts(mut self, attempts: u32) -> Self {
        self.policy = self.policy.with_max_attempts(attempts);
        self
    }

    /// Attempt budget used by calls that do not pass one.
    #[must_use]
    pub const fn default_attempts(&self) -> u32 {
        self.policy.max_attempts
    }

    /// Delay between attempts.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.policy.delay
    }

    /// The wrapped executor.
    #[must_use]
    pub const fn executor(&self) -> &CallExecutor<F> {
        &self.executor
    }
}

impl<F: TransportFactory, S: Sleeper> RetryCoordinator<F, S> {
    /// Runs `spec` with at most `attempts` attempts (values below 1 count as 1).
    ///
    /// # Errors
    ///
    /// - [`CallError::CallFailed`] when every attempt failed at the network level
    /// - [`CallError::InvalidRequest`] or [`CallError::TransportUnavailable`]
    ///   straight from the first attempt, without retrying
    pub async fn run(
        &self,
        spec: &RequestSpec,
        attempts: u32,
    ) -> Result<ResponseEnvelope, CallError> {
        let policy = self.policy.with_max_attempts(attempts);
        let mut attempt = 1;

        loop {
            match self.executor.execute(spec).await {
                Ok(envelope) if envelope.is_successful() => return Ok(envelope),
                Ok(envelope) if !policy.should_retry(attempt) => {
                    tracing::warn!(
                        url = envelope.called_url(),
                        status = envelope.status_code(),
                        attempts = attempt,
                        "Attempts exhausted, returning last unsuccessful response"
                    );
                    return Ok(envelope);
                }
                Ok(envelope) => {
                    tracing::warn!(
                        url = envelope.called_url(),
                        status = envelope.status_code(),
                        attempt,
                        "Unsuccessful response, retrying"
                    );
                }
                Err(CallError::Network(e)) if e.is_retryable() && policy.should_retry(attempt) => {
                    tracing::warn!(attempt, error = %e, "Network failure, retrying");
                }
                Err(CallError::Network(e)) => {
                    tracing::error!(attempts = attempt, error = %e, "Call failed");
                    return Err(CallError::CallFailed {
                        attempts: attempt,
                        last_error: e,
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "Call rejected");
                    return Err(e);
                }
            }

            self.sleeper.sleep(policy.delay).await;
            attempt += 1;
        }
    }

    /// Runs `spec` with the default attempt budget.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub async fn run_default(&self, spec: &RequestSpec) -> Result<ResponseEnvelope, CallError> {
        self.run(spec, self.policy.max_attempts).await
    }
}
