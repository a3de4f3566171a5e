//! Callback calling convention.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::log_unhandled;
use crate::engine::{CallError, RetryCoordinator};
use crate::request::{RequestSpec, ResponseEnvelope};
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::TransportFactory;

/// Runs calls on a spawned task and reports through callbacks.
///
/// Exactly one callback fires per call: `on_success` with the envelope
/// (which may be unsuccessful once attempts run out), or `on_error` with
/// the failure. Without an error callback the failure is only logged.
///
/// Callbacks run on the spawned task, never on the caller's thread.
pub struct AsyncApi<F: TransportFactory, S = TokioSleeper> {
    engine: Arc<RetryCoordinator<F, S>>,
    runtime: Handle,
}

impl<F, S> AsyncApi<F, S>
where
    F: TransportFactory + 'static,
    S: Sleeper + 'static,
{
    /// Creates an adapter spawning onto `runtime`.
    #[must_use]
    pub const fn new(engine: Arc<RetryCoordinator<F, S>>, runtime: Handle) -> Self {
        Self { engine, runtime }
    }

    /// Calls with the default attempt budget; failures are logged.
    pub fn call<OnSuccess>(&self, spec: RequestSpec, on_success: OnSuccess) -> JoinHandle<()>
    where
        OnSuccess: FnOnce(ResponseEnvelope) + Send + 'static,
    {
        self.call_with_attempts(spec, self.engine.default_attempts(), on_success, log_unhandled)
    }

    /// Calls with the default attempt budget, reporting failures to `on_error`.
    pub fn call_or_else<OnSuccess, OnError>(
        &self,
        spec: RequestSpec,
        on_success: OnSuccess,
        on_error: OnError,
    ) -> JoinHandle<()>
    where
        OnSuccess: FnOnce(ResponseEnvelope) + Send + 'static,
        OnError: FnOnce(CallError) + Send + 'static,
    {
        self.call_with_attempts(spec, self.engine.default_attempts(), on_success, on_error)
    }

    /// Calls with at most `attempts` attempts.
    ///
    /// The returned handle completes after the callback has run.
    pub fn call_with_attempts<OnSuccess, OnError>(
        &self,
        spec: RequestSpec,
        attempts: u32,
        on_success: OnSuccess,
        on_error: OnError,
    ) -> JoinHandle<()>
    where
        OnSuccess: FnOnce(ResponseEnvelope) + Send + 'static,
        OnError: FnOnce(CallError) + Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        tracing::debug!(url = spec.base_url(), path = spec.path(), attempts, "Async call");

        self.runtime.spawn(async move {
            match engine.run(&spec, attempts).await {
                Ok(envelope) => on_success(envelope),
                Err(e) => on_error(e),
            }
        })
    }
}

impl<F: TransportFactory, S> Clone for AsyncApi<F, S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            runtime: self.runtime.clone(),
        }
    }
}
