//! Blocking calling convention.

use std::sync::Arc;

use tokio::runtime::{Handle, RuntimeFlavor};

use crate::engine::{CallError, RetryCoordinator};
use crate::request::{RequestSpec, ResponseEnvelope};
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::TransportFactory;

/// Runs calls on the caller's thread, blocking until the retry loop ends.
///
/// The caller's thread stays blocked for the whole call, retry delays
/// included. The handle must belong to a multi-thread runtime: a
/// `current_thread` runtime only makes progress inside its own
/// `Runtime::block_on`, so calls through such a handle are refused.
pub struct SyncApi<F: TransportFactory, S = TokioSleeper> {
    engine: Arc<RetryCoordinator<F, S>>,
    runtime: Handle,
}

impl<F: TransportFactory, S: Sleeper> SyncApi<F, S> {
    /// Creates an adapter driving `engine` on `runtime`.
    #[must_use]
    pub const fn new(engine: Arc<RetryCoordinator<F, S>>, runtime: Handle) -> Self {
        Self { engine, runtime }
    }

    /// Calls with the engine's default attempt budget.
    ///
    /// # Errors
    ///
    /// See [`SyncApi::call_with_attempts`].
    ///
    /// # Panics
    ///
    /// Panics when called from within an asynchronous execution context.
    pub fn call(&self, spec: &RequestSpec) -> Result<ResponseEnvelope, CallError> {
        self.call_with_attempts(spec, self.engine.default_attempts())
    }

    /// Calls with at most `attempts` attempts.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::BlockingUnsupported`] without sending anything
    /// when the handle belongs to a `current_thread` runtime, otherwise the
    /// engine's error when no envelope could be produced.
    ///
    /// # Panics
    ///
    /// Panics when called from within an asynchronous execution context.
    pub fn call_with_attempts(
        &self,
        spec: &RequestSpec,
        attempts: u32,
    ) -> Result<ResponseEnvelope, CallError> {
        if matches!(self.runtime.runtime_flavor(), RuntimeFlavor::CurrentThread) {
            tracing::error!(
                url = spec.base_url(),
                path = spec.path(),
                "Sync call on a current_thread runtime refused"
            );
            return Err(CallError::BlockingUnsupported(
                "current_thread runtime cannot drive a blocking call",
            ));
        }

        tracing::debug!(url = spec.base_url(), path = spec.path(), attempts, "Sync call");
        self.runtime.block_on(self.engine.run(spec, attempts))
    }
}

impl<F: TransportFactory, S> Clone for SyncApi<F, S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            runtime: self.runtime.clone(),
        }
    }
}
