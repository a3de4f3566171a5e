//! Fire-and-forget calling convention.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::engine::{CallError, RetryCoordinator};
use crate::event::{EventCoordinator, EventEnvelope};
use crate::request::RequestSpec;
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::TransportFactory;

/// Runs calls in the background and publishes the outcome on the bus.
///
/// Each call publishes exactly one [`EventEnvelope`] tagged with the
/// caller's identifier: a success carrying the envelope, or a failure
/// carrying the rendered error.
pub struct EventApi<F: TransportFactory, S = TokioSleeper> {
    engine: Arc<RetryCoordinator<F, S>>,
    events: Arc<EventCoordinator>,
    runtime: Handle,
}

impl<F, S> EventApi<F, S>
where
    F: TransportFactory + 'static,
    S: Sleeper + 'static,
{
    /// Creates an adapter publishing on `events`.
    #[must_use]
    pub const fn new(
        engine: Arc<RetryCoordinator<F, S>>,
        events: Arc<EventCoordinator>,
        runtime: Handle,
    ) -> Self {
        Self {
            engine,
            events,
            runtime,
        }
    }

    /// Calls with the default attempt budget.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::InvalidRequest`] for a blank identifier; nothing
    /// is sent and nothing is published.
    pub fn call(&self, spec: RequestSpec, identifier: &str) -> Result<JoinHandle<()>, CallError> {
        self.call_with_attempts(spec, self.engine.default_attempts(), identifier)
    }

    /// Calls with at most `attempts` attempts.
    ///
    /// The returned handle completes once the event has been handed to the
    /// bus; delivery to subscribers happens later.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::InvalidRequest`] for a blank identifier; nothing
    /// is sent and nothing is published.
    pub fn call_with_attempts(
        &self,
        spec: RequestSpec,
        attempts: u32,
        identifier: &str,
    ) -> Result<JoinHandle<()>, CallError> {
        if identifier.trim().is_empty() {
            tracing::error!(
                url = spec.base_url(),
                path = spec.path(),
                "Event call without identifier rejected"
            );
            return Err(CallError::invalid_request("event identifier is blank"));
        }

        let engine = Arc::clone(&self.engine);
        let events = Arc::clone(&self.events);
        let identifier = identifier.to_string();
        tracing::debug!(
            url = spec.base_url(),
            path = spec.path(),
            identifier = %identifier,
            attempts,
            "Event call"
        );

        Ok(self.runtime.spawn(async move {
            let event = match engine.run(&spec, attempts).await {
                Ok(envelope) => EventEnvelope::success(identifier, envelope),
                Err(e) => EventEnvelope::failure(identifier, e.to_string()),
            };
            events.publish(event);
        }))
    }

    /// The coordinator events are published on.
    #[must_use]
    pub const fn events(&self) -> &Arc<EventCoordinator> {
        &self.events
    }
}

impl<F: TransportFactory, S> Clone for EventApi<F, S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            events: Arc::clone(&self.events),
            runtime: self.runtime.clone(),
        }
    }
}
