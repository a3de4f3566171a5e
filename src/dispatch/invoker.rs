//! One engine, four calling conventions.

use std::sync::Arc;

use tokio::runtime::Handle;

use super::{AsyncApi, EventApi, ReactiveApi, SyncApi};
use crate::config::EngineConfig;
use crate::engine::RetryCoordinator;
use crate::event::EventCoordinator;
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{ReqwestFactory, TransportFactory};

/// Bundles a retry engine, the runtime it runs on, and the event bus.
///
/// Every adapter handed out shares the same engine, so they all draw on
/// one transport cache.
///
/// # Example
///
/// ```no_run
/// use restfan::config::EngineConfig;
/// use restfan::dispatch::RestInvoker;
/// use restfan::request::RequestSpec;
///
/// let runtime = tokio::runtime::Runtime::new()?;
/// let invoker = RestInvoker::from_config(&EngineConfig::default(), runtime.handle().clone());
///
/// let spec = RequestSpec::builder("api.example.com", "status").build()?;
/// let envelope = invoker.sync().call(&spec)?;
/// println!("{}", envelope.status_line());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct RestInvoker<F: TransportFactory, S = TokioSleeper> {
    engine: Arc<RetryCoordinator<F, S>>,
    events: Arc<EventCoordinator>,
    runtime: Handle,
}

impl RestInvoker<ReqwestFactory, TokioSleeper> {
    /// Builds the production stack from `config`, publishing on the
    /// process-wide event coordinator.
    #[must_use]
    pub fn from_config(config: &EngineConfig, runtime: Handle) -> Self {
        tracing::debug!(%config, "Creating invoker");
        Self::new(
            RetryCoordinator::from_config(config),
            EventCoordinator::global(),
            runtime,
        )
    }
}

impl<F, S> RestInvoker<F, S>
where
    F: TransportFactory + 'static,
    S: Sleeper + 'static,
{
    /// Wraps `engine`, publishing event-path results on `events`.
    #[must_use]
    pub fn new(
        engine: RetryCoordinator<F, S>,
        events: Arc<EventCoordinator>,
        runtime: Handle,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            events,
            runtime,
        }
    }

    /// Blocking calls.
    #[must_use]
    pub fn sync(&self) -> SyncApi<F, S> {
        SyncApi::new(Arc::clone(&self.engine), self.runtime.clone())
    }

    /// Callback-driven calls.
    #[must_use]
    pub fn callback(&self) -> AsyncApi<F, S> {
        AsyncApi::new(Arc::clone(&self.engine), self.runtime.clone())
    }

    /// Single-element response streams.
    #[must_use]
    pub fn reactive(&self) -> ReactiveApi<F, S> {
        ReactiveApi::new(Arc::clone(&self.engine), self.runtime.clone())
    }

    /// Fire-and-forget calls published on the bus.
    #[must_use]
    pub fn event(&self) -> EventApi<F, S> {
        EventApi::new(
            Arc::clone(&self.engine),
            Arc::clone(&self.events),
            self.runtime.clone(),
        )
    }

    #[must_use]
    pub const fn engine(&self) -> &Arc<RetryCoordinator<F, S>> {
        &self.engine
    }

    #[must_use]
    pub const fn events(&self) -> &Arc<EventCoordinator> {
        &self.events
    }
}
