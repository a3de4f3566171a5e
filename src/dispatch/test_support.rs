//! Invoker wiring shared by the adapter tests.

use std::sync::Arc;

use tokio::runtime::Handle;

use super::RestInvoker;
use crate::engine::{CallExecutor, RetryCoordinator};
use crate::event::EventCoordinator;
use crate::request::RequestSpec;
use crate::test_fixtures::{MockFactory, RecordingSleeper, ScriptedClient, Step};
use crate::transport::TransportCache;

pub type TestInvoker = RestInvoker<MockFactory, Arc<RecordingSleeper>>;

/// Invoker over a scripted client, with its own event coordinator.
pub fn invoker_on(runtime: Handle, steps: Vec<Step>) -> (TestInvoker, Arc<ScriptedClient>) {
    let (factory, client) = MockFactory::scripted(steps);
    let engine = RetryCoordinator::new(CallExecutor::new(TransportCache::new(factory)))
        .with_sleeper(Arc::new(RecordingSleeper::default()));
    let invoker = RestInvoker::new(engine, Arc::new(EventCoordinator::new()), runtime);
    (invoker, client)
}

/// Same as [`invoker_on`], on the current runtime.
pub fn invoker(steps: Vec<Step>) -> (TestInvoker, Arc<ScriptedClient>) {
    invoker_on(Handle::current(), steps)
}

pub fn spec() -> RequestSpec {
    RequestSpec::builder("http://x", "p").build().unwrap()
}
