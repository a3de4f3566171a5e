//! Calling conventions over the shared retry engine.
//!
//! This module provides:
//! - Blocking calls ([`SyncApi`])
//! - Callback-driven calls ([`AsyncApi`])
//! - Single-element lazy streams ([`ReactiveApi`], [`ResponseStream`])
//! - Fire-and-forget calls published on the event bus ([`EventApi`])
//! - A bundle wiring all four to one engine ([`RestInvoker`])
//!
//! The adapters only translate the engine's `Result` into their own
//! delivery style; retry, caching and error classification live in
//! [`crate::engine`].

mod callback;
mod event;
mod invoker;
mod stream;
mod sync;

#[cfg(test)]
mod callback_tests;
#[cfg(test)]
mod stream_tests;
#[cfg(test)]
mod test_support;

pub use callback::AsyncApi;
pub use event::EventApi;
pub use invoker::RestInvoker;
pub use stream::{ReactiveApi, ResponseStream};
pub use sync::SyncApi;

use crate::engine::CallError;

/// Error handler used when the caller supplies none.
fn log_unhandled(error: CallError) {
    tracing::error!(error = %error, "Call failed with no error handler");
}
