//! restfan: REST calls with per-origin client reuse and bounded retry
//!
//! One retry engine sits behind four calling conventions: blocking calls,
//! callbacks, single-element streams, and fire-and-forget calls whose
//! outcome is published on an in-process event bus.

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod event;
pub mod json;
pub mod logging;
pub mod request;
pub mod time;
pub mod transport;

#[cfg(test)]
mod test_fixtures;
