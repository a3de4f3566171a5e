//! Event bus for fire-and-forget calls.
//!
//! This module provides:
//! - The published result of an event-path call ([`EventEnvelope`], [`EventOutcome`])
//! - Subscriber registration and publishing ([`EventCoordinator`], [`EventSubscriber`])

mod coordinator;
mod envelope;


pub use coordinator::{EventCoordinator, EventSubscriber};
pub use envelope::{EventEnvelope, EventOutcome};
