//! The call engine shared by every calling convention.
//!
//! This module provides:
//! - Single-attempt execution ([`CallExecutor`])
//! - Attempt budget and delay ([`RetryPolicy`])
//! - The retry loop ([`RetryCoordinator`])
//! - Error classification ([`CallError`], [`IsRetryable`])

mod coordinator;
mod error;
mod executor;
mod retry;


pub use coordinator::RetryCoordinator;
pub use error::{CallError, IsRetryable};
pub use executor::CallExecutor;
pub use retry::RetryPolicy;
