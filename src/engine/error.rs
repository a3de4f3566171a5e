//! Error types for call execution.

use thiserror::Error;

use crate::request::RequestError;
use crate::transport::{HttpError, TransportError};

/// Error type for one logical call, across all calling conventions.
///
/// A non-2xx response is never an error: it is returned as an unsuccessful
/// [`ResponseEnvelope`](crate::request::ResponseEnvelope).
#[derive(Debug, Error)]
pub enum CallError {
    /// The request or its correlation identifier is malformed.
    ///
    /// Never retried.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No transport client could be obtained for the origin.
    ///
    /// Never retried.
    #[error("Transport unavailable: {0}")]
    TransportUnavailable(#[from] TransportError),

    /// One attempt failed at the network level.
    ///
    /// Produced by [`CallExecutor`](super::CallExecutor) for a single
    /// attempt; the retry loop turns it into [`CallError::CallFailed`].
    #[error("Network failure: {0}")]
    Network(#[from] HttpError),

    /// A blocking call was made through a runtime handle that cannot drive
    /// it, such as one from a `current_thread` runtime.
    ///
    /// Never retried; nothing is sent.
    #[error("Blocking call unsupported: {0}")]
    BlockingUnsupported(&'static str),

    /// Every attempt failed at the network level.
    #[error("Call failed after {attempts} attempt(s): {last_error}")]
    CallFailed {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        #[source]
        last_error: HttpError,
    },
}

impl CallError {
    /// Creates an `InvalidRequest` error.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest(reason.into())
    }
}

impl From<RequestError> for CallError {
    fn from(error: RequestError) -> Self {
        Self::InvalidRequest(error.to_string())
    }
}

/// Extension trait for checking if an error is retryable.
///
/// Determines whether an error represents a transient failure that
/// warrants another attempt.
pub trait IsRetryable {
    /// Returns true if the error is potentially transient and should be retried.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            // Network errors are typically transient
            Self::Connection(_) | Self::Timeout => true,
            // Malformed requests fail the same way every time
            Self::InvalidUrl(_) => false,
        }
    }
}

impl IsRetryable for CallError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_retryable(),
            Self::InvalidRequest(_)
            | Self::TransportUnavailable(_)
            | Self::BlockingUnsupported(_)
            | Self::CallFailed { .. } => false,
        }
    }
}
