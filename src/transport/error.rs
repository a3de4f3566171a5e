//! Error types for the transport layer.

use thiserror::Error;

/// Error type for a single HTTP exchange.
///
/// Describes what went wrong on the wire without dictating recovery
/// strategy; the retry loop decides through
/// [`IsRetryable`](crate::engine::IsRetryable).
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built (bad URL, header or body).
    ///
    /// This indicates a malformed request rather than a transient failure.
    #[error("Invalid request: {0}")]
    InvalidUrl(String),
}

/// Error type for obtaining a transport client from the cache.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The origin is empty, blank, or cannot be parsed as a URL.
    #[error("Invalid origin '{origin}': {reason}")]
    InvalidOrigin {
        /// The origin as given by the caller
        origin: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The client for a valid-looking origin could not be constructed.
    #[error("Failed to construct transport client for '{origin}': {reason}")]
    Construction {
        /// The normalized origin
        origin: String,
        /// Reason reported by the factory
        reason: String,
    },
}

impl TransportError {
    /// Creates an `InvalidOrigin` error.
    #[must_use]
    pub fn invalid_origin(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOrigin {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this is an [`TransportError::InvalidOrigin`].
    #[must_use]
    pub const fn is_invalid_origin(&self) -> bool {
        matches!(self, Self::InvalidOrigin { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn timeout_displays_message() {
        assert_eq!(HttpError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn connection_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = HttpError::Connection(Box::new(io));

        assert!(error.to_string().contains("refused"));
        assert!(error.source().is_some());
    }

    #[test]
    fn invalid_origin_displays_origin_and_reason() {
        let error = TransportError::invalid_origin("", "origin must not be blank");

        assert!(error.is_invalid_origin());
        assert_eq!(
            error.to_string(),
            "Invalid origin '': origin must not be blank"
        );
    }

    #[test]
    fn construction_is_not_invalid_origin() {
        let error = TransportError::Construction {
            origin: "http://x/".to_string(),
            reason: "tls backend unavailable".to_string(),
        };

        assert!(!error.is_invalid_origin());
        assert!(error.to_string().contains("tls backend unavailable"));
    }
}
