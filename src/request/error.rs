//! Error types for request construction.

use thiserror::Error;

/// Error returned when a [`RequestSpec`](super::RequestSpec) cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// A required field was empty or whitespace only.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The HTTP method string is not one of GET, POST, PUT, DELETE.
    #[error("Unsupported HTTP method '{0}'")]
    UnsupportedMethod(String),
}
