//! Request and response data model.
//!
//! This module provides:
//! - The HTTP verbs supported by the engine ([`HttpMethod`])
//! - Immutable request descriptions ([`RequestSpec`], [`RequestSpecBuilder`])
//! - The uniform wrapper around one completed attempt ([`ResponseEnvelope`])

mod envelope;
mod error;
mod method;
mod spec;

#[cfg(test)]
mod envelope_tests;

pub use envelope::ResponseEnvelope;
pub use error::RequestError;
pub use method::HttpMethod;
pub use spec::{RequestSpec, RequestSpecBuilder, parse_query_string};
