//! Outcome of an event-path call as delivered to subscribers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::request::ResponseEnvelope;

/// What an event-path call produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    /// The engine returned an envelope (2xx, or the last unsuccessful one).
    Success(ResponseEnvelope),
    /// The engine failed; carries the rendered error.
    Failure(String),
}

/// An event published on the bus after an event-path call completes.
///
/// The identifier is chosen by the caller and routes the event to
/// interested subscribers (see [`EventEnvelope::is_for`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    identifier: String,
    outcome: EventOutcome,
}

impl EventEnvelope {
    /// Creates a success event carrying `response`.
    #[must_use]
    pub fn success(identifier: impl Into<String>, response: ResponseEnvelope) -> Self {
        Self {
            identifier: identifier.into(),
            outcome: EventOutcome::Success(response),
        }
    }

    /// Creates a failure event carrying `message`.
    #[must_use]
    pub fn failure(identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            outcome: EventOutcome::Failure(message.into()),
        }
    }

    /// Routing key chosen by the caller.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Envelope or error message.
    #[must_use]
    pub const fn outcome(&self) -> &EventOutcome {
        &self.outcome
    }

    /// True when the call produced an envelope.
    ///
    /// The envelope itself may still be unsuccessful.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, EventOutcome::Success(_))
    }

    /// The envelope, `None` for a failure event.
    #[must_use]
    pub const fn response(&self) -> Option<&ResponseEnvelope> {
        match &self.outcome {
            EventOutcome::Success(response) => Some(response),
            EventOutcome::Failure(_) => None,
        }
    }

    /// The rendered error, `None` for a success event.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            EventOutcome::Success(_) => None,
            EventOutcome::Failure(message) => Some(message),
        }
    }

    /// Case-insensitive identifier comparison.
    #[must_use]
    pub fn is_for(&self, identifier: &str) -> bool {
        self.identifier.to_lowercase() == identifier.to_lowercase()
    }

    /// Consumes the event, returning its outcome.
    #[must_use]
    pub fn into_outcome(self) -> EventOutcome {
        self.outcome
    }
}

impl fmt::Display for EventEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            EventOutcome::Success(response) => write!(
                f,
                "Event '{}': {} {}",
                self.identifier,
                response.called_url(),
                response.status_line()
            ),
            EventOutcome::Failure(message) => {
                write!(f, "Event '{}' failed: {message}", self.identifier)
            }
        }
    }
}
