//! Uniform wrapper around one completed HTTP attempt.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::json;
use crate::transport::HttpResponse;

/// The outcome of one completed HTTP attempt.
///
/// Produced for every response the server sent back, whatever its status:
/// a 404 or a 503 is an envelope with `successful == false`, not an error.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    called_url: String,
    status_code: u16,
    status_message: String,
    successful: bool,
    body: String,
}

impl ResponseEnvelope {
    /// Builds an envelope from the parts of a received response.
    ///
    /// Successful (2xx) bodies are kept as text; any other body is rendered
    /// through the JSON codec (see [`json::error_body`]).
    #[must_use]
    pub fn new(called_url: impl Into<String>, status: http::StatusCode, body: &[u8]) -> Self {
        let successful = status.is_success();
        let body = if successful {
            String::from_utf8_lossy(body).into_owned()
        } else {
            json::error_body(body)
        };

        Self {
            called_url: called_url.into(),
            status_code: status.as_u16(),
            status_message: status.canonical_reason().unwrap_or_default().to_string(),
            successful,
            body,
        }
    }

    /// The URL that was actually called (after redirects).
    #[must_use]
    pub fn called_url(&self) -> &str {
        &self.called_url
    }

    /// Numeric HTTP status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Reason phrase from the status line, or the canonical one for the
    /// code; empty when neither is known.
    #[must_use]
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// `"<code> <reason>"`, e.g. `"404 Not Found"`.
    #[must_use]
    pub fn status_line(&self) -> String {
        if self.status_message.is_empty() {
            self.status_code.to_string()
        } else {
            format!("{} {}", self.status_code, self.status_message)
        }
    }

    /// True iff the status code is in 200..=299.
    #[must_use]
    pub const fn is_successful(&self) -> bool {
        self.successful
    }

    /// Raw body on success, error-body representation otherwise.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Decodes the body as JSON. Returns `None` if it does not fit `T`.
    #[must_use]
    pub fn json<T: DeserializeOwned>(&self) -> Option<T> {
        json::from_json(&self.body)
    }
}

impl From<&HttpResponse> for ResponseEnvelope {
    /// Keeps the server's own reason phrase when it sent a non-canonical one.
    fn from(response: &HttpResponse) -> Self {
        let envelope = Self::new(response.url.as_str(), response.status, &response.body);
        match &response.reason {
            Some(reason) => Self {
                status_message: reason.clone(),
                ..envelope
            },
            None => envelope,
        }
    }
}

impl fmt::Display for ResponseEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ResponseEnvelope:")?;
        writeln!(f, "Url: {}", self.called_url)?;
        writeln!(f, "{}", self.status_line())?;
        write!(f, "{}", self.body)
    }
}
