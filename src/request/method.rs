//! Supported HTTP verbs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::RequestError;

/// HTTP method of a [`RequestSpec`](super::RequestSpec).
///
/// Defaults to [`HttpMethod::Get`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET, sent without a body.
    #[default]
    Get,
    /// POST, body parameters attached.
    Post,
    /// PUT, body parameters attached.
    Put,
    /// DELETE, body parameters attached.
    Delete,
}

impl HttpMethod {
    /// Returns the equivalent [`http::Method`].
    #[must_use]
    pub fn as_http(self) -> http::Method {
        match self {
            Self::Get => http::Method::GET,
            Self::Post => http::Method::POST,
            Self::Put => http::Method::PUT,
            Self::Delete => http::Method::DELETE,
        }
    }

    /// Returns true if requests with this method carry the body parameters.
    #[must_use]
    pub const fn carries_body(self) -> bool {
        !matches!(self, Self::Get)
    }

    /// Returns the upper-case verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(RequestError::UnsupportedMethod(s.to_string())),
        }
    }
}
