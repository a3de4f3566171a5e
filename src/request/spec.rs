//! Immutable request descriptions.

use std::collections::BTreeMap;
use std::fmt;

use super::{HttpMethod, RequestError};

/// A declarative description of one logical HTTP call.
///
/// Built through [`RequestSpec::builder`]; once built it is immutable and
/// every default is already resolved:
/// - `method` is [`HttpMethod::Get`] unless set
/// - headers, query and body maps are empty unless set
/// - the raw query string has been merged into the query map
///
/// # Example
///
/// ```
/// use restfan::request::{HttpMethod, RequestSpec};
///
/// let spec = RequestSpec::builder("www.example.com/api/v2/", "getServices")
///     .method(HttpMethod::Post)
///     .header("AUTH_TOKEN", "1234567")
///     .query_param("sort", "desc")
///     .body_param("code", "first")
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.method(), HttpMethod::Post);
/// assert_eq!(spec.query().get("sort").map(String::as_str), Some("desc"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    base_url: String,
    path: String,
    method: HttpMethod,
    headers: BTreeMap<String, String>,
    query: BTreeMap<String, String>,
    query_string: Option<String>,
    body: BTreeMap<String, String>,
}

impl RequestSpec {
    /// Starts building a request against `base_url` + `path`.
    #[must_use]
    pub fn builder(base_url: impl Into<String>, path: impl Into<String>) -> RequestSpecBuilder {
        RequestSpecBuilder::new(base_url, path)
    }

    /// Origin as given by the caller (not yet protocol-qualified).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint appended to the origin.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Query parameters, with the raw query string already merged in.
    #[must_use]
    pub const fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// The raw query string the request was built with, if any.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.query_string.as_deref()
    }

    /// Body parameters. Not sent for GET requests.
    #[must_use]
    pub const fn body(&self) -> &BTreeMap<String, String> {
        &self.body
    }
}

impl fmt::Display for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RequestSpec:")?;
        writeln!(f, "Url: {}{}", self.base_url, self.path)?;
        writeln!(f, "Method: {}", self.method)?;
        writeln!(f, "Headers: {:?}", self.headers)?;
        writeln!(f, "Query params: {:?}", self.query)?;
        writeln!(
            f,
            "Query string: {}",
            self.query_string.as_deref().unwrap_or("")
        )?;
        write!(f, "Body params: {:?}", self.body)
    }
}

/// Builder for [`RequestSpec`].
///
/// Map setters accumulate; inserting an existing key overwrites it.
#[derive(Debug, Clone, Default)]
pub struct RequestSpecBuilder {
    base_url: String,
    path: String,
    method: Option<HttpMethod>,
    headers: BTreeMap<String, String>,
    query: BTreeMap<String, String>,
    query_string: Option<String>,
    body: BTreeMap<String, String>,
}

impl RequestSpecBuilder {
    /// Creates a builder with the two required fields.
    #[must_use]
    pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub const fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Adds one header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds several headers.
    #[must_use]
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Adds one query parameter.
    #[must_use]
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Adds several query parameters.
    #[must_use]
    pub fn query_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets a raw `k=v&k2=v2` query string.
    ///
    /// It is merged into the query parameters at build time and wins on
    /// key collisions, regardless of the order the setters were called in.
    #[must_use]
    pub fn query_string(mut self, query_string: impl Into<String>) -> Self {
        self.query_string = Some(query_string.into());
        self
    }

    /// Adds one body parameter.
    #[must_use]
    pub fn body_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.body.insert(name.into(), value.into());
        self
    }

    /// Adds several body parameters.
    #[must_use]
    pub fn body_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.body
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Validates the required fields and resolves every default.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingField`] when the base URL or the path
    /// is empty or blank.
    pub fn build(self) -> Result<RequestSpec, RequestError> {
        if self.base_url.trim().is_empty() {
            return Err(RequestError::MissingField("base_url"));
        }
        if self.path.trim().is_empty() {
            return Err(RequestError::MissingField("path"));
        }

        let mut query = self.query;
        if let Some(raw) = &self.query_string {
            query.extend(parse_query_string(raw));
        }

        Ok(RequestSpec {
            base_url: self.base_url,
            path: self.path,
            method: self.method.unwrap_or_default(),
            headers: self.headers,
            query,
            query_string: self.query_string,
            body: self.body,
        })
    }
}

/// Splits a raw `k=v&k2=v2` query string into pairs.
///
/// Only pieces containing exactly one `=` are kept; anything else is
/// dropped silently. Values are taken literally, without percent-decoding.
#[must_use]
pub fn parse_query_string(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter_map(|pair| {
            let mut parts = pair.split('=');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) => Some((key.to_string(), value.to_string())),
                _ => None,
            }
        })
        .collect()
}
