//! Wire-level request and response values and the client seam.

use super::HttpError;

/// A fully resolved request: absolute URL, verb, headers and encoded body.
///
/// Built by [`Transport::prepare`](super::Transport::prepare) and filled in
/// by the engine before it reaches an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: http::Method,
    /// Absolute target URL, query included
    pub url: url::Url,
    pub headers: http::HeaderMap,
    /// Encoded body; `None` sends no body at all
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Starts a request with no headers and no body.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Shorthand for a bare GET.
    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self::new(http::Method::GET, url)
    }
}

/// Whatever the server sent back, with the body already read.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Final URL after redirects
    pub url: url::Url,
    pub status: http::StatusCode,
    pub headers: http::HeaderMap,
    pub body: Vec<u8>,
    /// Reason phrase sent by the server when it is not the canonical one
    pub reason: Option<String>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(
        url: url::Url,
        status: http::StatusCode,
        headers: http::HeaderMap,
        body: Vec<u8>,
    ) -> Self {
        Self {
            url,
            status,
            headers,
            body,
            reason: None,
        }
    }

    /// Records a non-canonical reason phrase from the status line.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// 2xx check.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body as text, `None` when it is not valid UTF-8.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// Sends one [`HttpRequest`] and reads the whole response.
///
/// [`ReqwestClient`](super::ReqwestClient) is the production implementation;
/// the engine is generic over this trait so tests can script outcomes.
pub trait HttpClient: Send + Sync {
    /// Performs the exchange.
    ///
    /// A response with any status is `Ok`; only failures to get one are
    /// errors.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Connection`] when the server cannot be reached
    /// - [`HttpError::Timeout`] when the exchange takes too long
    /// - [`HttpError::InvalidUrl`] when the request cannot be built
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

/// Resolves `path` against `origin` and appends `query` pairs.
///
/// The origin's own path is kept: `http://h/api/v2` + `items` gives
/// `http://h/api/v2/items`. Leading slashes on `path` are ignored so
/// `/items` resolves the same way.
///
/// # Errors
///
/// Returns [`HttpError::InvalidUrl`] when the joined URL does not parse or
/// when `path` points at a different origin (`http://other.host/x`,
/// `mailto:x@y`).
pub fn resolve_url<'a, I>(origin: &url::Url, path: &str, query: I) -> Result<url::Url, HttpError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut base = origin.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }

    let mut url = base
        .join(path.trim_start_matches('/'))
        .map_err(|e| HttpError::InvalidUrl(format!("{origin} + {path}: {e}")))?;
    if url.origin() != origin.origin() {
        return Err(HttpError::InvalidUrl(format!(
            "{path} leaves origin {}",
            origin.origin().ascii_serialization()
        )));
    }

    let mut pairs = query.into_iter().peekable();
    if pairs.peek().is_some() {
        url.query_pairs_mut().extend_pairs(pairs);
    }

    Ok(url)
}
