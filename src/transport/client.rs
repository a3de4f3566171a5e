//! reqwest-backed transport clients.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse, TransportError, TransportFactory};

/// [`HttpClient`] over a configured `reqwest::Client`.
///
/// Obtained from [`ReqwestFactory`]; each origin in the transport cache
/// gets its own instance and connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Wraps an already configured reqwest client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self
            .inner
            .request(req.method, req.url.as_str())
            .headers(req.headers);
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;

        let url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let reason = response
            .extensions()
            .get::<hyper::ext::ReasonPhrase>()
            .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned());
        let body = response.bytes().await.map_err(classify)?.to_vec();

        let response = HttpResponse::new(url, status, headers, body);
        Ok(match reason {
            Some(reason) => response.with_reason(reason),
            None => response,
        })
    }
}

fn classify(error: reqwest::Error) -> HttpError {
    if error.is_timeout() {
        HttpError::Timeout
    } else if error.is_builder() {
        HttpError::InvalidUrl(error.to_string())
    } else {
        HttpError::Connection(Box::new(error))
    }
}

/// Builds one [`ReqwestClient`] per origin.
///
/// Every client asks for JSON (`Accept: application/json`) and shares the
/// configured timeout and user agent.
///
/// # Example
///
/// ```no_run
/// use restfan::transport::{HttpClient, HttpRequest, ReqwestFactory, TransportFactory};
/// use std::time::Duration;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let origin = Url::parse("https://api.example.com/")?;
/// let client = ReqwestFactory::new()
///     .with_timeout(Some(Duration::from_secs(10)))
///     .create(&origin)?;
/// let response = client.request(HttpRequest::get(origin.join("items")?)).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReqwestFactory {
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ReqwestFactory {
    /// Creates a factory with reqwest's defaults (no timeout).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a total request timeout for every client built.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` sent by every client built.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }
}

impl TransportFactory for ReqwestFactory {
    type Client = ReqwestClient;

    fn create(&self, origin: &url::Url) -> Result<Self::Client, TransportError> {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::ACCEPT,
            http::HeaderValue::from_static("application/json"),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.as_str());
        }

        let client = builder.build().map_err(|e| TransportError::Construction {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!(origin = %origin, "Built new transport client");
        Ok(ReqwestClient::from_client(client))
    }
}
