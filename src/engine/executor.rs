//! Single-attempt HTTP execution.

use std::sync::Arc;

use super::CallError;
use crate::json;
use crate::request::{RequestSpec, ResponseEnvelope};
use crate::transport::{HttpClient, HttpRequest, Transport, TransportCache, TransportFactory};

/// Turns a [`RequestSpec`] into exactly one HTTP exchange.
///
/// The executor looks up (or builds) the transport for the request's
/// origin, issues the call, and packages whatever the server returned into
/// a [`ResponseEnvelope`]. It never retries.
///
/// # Outcomes
///
/// - Any received response, 2xx or not: `Ok(envelope)`
/// - Network-level failure: [`CallError::Network`]
/// - No transport for the origin: [`CallError::TransportUnavailable`]
/// - Request cannot be encoded (bad header, bad path): [`CallError::InvalidRequest`]
pub struct CallExecutor<F: TransportFactory> {
    cache: TransportCache<F>,
}

impl<F: TransportFactory> CallExecutor<F> {
    /// Creates an executor drawing transports from `cache`.
    #[must_use]
    pub const fn new(cache: TransportCache<F>) -> Self {
        Self { cache }
    }

    /// The transport cache in use.
    #[must_use]
    pub const fn cache(&self) -> &TransportCache<F> {
        &self.cache
    }

    /// Performs one attempt.
    ///
    /// # Errors
    ///
    /// See the type-level documentation for the error classification.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<ResponseEnvelope, CallError> {
        let transport = self.cache.get(spec.base_url()).await?;
        let request = build_request(&transport, spec)?;

        tracing::debug!(method = %spec.method(), url = %request.url, "Sending request");
        let response = transport.send(request).await?;
        let envelope = ResponseEnvelope::from(&response);
        tracing::debug!(
            url = envelope.called_url(),
            status = envelope.status_code(),
            "Response received"
        );

        Ok(envelope)
    }

    /// Performs one attempt on a separate task.
    ///
    /// The returned handle resolves to the same result [`execute`](Self::execute)
    /// would give.
    pub fn spawn(
        self: &Arc<Self>,
        spec: RequestSpec,
    ) -> tokio::task::JoinHandle<Result<ResponseEnvelope, CallError>>
    where
        F: 'static,
    {
        let executor = Arc::clone(self);
        tokio::spawn(async move { executor.execute(&spec).await })
    }
}

impl<F: TransportFactory + std::fmt::Debug> std::fmt::Debug for CallExecutor<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallExecutor")
            .field("cache", &self.cache)
            .finish()
    }
}

/// Encodes `spec` as a request against `transport`'s origin.
///
/// GET requests carry no body; the other verbs send the body parameters as
/// a JSON object.
fn build_request<C: HttpClient>(
    transport: &Transport<C>,
    spec: &RequestSpec,
) -> Result<HttpRequest, CallError> {
    let query = spec.query().iter().map(|(k, v)| (k.as_str(), v.as_str()));
    let mut request = transport
        .prepare(spec.method().as_http(), spec.path(), query)
        .map_err(|e| CallError::invalid_request(e.to_string()))?;

    for (name, value) in spec.headers() {
        let header_name = http::HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| CallError::invalid_request(format!("header name '{name}': {e}")))?;
        let header_value = http::HeaderValue::from_str(value)
            .map_err(|e| CallError::invalid_request(format!("header value for '{name}': {e}")))?;
        request.headers.append(header_name, header_value);
    }

    if spec.method().carries_body() {
        let body = json::to_json(spec.body()).ok_or_else(|| {
            CallError::invalid_request("body parameters cannot be encoded as JSON")
        })?;
        request
            .headers
            .entry(http::header::CONTENT_TYPE)
            .or_insert(http::HeaderValue::from_static("application/json"));
        request.body = Some(body.into_bytes());
    }

    Ok(request)
}
