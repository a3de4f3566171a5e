//! Shared test doubles for the transport and engine layers.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::time::Sleeper;
use crate::transport::{
    HttpClient, HttpError, HttpRequest, HttpResponse, TransportError, TransportFactory,
};

/// One scripted outcome of a mock HTTP exchange.
#[derive(Debug, Clone)]
pub enum Step {
    /// Respond with a status and body.
    Respond(http::StatusCode, &'static str),
    /// Fail at the network level.
    Fail,
    /// Fail with a non-retryable request error.
    Reject,
}

impl Step {
    pub const fn ok(body: &'static str) -> Self {
        Self::Respond(http::StatusCode::OK, body)
    }

    pub const fn status(code: http::StatusCode) -> Self {
        Self::Respond(code, "")
    }
}

/// Mock HTTP client that replays a script of outcomes.
///
/// Once the script runs out every call fails at the network level.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    script: std::sync::Mutex<VecDeque<Step>>,
    requests: std::sync::Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl ScriptedClient {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: std::sync::Mutex::new(steps.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for ScriptedClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let url = req.url.clone();
        self.requests.lock().unwrap().push(req);

        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(Step::Respond(status, body)) => Ok(HttpResponse::new(
                url,
                status,
                http::HeaderMap::new(),
                body.as_bytes().to_vec(),
            )),
            Some(Step::Reject) => Err(HttpError::InvalidUrl("rejected by script".to_string())),
            Some(Step::Fail) | None => Err(HttpError::Connection(Box::new(
                std::io::Error::other("connection refused"),
            ))),
        }
    }
}

/// Client handle shared between the factory and the test body.
#[derive(Debug, Clone)]
pub struct SharedClient(pub Arc<ScriptedClient>);

impl HttpClient for SharedClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.0.request(req).await
    }
}

/// Factory handing out the same scripted client for every origin.
#[derive(Debug)]
pub struct MockFactory {
    client: Arc<ScriptedClient>,
    created: AtomicUsize,
    failing: bool,
    build_delay: Option<std::time::Duration>,
}

impl MockFactory {
    pub fn new(client: Arc<ScriptedClient>) -> Self {
        Self {
            client,
            created: AtomicUsize::new(0),
            failing: false,
            build_delay: None,
        }
    }

    /// Factory whose client fails every call.
    pub fn empty() -> Self {
        Self::new(Arc::default())
    }

    pub fn scripted(steps: impl IntoIterator<Item = Step>) -> (Self, Arc<ScriptedClient>) {
        let client = Arc::new(ScriptedClient::new(steps));
        (Self::new(Arc::clone(&client)), client)
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new(Arc::new(ScriptedClient::default()))
        }
    }

    /// Blocks the constructing thread for `delay` on every build.
    pub const fn with_build_delay(mut self, delay: std::time::Duration) -> Self {
        self.build_delay = Some(delay);
        self
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl TransportFactory for MockFactory {
    type Client = SharedClient;

    fn create(&self, origin: &url::Url) -> Result<Self::Client, TransportError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.build_delay {
            std::thread::sleep(delay);
        }
        if self.failing {
            return Err(TransportError::Construction {
                origin: origin.to_string(),
                reason: "factory configured to fail".to_string(),
            });
        }
        Ok(SharedClient(Arc::clone(&self.client)))
    }
}

impl TransportFactory for Arc<MockFactory> {
    type Client = SharedClient;

    fn create(&self, origin: &url::Url) -> Result<Self::Client, TransportError> {
        (**self).create(origin)
    }
}

/// Sleeper that records every requested delay without waiting.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: std::sync::Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

impl Sleeper for Arc<RecordingSleeper> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}
