//! Reactive calling convention: a single-element lazy stream.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_stream::{Stream, StreamExt};

use super::log_unhandled;
use crate::engine::{CallError, RetryCoordinator};
use crate::request::{RequestSpec, ResponseEnvelope};
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::TransportFactory;

type PendingCall = Pin<Box<dyn Future<Output = Result<ResponseEnvelope, CallError>> + Send>>;

/// Hands out [`ResponseStream`]s for requests.
pub struct ReactiveApi<F: TransportFactory, S = TokioSleeper> {
    engine: Arc<RetryCoordinator<F, S>>,
    runtime: Handle,
}

impl<F, S> ReactiveApi<F, S>
where
    F: TransportFactory + 'static,
    S: Sleeper + 'static,
{
    /// Creates an adapter whose streams subscribe onto `runtime`.
    #[must_use]
    pub const fn new(engine: Arc<RetryCoordinator<F, S>>, runtime: Handle) -> Self {
        Self { engine, runtime }
    }

    /// Stream for `spec` with the default attempt budget.
    #[must_use]
    pub fn call(&self, spec: RequestSpec) -> ResponseStream {
        self.call_with_attempts(spec, self.engine.default_attempts())
    }

    /// Stream for `spec` with at most `attempts` attempts.
    ///
    /// Nothing is sent until the stream is first polled.
    #[must_use]
    pub fn call_with_attempts(&self, spec: RequestSpec, attempts: u32) -> ResponseStream {
        let engine = Arc::clone(&self.engine);
        let call = async move {
            tracing::debug!(url = spec.base_url(), path = spec.path(), attempts, "Stream call");
            engine.run(&spec, attempts).await
        };

        ResponseStream {
            call: Some(Box::pin(call)),
            runtime: self.runtime.clone(),
        }
    }
}

impl<F: TransportFactory, S> Clone for ReactiveApi<F, S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            runtime: self.runtime.clone(),
        }
    }
}

/// A stream yielding the outcome of one call, then ending.
///
/// The call starts on the first poll. Dropping the stream before that
/// means the request is never sent.
pub struct ResponseStream {
    call: Option<PendingCall>,
    runtime: Handle,
}

impl ResponseStream {
    /// Consumes the stream on a spawned task; failures are logged.
    pub fn subscribe<OnSuccess>(self, on_success: OnSuccess) -> JoinHandle<()>
    where
        OnSuccess: FnOnce(ResponseEnvelope) + Send + 'static,
    {
        self.subscribe_or_else(on_success, log_unhandled)
    }

    /// Consumes the stream on a spawned task, reporting failures to `on_error`.
    pub fn subscribe_or_else<OnSuccess, OnError>(
        self,
        on_success: OnSuccess,
        on_error: OnError,
    ) -> JoinHandle<()>
    where
        OnSuccess: FnOnce(ResponseEnvelope) + Send + 'static,
        OnError: FnOnce(CallError) + Send + 'static,
    {
        let runtime = self.runtime.clone();
        let mut stream = self;

        runtime.spawn(async move {
            match stream.next().await {
                Some(Ok(envelope)) => on_success(envelope),
                Some(Err(e)) => on_error(e),
                None => tracing::debug!("Stream already consumed"),
            }
        })
    }

    /// True once the single item has been yielded.
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        self.call.is_none()
    }
}

impl Stream for ResponseStream {
    type Item = Result<ResponseEnvelope, CallError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let Some(call) = self.call.as_mut() else {
            return Poll::Ready(None);
        };

        let result = ready!(call.as_mut().poll(cx));
        self.call = None;
        Poll::Ready(Some(result))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.call.is_some());
        (remaining, Some(remaining))
    }
}

impl std::fmt::Debug for ResponseStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseStream")
            .field("terminated", &self.is_terminated())
            .finish_non_exhaustive()
    }
}
