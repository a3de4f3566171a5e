//! Tests for `AsyncApi`.

use super::test_support::{invoker, spec};
use crate::engine::CallError;
use crate::test_fixtures::Step;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::oneshot;

mod success {
    use super::*;

    #[tokio::test]
    async fn success_callback_receives_envelope() {
        let (invoker, _) = invoker(vec![Step::ok("payload")]);
        let (tx, rx) = oneshot::channel();

        let handle = invoker.callback().call(spec(), move |envelope| {
            let _ = tx.send(envelope);
        });
        handle.await.unwrap();

        let envelope = rx.await.unwrap();
        assert_eq!(envelope.body(), "payload");
    }

    #[tokio::test]
    async fn exhausted_unsuccessful_goes_to_success_callback() {
        let (invoker, _) = invoker(vec![
            Step::status(http::StatusCode::BAD_GATEWAY),
            Step::status(http::StatusCode::BAD_GATEWAY),
        ]);
        let (tx, rx) = oneshot::channel();
        let errored = Arc::new(AtomicBool::new(false));
        let errored_flag = Arc::clone(&errored);

        invoker
            .callback()
            .call_with_attempts(
                spec(),
                2,
                move |envelope| {
                    let _ = tx.send(envelope);
                },
                move |_| errored_flag.store(true, Ordering::SeqCst),
            )
            .await
            .unwrap();

        assert_eq!(rx.await.unwrap().status_code(), 502);
        assert!(!errored.load(Ordering::SeqCst));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn callback_runs_off_the_calling_thread() {
        let (invoker, _) = invoker(vec![Step::ok("")]);
        let caller = std::thread::current().id();
        let (tx, rx) = oneshot::channel();

        invoker.callback().call(spec(), move |_| {
            let _ = tx.send(std::thread::current().id());
        });

        assert_ne!(rx.await.unwrap(), caller);
    }
}

mod failure {
    use super::*;

    #[tokio::test]
    async fn error_callback_receives_failure() {
        let (invoker, _) = invoker(vec![]);
        let (tx, rx) = oneshot::channel();

        invoker
            .callback()
            .call_or_else(spec(), |_| panic!("unexpected success"), move |error| {
                let _ = tx.send(error);
            })
            .await
            .unwrap();

        assert!(matches!(
            rx.await.unwrap(),
            CallError::CallFailed { attempts: 1, .. }
        ));
    }

    #[tokio::test]
    async fn missing_error_callback_only_logs() {
        let (invoker, client) = invoker(vec![Step::Fail]);
        let succeeded = Arc::new(AtomicBool::new(false));
        let succeeded_flag = Arc::clone(&succeeded);

        invoker
            .callback()
            .call(spec(), move |_| succeeded_flag.store(true, Ordering::SeqCst))
            .await
            .unwrap();

        assert!(!succeeded.load(Ordering::SeqCst));
        assert_eq!(client.calls(), 1);
    }
}
