//! Tests for `ReactiveApi` and `ResponseStream`.

use super::test_support::{invoker, spec};
use crate::engine::CallError;
use crate::test_fixtures::Step;
use tokio::sync::oneshot;
use tokio_stream::{Stream, StreamExt};

mod laziness {
    use super::*;

    #[tokio::test]
    async fn nothing_is_sent_before_first_poll() {
        let (invoker, client) = invoker(vec![Step::ok("")]);

        let stream = invoker.reactive().call(spec());
        tokio::task::yield_now().await;

        assert_eq!(client.calls(), 0);
        assert!(!stream.is_terminated());
    }

    #[tokio::test]
    async fn dropped_stream_never_sends() {
        let (invoker, client) = invoker(vec![Step::ok("")]);

        drop(invoker.reactive().call(spec()));
        tokio::task::yield_now().await;

        assert_eq!(client.calls(), 0);
    }
}

mod items {
    use super::*;

    #[tokio::test]
    async fn yields_one_envelope_then_ends() {
        let (invoker, client) = invoker(vec![Step::ok("only"), Step::ok("never")]);
        let mut stream = invoker.reactive().call(spec());

        assert_eq!(stream.size_hint(), (1, Some(1)));
        let envelope = stream.next().await.unwrap().unwrap();
        assert_eq!(envelope.body(), "only");

        assert!(stream.next().await.is_none());
        assert!(stream.is_terminated());
        assert_eq!(stream.size_hint(), (0, Some(0)));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn failure_is_a_single_error_item() {
        let (invoker, _) = invoker(vec![]);
        let mut stream = invoker.reactive().call_with_attempts(spec(), 2);

        let item = stream.next().await.unwrap();

        assert!(matches!(
            item,
            Err(CallError::CallFailed { attempts: 2, .. })
        ));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn collects_to_single_element() {
        let (invoker, _) = invoker(vec![Step::ok("a")]);

        let items: Vec<_> = invoker.reactive().call(spec()).collect().await;

        assert_eq!(items.len(), 1);
        assert!(items[0].is_ok());
    }
}

mod subscription {
    use super::*;

    #[tokio::test]
    async fn subscribe_delivers_envelope() {
        let (invoker, _) = invoker(vec![Step::ok("pushed")]);
        let (tx, rx) = oneshot::channel();

        invoker
            .reactive()
            .call(spec())
            .subscribe(move |envelope| {
                let _ = tx.send(envelope);
            })
            .await
            .unwrap();

        assert_eq!(rx.await.unwrap().body(), "pushed");
    }

    #[tokio::test]
    async fn subscribe_without_error_handler_swallows_failure() {
        let (invoker, client) = invoker(vec![Step::Fail]);

        let outcome = invoker
            .reactive()
            .call(spec())
            .subscribe(|_| panic!("unexpected success"))
            .await;

        assert!(outcome.is_ok());
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn subscribe_or_else_delivers_error() {
        let (invoker, _) = invoker(vec![Step::Reject]);
        let (tx, rx) = oneshot::channel();

        invoker
            .reactive()
            .call_with_attempts(spec(), 3)
            .subscribe_or_else(|_| panic!("unexpected success"), move |error| {
                let _ = tx.send(error);
            })
            .await
            .unwrap();

        assert!(matches!(
            rx.await.unwrap(),
            CallError::CallFailed { attempts: 1, .. }
        ));
    }
}
