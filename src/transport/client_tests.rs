//! Tests for `ReqwestClient` and `ReqwestFactory`.
//!
//! Exchanges against a live server are covered by the integration tests
//! under `tests/`.

use super::*;
use std::time::Duration;

mod reqwest_client {
    use super::*;

    fn client() -> ReqwestClient {
        ReqwestClient::from_client(reqwest::Client::new())
    }

    #[test]
    fn debug_format_is_readable() {
        assert!(format!("{:?}", client()).contains("ReqwestClient"));
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }

    #[tokio::test]
    async fn request_to_invalid_host_returns_error_or_proxy_response() {
        let client = client();
        let url = url::Url::parse("http://invalid.invalid.invalid/").unwrap();

        let result = client.request(HttpRequest::get(url)).await;

        // A proxy in the environment may answer with an error status instead
        match result {
            Err(HttpError::Connection(_) | HttpError::Timeout) => {}
            Ok(resp) if !resp.is_success() => {}
            other => panic!("Expected connection error or proxy error response, got {other:?}"),
        }
    }
}

mod reqwest_factory {
    use super::*;

    #[test]
    fn default_has_no_timeout() {
        assert!(ReqwestFactory::new().timeout().is_none());
    }

    #[test]
    fn with_timeout_sets_value() {
        let factory = ReqwestFactory::new().with_timeout(Some(Duration::from_secs(5)));
        assert_eq!(factory.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn with_user_agent_sets_value() {
        let factory = ReqwestFactory::new().with_user_agent(Some("agent/1".to_string()));
        assert_eq!(factory.user_agent(), Some("agent/1"));
    }

    #[test]
    fn create_builds_client_for_origin() {
        let factory = ReqwestFactory::new()
            .with_timeout(Some(Duration::from_secs(5)))
            .with_user_agent(Some("restfan-tests".to_string()));
        let origin = url::Url::parse("http://example.com/").unwrap();

        assert!(factory.create(&origin).is_ok());
    }
}
