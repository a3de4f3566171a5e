//! Tests for `ResponseEnvelope`.

use super::ResponseEnvelope;
use crate::transport::HttpResponse;

fn response(status: http::StatusCode, body: &[u8]) -> HttpResponse {
    HttpResponse::new(
        url::Url::parse("http://example.com/api/items?sort=desc").unwrap(),
        status,
        http::HeaderMap::new(),
        body.to_vec(),
    )
}

mod construction {
    use super::*;

    #[test]
    fn success_keeps_raw_body() {
        let envelope = ResponseEnvelope::from(&response(http::StatusCode::OK, b"plain text"));

        assert!(envelope.is_successful());
        assert_eq!(envelope.status_code(), 200);
        assert_eq!(envelope.status_message(), "OK");
        assert_eq!(envelope.body(), "plain text");
        assert_eq!(
            envelope.called_url(),
            "http://example.com/api/items?sort=desc"
        );
    }

    #[test]
    fn every_2xx_is_successful() {
        for status in [
            http::StatusCode::OK,
            http::StatusCode::CREATED,
            http::StatusCode::NO_CONTENT,
        ] {
            let envelope = ResponseEnvelope::from(&response(status, b""));
            assert!(envelope.is_successful(), "{status} should be successful");
        }
    }

    #[test]
    fn failure_renders_error_body_as_json() {
        let envelope =
            ResponseEnvelope::from(&response(http::StatusCode::BAD_GATEWAY, b"upstream down"));

        assert!(!envelope.is_successful());
        assert_eq!(envelope.status_code(), 502);
        assert_eq!(envelope.body(), r#""upstream down""#);
    }

    #[test]
    fn failure_keeps_json_error_body() {
        let envelope = ResponseEnvelope::from(&response(
            http::StatusCode::NOT_FOUND,
            br#"{"error":"missing"}"#,
        ));

        assert!(!envelope.is_successful());
        assert_eq!(envelope.body(), r#"{"error":"missing"}"#);
    }

    #[test]
    fn redirect_is_not_successful() {
        let envelope = ResponseEnvelope::from(&response(http::StatusCode::FOUND, b""));
        assert!(!envelope.is_successful());
    }
}

mod accessors {
    use super::*;

    #[test]
    fn status_line_joins_code_and_reason() {
        let envelope = ResponseEnvelope::from(&response(http::StatusCode::NOT_FOUND, b""));
        assert_eq!(envelope.status_line(), "404 Not Found");
    }

    #[test]
    fn status_line_without_reason_is_code_only() {
        let status = http::StatusCode::from_u16(599).unwrap();
        let envelope = ResponseEnvelope::from(&response(status, b""));
        assert_eq!(envelope.status_line(), "599");
    }

    #[test]
    fn server_reason_phrase_replaces_canonical() {
        let received = response(http::StatusCode::OK, b"").with_reason("All Good");
        let envelope = ResponseEnvelope::from(&received);

        assert_eq!(envelope.status_message(), "All Good");
        assert_eq!(envelope.status_line(), "200 All Good");
    }

    #[test]
    fn server_reason_phrase_fills_unknown_code() {
        let status = http::StatusCode::from_u16(599).unwrap();
        let envelope = ResponseEnvelope::from(&response(status, b"").with_reason("Upstream Gave Up"));

        assert_eq!(envelope.status_line(), "599 Upstream Gave Up");
        assert!(!envelope.is_successful());
    }

    #[test]
    fn json_decodes_body() {
        let envelope = ResponseEnvelope::from(&response(http::StatusCode::OK, br#"{"n":3}"#));
        let value: serde_json::Value = envelope.json().unwrap();
        assert_eq!(value["n"], 3);
    }

    #[test]
    fn display_contains_url_status_and_body() {
        let envelope = ResponseEnvelope::from(&response(http::StatusCode::OK, b"done"));
        let text = envelope.to_string();

        assert!(text.contains("Url: http://example.com/api/items?sort=desc"));
        assert!(text.contains("200 OK"));
        assert!(text.ends_with("done"));
    }

    #[test]
    fn equal_inputs_give_equal_envelopes() {
        let a = ResponseEnvelope::from(&response(http::StatusCode::SERVICE_UNAVAILABLE, b"x"));
        let b = ResponseEnvelope::from(&response(http::StatusCode::SERVICE_UNAVAILABLE, b"x"));
        assert_eq!(a, b);
    }
}
