mod common;

use axum::http::StatusCode;
use serde_json::json;

// Every route answers with the success/failure envelope: success is always
// present, and data and error never appear together.

#[tokio::test]
async fn index_returns_success_envelope() {
    let (status, body) = common::get(common::test_app(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Hanami API");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn echo_returns_request_body_inside_envelope() {
    let payload = json!({"hello": "世界", "n": 42});
    let (status, body) =
        common::send_json(common::test_app(), "POST", "/api/diagnostics/echo", &payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], payload);
    assert_eq!(body["message"], "echo");
}

#[tokio::test]
async fn init_advisory_is_method_not_allowed() {
    let (status, body) = common::get(common::test_app(), "/api/init-progress-data").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["success"], false);
    let error = body["error"].as_str().expect("error string");
    assert!(error.contains("POST"), "advisory should name the method: {}", error);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn malformed_json_body_is_enveloped() {
    let (status, body) =
        common::send_raw(common::test_app(), "POST", "/api/diagnostics/echo", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("JSON"));
}

#[tokio::test]
async fn health_answers_with_envelope() {
    // Keep the ping short when no database is reachable
    std::env::set_var("DATABASE_CONNECT_TIMEOUT_SECS", "2");
    let (status, body) = common::get(common::test_app(), "/health").await;

    if status == StatusCode::OK {
        assert_eq!(body["success"], true);
    } else {
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
        // Sanitized failures never carry a connection string
        assert!(!body.to_string().contains("://"));
    }
}

#[tokio::test]
async fn failure_envelope_never_carries_data() {
    let (status, body) = common::get(common::test_app(), "/api/student-media").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    assert!(body.get("data").is_none());
}
