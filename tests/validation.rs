mod common;

use axum::http::StatusCode;
use serde_json::json;

// Required-parameter failures must answer 400 with the failure envelope
// before any data-access call happens; none of these need a database.

#[tokio::test]
async fn student_media_requires_student_id() {
    let (status, body) = common::get(common::test_app(), "/api/student-media").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("student_id"));
}

#[tokio::test]
async fn student_media_rejects_empty_student_id() {
    let (status, _) = common::get(common::test_app(), "/api/student-media?student_id=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn version_comparison_requires_tree_id() {
    let (status, body) = common::get(common::test_app(), "/api/version-comparison").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("缺少必要參數"));
}

#[tokio::test]
async fn favorite_toggle_rejects_non_boolean() {
    let (status, body) = common::send_json(
        common::test_app(),
        "PATCH",
        "/api/student-media/3f0b0e7c-8c26-4bb0-9f11-0e6b5a2d9a01/favorite",
        &json!({"is_favorite": "yes"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["field_errors"]["is_favorite"], "must be a boolean");
}

#[tokio::test]
async fn favorite_toggle_rejects_malformed_id() {
    let (status, body) = common::send_json(
        common::test_app(),
        "PATCH",
        "/api/student-media/not-a-uuid/favorite",
        &json!({"is_favorite": true}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn status_update_requires_non_empty_string() {
    let (status, body) = common::send_json(
        common::test_app(),
        "PATCH",
        "/api/student-media/3f0b0e7c-8c26-4bb0-9f11-0e6b5a2d9a01/status",
        &json!({"status": ""}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"]["status"], "cannot be empty");
}

#[tokio::test]
async fn promo_code_update_rejects_unknown_fields() {
    let (status, body) = common::send_json(
        common::test_app(),
        "PATCH",
        "/api/promo-codes/3f0b0e7c-8c26-4bb0-9f11-0e6b5a2d9a01",
        &json!({"code": "HACKED50"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["field_errors"]["code"], "cannot be updated");
}

#[tokio::test]
async fn promo_code_update_rejects_mistyped_values() {
    let (status, body) = common::send_json(
        common::test_app(),
        "PATCH",
        "/api/promo-codes/3f0b0e7c-8c26-4bb0-9f11-0e6b5a2d9a01",
        &json!({"status": 123, "is_active": ["yes"]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["field_errors"]["status"], "must be a string");
    assert_eq!(body["field_errors"]["is_active"], "must be a boolean");
}

#[tokio::test]
async fn promo_code_update_rejects_empty_body() {
    let (status, _) = common::send_json(
        common::test_app(),
        "PATCH",
        "/api/promo-codes/3f0b0e7c-8c26-4bb0-9f11-0e6b5a2d9a01",
        &json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn course_types_reject_negative_limit() {
    let (status, body) = common::get(common::test_app(), "/api/course-types?limit=-1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn logout_requires_session_id() {
    let (status, body) =
        common::send_json(common::test_app(), "POST", "/api/auth/logout", &json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["field_errors"]["session_id"], "is required");
}

#[tokio::test]
async fn logout_rejects_malformed_session_id() {
    let (status, _) = common::send_json(
        common::test_app(),
        "POST",
        "/api/auth/logout",
        &json!({"session_id": "nope"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
