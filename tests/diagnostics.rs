mod common;

use axum::http::StatusCode;

// The diagnostics surface reports configuration presence only. It must
// never echo a value and never fail because something is unset.

#[tokio::test]
async fn env_presence_reports_without_leaking_values() {
    // Plant a sentinel secret; the response may say it is set but must
    // never contain the value itself.
    std::env::set_var("HANAMI_WEBHOOK_SECRET", "sentinel-secret-value-1234");

    let (status, body) = common::get(common::test_app(), "/api/diagnostics/env").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let report = body["data"].as_object().expect("presence report");
    for name in [
        "DATABASE_URL",
        "DATABASE_ELEVATED_URL",
        "HANAMI_WEBHOOK_URL",
        "HANAMI_WEBHOOK_SECRET",
        "HANAMI_BASE_URL",
    ] {
        let presence = report[name].as_str().expect("presence string");
        assert!(
            presence == "已設置" || presence == "未設置",
            "unexpected presence marker for {}: {}",
            name,
            presence
        );
    }

    let serialized = body.to_string();
    assert!(
        !serialized.contains("sentinel-secret-value-1234"),
        "diagnostics leaked a secret value"
    );

    std::env::remove_var("HANAMI_WEBHOOK_SECRET");
}
