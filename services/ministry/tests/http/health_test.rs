use axum::http::{HeaderName, HeaderValue, StatusCode};

use crate::helpers::TestApp;

#[tokio::test]
async fn should_answer_health_checks_without_identity() {
    let app = TestApp::demo().await;

    app.server.get("/healthz").await.assert_status_ok();
    app.server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_attach_request_id() {
    let app = TestApp::demo().await;

    let response = app.server.get("/healthz").await;
    let id = response.header("x-request-id");
    assert!(!id.is_empty());
}

#[tokio::test]
async fn should_propagate_incoming_request_id() {
    let app = TestApp::demo().await;

    let response = app
        .server
        .get("/healthz")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-123"),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "req-123");
}

#[tokio::test]
async fn should_reject_missing_identity() {
    let app = TestApp::demo().await;

    let response = app.server.get("/ministries").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
