use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{TestApp, as_user};

#[tokio::test]
async fn should_register_without_exposing_password() {
    let app = TestApp::demo().await;

    let response = app
        .server
        .post("/users")
        .json(&json!({
            "username": "alice",
            "password": "hunter22",
            "email": "alice@example.com",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "member");
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn should_reject_taken_username() {
    let app = TestApp::demo().await;

    let response = app
        .server
        .post("/users")
        .json(&json!({ "username": "admin", "password": "x" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["kind"], "USERNAME_TAKEN");
}

#[tokio::test]
async fn should_return_current_user() {
    let app = TestApp::demo().await;
    let (name, value) = as_user(app.admin);

    let response = app.server.get("/users/@me").add_header(name, value).await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["username"], "admin");
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn should_sync_profile_idempotently() {
    let app = TestApp::demo().await;

    let first = app
        .server
        .put("/users/sync")
        .json(&json!({
            "external_id": "oidc|42",
            "email": "Bob.Smith@example.com",
            "first_name": "Bob",
        }))
        .await;
    first.assert_status_ok();
    let first = first.json::<Value>();
    assert_eq!(first["username"], "bob.smith");

    let second = app
        .server
        .put("/users/sync")
        .json(&json!({
            "external_id": "oidc|42",
            "email": "bob@example.com",
            "first_name": "Bobby",
        }))
        .await;
    second.assert_status_ok();
    let second = second.json::<Value>();
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["username"], "bob.smith");
    assert_eq!(second["email"], "bob@example.com");
    assert_eq!(second["first_name"], "Bobby");
}
