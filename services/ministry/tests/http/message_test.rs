use axum::http::StatusCode;
use serde_json::{Value, json};

use worship_domain::id::UserId;

use crate::helpers::{TestApp, as_user};

async fn join(app: &TestApp, username: &str) -> UserId {
    let user = app.outsider(username).await;
    let (name, value) = as_user(user);
    app.server
        .post("/ministries/join")
        .add_header(name, value)
        .json(&json!({ "code": "ICBT" }))
        .await
        .assert_status_ok();
    user
}

#[tokio::test]
async fn should_send_and_mark_direct_message_read() {
    let app = TestApp::demo().await;
    let alice = join(&app, "alice").await;
    let messages = format!("/ministries/{}/messages", app.ministry.0);
    let (admin_name, admin_value) = as_user(app.admin);
    let (alice_name, alice_value) = as_user(alice);

    let sent = app
        .server
        .post(&messages)
        .add_header(admin_name, admin_value)
        .json(&json!({ "recipient_id": alice.0, "content": "Rehearsal at 8" }))
        .await;
    sent.assert_status(StatusCode::CREATED);
    let sent = sent.json::<Value>();
    assert_eq!(sent["read"], false);
    assert_eq!(sent["recipient_id"], alice.0);

    let marked = app
        .server
        .post(&format!("{messages}/read"))
        .add_header(alice_name.clone(), alice_value.clone())
        .json(&json!({ "sender_id": app.admin.0 }))
        .await;
    marked.assert_status_ok();
    assert_eq!(marked.json::<Value>()["success"], true);

    let listed = app
        .server
        .get(&messages)
        .add_query_param("with", app.admin.0)
        .add_header(alice_name, alice_value)
        .await;
    listed.assert_status_ok();
    let listed = listed.json::<Value>();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["content"], "Rehearsal at 8");
    assert_eq!(listed[0]["read"], true);
}

#[tokio::test]
async fn should_keep_direct_messages_between_participants() {
    let app = TestApp::demo().await;
    let alice = join(&app, "alice").await;
    let carol = join(&app, "carol").await;
    let messages = format!("/ministries/{}/messages", app.ministry.0);
    let (admin_name, admin_value) = as_user(app.admin);
    let (carol_name, carol_value) = as_user(carol);

    app.server
        .post(&messages)
        .add_header(admin_name, admin_value)
        .json(&json!({ "recipient_id": alice.0, "content": "private to alice" }))
        .await
        .assert_status(StatusCode::CREATED);

    let feed = app
        .server
        .get(&messages)
        .add_header(carol_name.clone(), carol_value.clone())
        .await;
    feed.assert_status_ok();
    assert!(feed.json::<Value>().as_array().unwrap().is_empty());

    let conversation = app
        .server
        .get(&messages)
        .add_query_param("with", alice.0)
        .add_header(carol_name, carol_value)
        .await;
    conversation.assert_status_ok();
    assert!(conversation.json::<Value>().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn should_broadcast_without_recipient() {
    let app = TestApp::demo().await;
    let (name, value) = as_user(app.admin);
    let messages = format!("/ministries/{}/messages", app.ministry.0);

    let sent = app
        .server
        .post(&messages)
        .add_header(name.clone(), value.clone())
        .json(&json!({ "content": "Welcome, team!" }))
        .await;
    sent.assert_status(StatusCode::CREATED);
    assert!(sent.json::<Value>()["recipient_id"].is_null());

    let all = app
        .server
        .get(&messages)
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_message_to_non_member() {
    let app = TestApp::demo().await;
    let mallory = app.outsider("mallory").await;
    let (name, value) = as_user(app.admin);

    let response = app
        .server
        .post(&format!("/ministries/{}/messages", app.ministry.0))
        .add_header(name, value)
        .json(&json!({ "recipient_id": mallory.0, "content": "hi" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_REFERENCE");
}

#[tokio::test]
async fn should_reject_blank_message() {
    let app = TestApp::demo().await;
    let (name, value) = as_user(app.admin);

    let response = app
        .server
        .post(&format!("/ministries/{}/messages", app.ministry.0))
        .add_header(name, value)
        .json(&json!({ "content": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_INPUT");
}

// ── Availability ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_record_and_remove_availability() {
    let app = TestApp::demo().await;
    let alice = join(&app, "alice").await;
    let (name, value) = as_user(alice);
    let path = format!("/ministries/{}/availability", app.ministry.0);

    let created = app
        .server
        .post(&path)
        .add_header(name.clone(), value.clone())
        .json(&json!({
            "start_date": "2026-12-20",
            "end_date": "2026-12-27",
            "notes": "Travelling",
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let created = created.json::<Value>();
    assert_eq!(created["user_id"], alice.0);

    let (admin_name, admin_value) = as_user(app.admin);
    app.server
        .delete(&format!("/availability/{}", created["id"]))
        .add_header(admin_name, admin_value)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .delete(&format!("/availability/{}", created["id"]))
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let remaining = app
        .server
        .get(&path)
        .add_header(name, value)
        .await
        .json::<Value>();
    assert!(remaining.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_inverted_availability_range() {
    let app = TestApp::demo().await;
    let (name, value) = as_user(app.admin);

    let response = app
        .server
        .post(&format!("/ministries/{}/availability", app.ministry.0))
        .add_header(name, value)
        .json(&json!({ "start_date": "2026-12-27", "end_date": "2026-12-20" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_DATE_RANGE");
}
