use axum::http::StatusCode;
use serde_json::{Value, json};

use worship_domain::id::MinistryId;

use crate::helpers::{TestApp, as_user};

// ── Ministries ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_callers_ministries() {
    let app = TestApp::demo().await;
    let (name, value) = as_user(app.admin);

    let response = app.server.get("/ministries").add_header(name, value).await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["code"], "ICBT");
}

#[tokio::test]
async fn should_create_ministry_with_generated_code() {
    let app = TestApp::demo().await;
    let alice = app.outsider("alice").await;
    let (name, value) = as_user(alice);

    let response = app
        .server
        .post("/ministries")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "name": "Sample Choir" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let ministry = response.json::<Value>();
    let code = ministry["code"].as_str().unwrap();
    assert_eq!(code.len(), 4);
    assert!(code.chars().all(|c| c.is_ascii_uppercase()));
    assert_eq!(ministry["created_by"], alice.0);

    let team = app
        .server
        .get(&format!("/ministries/{}/members", ministry["id"]))
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(team[0]["user_id"], alice.0);
    assert_eq!(team[0]["role"], "Leader");
}

#[tokio::test]
async fn should_reject_taken_ministry_code() {
    let app = TestApp::demo().await;
    let alice = app.outsider("alice").await;
    let (name, value) = as_user(alice);

    let response = app
        .server
        .post("/ministries")
        .add_header(name, value)
        .json(&json!({ "name": "Copycat", "code": "ICBT" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["kind"], "MINISTRY_CODE_TAKEN");
}

#[tokio::test]
async fn should_join_by_code_once() {
    let app = TestApp::demo().await;
    let alice = app.outsider("alice").await;
    let (name, value) = as_user(alice);

    let joined = app
        .server
        .post("/ministries/join")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "code": " icbt " }))
        .await;
    joined.assert_status_ok();
    assert_eq!(joined.json::<Value>()["id"], app.ministry.0);

    let again = app
        .server
        .post("/ministries/join")
        .add_header(name, value)
        .json(&json!({ "code": "ICBT" }))
        .await;
    again.assert_status(StatusCode::CONFLICT);
    assert_eq!(again.json::<Value>()["kind"], "ALREADY_MEMBER");
}

#[tokio::test]
async fn should_reject_malformed_join_code() {
    let app = TestApp::demo().await;
    let alice = app.outsider("alice").await;
    let (name, value) = as_user(alice);

    let response = app
        .server
        .post("/ministries/join")
        .add_header(name, value)
        .json(&json!({ "code": "TOO-LONG" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_MINISTRY_CODE");
}

#[tokio::test]
async fn should_forbid_outsider_from_ministry() {
    let app = TestApp::demo().await;
    let mallory = app.outsider("mallory").await;
    let (name, value) = as_user(mallory);

    let response = app
        .server
        .get(&format!("/ministries/{}", app.ministry.0))
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_return_404_for_unknown_ministry() {
    let app = TestApp::demo().await;
    let (name, value) = as_user(app.admin);
    let missing = MinistryId(9_999);

    let response = app
        .server
        .get(&format!("/ministries/{}", missing.0))
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "MINISTRY_NOT_FOUND");
}

// ── Team ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_add_team_member_as_leader() {
    let app = TestApp::demo().await;
    let (name, value) = as_user(app.admin);

    let response = app
        .server
        .post(&format!("/ministries/{}/members", app.ministry.0))
        .add_header(name, value)
        .json(&json!({
            "email": "carol@example.com",
            "first_name": "Carol",
            "position": "Keys",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let member = response.json::<Value>();
    assert_eq!(member["role"], "Member");
    assert_eq!(member["position"], "Keys");
    assert_eq!(member["user"]["username"], "carol");
    assert!(member["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn should_forbid_plain_member_from_managing_team() {
    let app = TestApp::demo().await;
    let alice = app.outsider("alice").await;
    let (name, value) = as_user(alice);
    app.server
        .post("/ministries/join")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "code": "ICBT" }))
        .await
        .assert_status_ok();

    let response = app
        .server
        .post(&format!("/ministries/{}/members", app.ministry.0))
        .add_header(name, value)
        .json(&json!({ "email": "dave@example.com" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}
