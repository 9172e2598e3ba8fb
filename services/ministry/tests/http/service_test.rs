use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use crate::helpers::{TestApp, as_user};

async fn demo_service(app: &TestApp) -> Value {
    let (name, value) = as_user(app.admin);
    let services = app
        .server
        .get(&format!("/ministries/{}/services/upcoming", app.ministry.0))
        .add_header(name, value)
        .await
        .json::<Value>();
    services[0].clone()
}

#[tokio::test]
async fn should_show_seeded_service_with_setlist() {
    let app = TestApp::demo().await;

    let service = demo_service(&app).await;

    assert_eq!(service["name"], "Sunday Celebration Service");
    assert_eq!(service["time"], "10:00");
    assert_eq!(service["type"], "Sunday Service");
    assert_eq!(service["status"], "pending");
    let keys: Vec<_> = service["songs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["key"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(keys, ["D", "D", "E"]);
    assert_eq!(service["songs"][2]["song"]["title"], "Way Maker");
    assert_eq!(service["members"][0]["position"], "Worship Leader");
}

#[tokio::test]
async fn should_plan_service_with_roster_and_setlist() {
    let app = TestApp::demo().await;
    let (name, value) = as_user(app.admin);
    let team = app
        .server
        .get(&format!("/ministries/{}/members", app.ministry.0))
        .add_header(name.clone(), value.clone())
        .await
        .json::<Value>();
    let songs = app
        .server
        .get(&format!("/ministries/{}/songs", app.ministry.0))
        .add_header(name.clone(), value.clone())
        .await
        .json::<Value>();
    let date = Utc::now().date_naive() + Duration::days(7);

    let response = app
        .server
        .post(&format!("/ministries/{}/services", app.ministry.0))
        .add_header(name, value)
        .json(&json!({
            "name": "Evening Prayer",
            "date": date,
            "time": "19:30",
            "member_ids": [team[0]["id"]],
            "song_ids": [songs[2]["id"], songs[0]["id"]],
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let service = response.json::<Value>();
    assert_eq!(service["time"], "19:30");
    assert_eq!(service["status"], "pending");
    assert_eq!(service["members"][0]["position"], "Worship Leader");
    assert_eq!(service["songs"][0]["order"], 1);
    assert_eq!(service["songs"][0]["song_id"], songs[2]["id"]);
    assert_eq!(service["songs"][1]["song_id"], songs[0]["id"]);
    assert!(service["songs"][0]["key_override"].is_null());
    assert_eq!(service["songs"][0]["key"], "E");
}

#[tokio::test]
async fn should_reject_plan_with_foreign_song() {
    let app = TestApp::demo().await;
    let (name, value) = as_user(app.admin);

    let response = app
        .server
        .post(&format!("/ministries/{}/services", app.ministry.0))
        .add_header(name.clone(), value.clone())
        .json(&json!({
            "name": "Broken",
            "date": Utc::now().date_naive(),
            "time": "09:00",
            "song_ids": [9_999],
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_REFERENCE");

    let services = app
        .server
        .get(&format!("/ministries/{}/services", app.ministry.0))
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(services.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_unparseable_time() {
    let app = TestApp::demo().await;
    let (name, value) = as_user(app.admin);

    let response = app
        .server
        .post(&format!("/ministries/{}/services", app.ministry.0))
        .add_header(name, value)
        .json(&json!({
            "name": "Late",
            "date": Utc::now().date_naive(),
            "time": "25:99",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_override_key_and_append_to_setlist() {
    let app = TestApp::demo().await;
    let (name, value) = as_user(app.admin);
    let service = demo_service(&app).await;
    let song_id = service["songs"][0]["song_id"].clone();

    let response = app
        .server
        .post(&format!("/services/{}/songs", service["id"]))
        .add_header(name, value)
        .json(&json!({ "song_id": song_id, "key": "G" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let entry = response.json::<Value>();
    assert_eq!(entry["order"], 4);
    assert_eq!(entry["key"], "G");
    assert_eq!(entry["key_override"], "G");
}

#[tokio::test]
async fn should_update_service_status() {
    let app = TestApp::demo().await;
    let (name, value) = as_user(app.admin);
    let service = demo_service(&app).await;

    let response = app
        .server
        .patch(&format!("/services/{}", service["id"]))
        .add_header(name, value)
        .json(&json!({ "status": "ready", "notes": null }))
        .await;

    response.assert_status_ok();
    let updated = response.json::<Value>();
    assert_eq!(updated["status"], "ready");
    assert!(updated["notes"].is_null());
    assert_eq!(updated["name"], service["name"]);
}

#[tokio::test]
async fn should_delete_service_and_its_lineup() {
    let app = TestApp::demo().await;
    let (name, value) = as_user(app.admin);
    let service = demo_service(&app).await;
    let path = format!("/services/{}", service["id"]);

    app.server
        .delete(&path)
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = app.server.get(&path).add_header(name, value).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "SERVICE_NOT_FOUND");
}

#[tokio::test]
async fn should_forbid_outsider_from_services() {
    let app = TestApp::demo().await;
    let mallory = app.outsider("mallory").await;
    let (name, value) = as_user(mallory);

    let response = app
        .server
        .get(&format!("/ministries/{}/services", app.ministry.0))
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}
