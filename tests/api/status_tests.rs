//! Heartbeat API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::TestApp;

#[tokio::test]
async fn test_heartbeat_for_registered_participant() {
    let app = TestApp::new();
    app.register("Alice").await;

    assert_eq!(app.heartbeat(Some("Alice")).await, StatusCode::OK);
}

#[tokio::test]
async fn test_heartbeat_for_unknown_participant_is_not_found() {
    let app = TestApp::new();

    assert_eq!(app.heartbeat(Some("Ghost")).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_heartbeat_without_user_header_is_rejected() {
    let app = TestApp::new();

    assert_eq!(app.heartbeat(None).await, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_heartbeat_advances_last_seen() {
    let app = TestApp::new();
    app.register("Alice").await;
    let (_, before) = app.get("/participants", None).await;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    assert_eq!(app.heartbeat(Some("Alice")).await, StatusCode::OK);

    let (_, after) = app.get("/participants", None).await;
    assert!(after[0]["lastSeen"].as_i64().unwrap() > before[0]["lastSeen"].as_i64().unwrap());
}

#[tokio::test]
async fn test_reaper_sweep_evicts_idle_participant() {
    let app = TestApp::new();
    app.register("Alice").await;
    app.register("Bob").await;

    tokio::time::sleep(std::time::Duration::from_millis(300)).await;
    assert_eq!(app.heartbeat(Some("Bob")).await, StatusCode::OK);

    let reaper = chat_room::application::services::PresenceReaper::new(
        app.state.participants.clone(),
        app.state.message_service(),
        chrono::Duration::milliseconds(150),
        std::time::Duration::from_secs(15),
    );
    let report = reaper.run_once().await.unwrap();

    assert_eq!(report.idle, vec!["Alice".to_string()]);
    assert_eq!(report.removed, 1);

    let (_, participants) = app.get("/participants", None).await;
    let names: Vec<&str> = participants
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bob"]);

    let texts = app.texts_for("Bob", "").await;
    assert_eq!(texts.last().map(String::as_str), Some("sai da sala..."));
    assert_eq!(app.heartbeat(Some("Alice")).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_ascii_participant_can_heartbeat_and_post() {
    let app = TestApp::new();
    app.register("João").await;

    assert_eq!(app.heartbeat(Some("João")).await, StatusCode::OK);

    app.say("João", "Todos", "olá", "message").await;
    assert_eq!(
        app.texts_for("João", "?limit=1").await,
        vec!["olá".to_string()]
    );
}
