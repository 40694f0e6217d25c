//! Participant Directory API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_register_returns_created_participant() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json("/participants", None, json!({ "name": "Alice" }))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Alice");
    assert!(body["lastSeen"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_duplicate_name_is_conflict() {
    let app = TestApp::new();
    app.register("Alice").await;

    let (status, body) = app
        .post_json("/participants", None, json!({ "name": "Alice" }))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
}

#[tokio::test]
async fn test_list_contains_each_registered_name_once() {
    let app = TestApp::new();
    app.register("Alice").await;
    app.register("Bob").await;
    let _ = app
        .post_json("/participants", None, json!({ "name": "Alice" }))
        .await;

    let (status, body) = app.get("/participants", None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

#[tokio::test]
async fn test_registration_posts_join_notice() {
    let app = TestApp::new();
    app.register("Alice").await;

    let (status, body) = app.get("/messages", Some("Bob")).await;

    assert_eq!(status, StatusCode::OK);
    let messages = body.as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["from"], "Alice");
    assert_eq!(messages[0]["to"], "Todos");
    assert_eq!(messages[0]["text"], "entra na sala...");
    assert_eq!(messages[0]["kind"], "status");
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    let app = TestApp::new();

    let (status, _) = app
        .post_json("/participants", None, json!({ "name": "   " }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_markup_only_name_is_rejected() {
    let app = TestApp::new();

    let (status, _) = app
        .post_json("/participants", None, json!({ "name": "<b></b>" }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_name_is_sanitized_before_registration() {
    let app = TestApp::new();

    let (status, body) = app
        .post_json("/participants", None, json!({ "name": "  <i>Alice</i> " }))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Alice");

    let (status, _) = app
        .post_json("/participants", None, json!({ "name": "Alice" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_missing_name_field_is_rejected() {
    let app = TestApp::new();

    let (status, _) = app.post_json("/participants", None, json!({})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
