//! Message Log API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;

const JOIN: &str = "entra na sala...";

async fn room() -> TestApp {
    let app = TestApp::new();
    for name in ["Alice", "Bob", "Carol"] {
        app.register(name).await;
    }
    app
}

#[tokio::test]
async fn test_post_returns_created_message() {
    let app = room().await;

    let (status, body) = app
        .post_json(
            "/messages",
            Some("Alice"),
            json!({ "to": "Todos", "text": "hello", "kind": "message" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["from"], "Alice");
    assert_eq!(body["to"], "Todos");
    assert_eq!(body["text"], "hello");
    assert_eq!(body["kind"], "message");
    assert!(body["id"].as_str().unwrap().parse::<i64>().is_ok());
    assert_eq!(body["time"].as_str().unwrap().len(), 8);
}

#[tokio::test]
async fn test_post_from_unregistered_author_is_rejected() {
    let app = room().await;

    let (status, _) = app
        .post_json(
            "/messages",
            Some("Mallory"),
            json!({ "to": "Todos", "text": "hi", "kind": "message" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_post_with_status_kind_is_rejected() {
    let app = room().await;

    let (status, _) = app
        .post_json(
            "/messages",
            Some("Alice"),
            json!({ "to": "Todos", "text": "entra na sala...", "kind": "status" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_post_with_empty_text_is_rejected() {
    let app = room().await;

    let (status, _) = app
        .post_json(
            "/messages",
            Some("Alice"),
            json!({ "to": "Todos", "text": " <br> ", "kind": "message" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_post_without_user_header_is_rejected() {
    let app = room().await;

    let (status, _) = app
        .post_json(
            "/messages",
            None,
            json!({ "to": "Todos", "text": "hi", "kind": "message" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_private_message_is_visible_to_sender_and_recipient_only() {
    let app = room().await;
    app.say("Alice", "Bob", "psst", "private-message").await;
    app.say("Carol", "Alice", "public reply", "message").await;

    assert_eq!(
        app.texts_for("Carol", "").await,
        vec![JOIN, JOIN, JOIN, "public reply"]
    );
    assert_eq!(
        app.texts_for("Bob", "").await,
        vec![JOIN, JOIN, JOIN, "psst", "public reply"]
    );
    assert_eq!(
        app.texts_for("Alice", "").await,
        vec![JOIN, JOIN, JOIN, "psst", "public reply"]
    );
}

#[tokio::test]
async fn test_private_message_to_everyone_is_visible_to_all() {
    let app = room().await;
    app.say("Alice", "Todos", "announcement", "private-message").await;

    assert_eq!(
        app.texts_for("Carol", "").await.last().map(String::as_str),
        Some("announcement")
    );
}

#[tokio::test]
async fn test_limit_returns_most_recent_visible_messages() {
    let app = room().await;
    app.say("Alice", "Todos", "one", "message").await;
    app.say("Alice", "Bob", "secret", "private-message").await;
    app.say("Bob", "Todos", "two", "message").await;
    app.say("Carol", "Todos", "three", "message").await;

    assert_eq!(app.texts_for("Carol", "?limit=2").await, vec!["two", "three"]);
    assert_eq!(app.texts_for("Bob", "?limit=3").await, vec!["secret", "two", "three"]);
    assert_eq!(app.texts_for("Carol", "?limit=100").await.len(), 6);
}

#[tokio::test]
async fn test_invalid_limit_is_rejected() {
    let app = room().await;

    for query in ["?limit=0", "?limit=-1", "?limit=abc"] {
        let (status, _) = app.get(&format!("/messages{}", query), Some("Alice")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "query {}", query);
    }
}

#[tokio::test]
async fn test_query_without_user_header_is_rejected() {
    let app = room().await;

    let (status, _) = app.get("/messages", None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_author_can_edit_message() {
    let app = room().await;
    let id = app.say("Alice", "Todos", "helo", "message").await;

    let (status, body) = app
        .put_json(
            &format!("/messages/{}", id),
            Some("Alice"),
            json!({ "to": "Bob", "text": "hello", "kind": "private-message" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["from"], "Alice");
    assert_eq!(body["to"], "Bob");
    assert_eq!(body["text"], "hello");
    assert_eq!(body["kind"], "private-message");
    assert_eq!(app.texts_for("Carol", "").await, vec![JOIN, JOIN, JOIN]);
}

#[tokio::test]
async fn test_edit_by_another_participant_is_unauthorized() {
    let app = room().await;
    let id = app.say("Alice", "Todos", "mine", "message").await;

    let (status, body) = app
        .put_json(
            &format!("/messages/{}", id),
            Some("Bob"),
            json!({ "to": "Todos", "text": "hijacked", "kind": "message" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);
    assert_eq!(app.texts_for("Bob", "?limit=1").await, vec!["mine"]);
}

#[tokio::test]
async fn test_edit_unknown_message_is_not_found() {
    let app = room().await;

    for id in ["123456789", "not-a-number"] {
        let (status, _) = app
            .put_json(
                &format!("/messages/{}", id),
                Some("Alice"),
                json!({ "to": "Todos", "text": "x", "kind": "message" }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "id {}", id);
    }
}

#[tokio::test]
async fn test_edit_to_status_kind_is_rejected() {
    let app = room().await;
    let id = app.say("Alice", "Todos", "mine", "message").await;

    let (status, _) = app
        .put_json(
            &format!("/messages/{}", id),
            Some("Alice"),
            json!({ "to": "Todos", "text": "sai da sala...", "kind": "status" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_author_can_delete_message() {
    let app = room().await;
    let id = app.say("Alice", "Todos", "oops", "message").await;
    let uri = format!("/messages/{}", id);

    let (status, _) = app.delete(&uri, Some("Bob")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.delete(&uri, Some("Alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.texts_for("Alice", "").await, vec![JOIN, JOIN, JOIN]);

    let (status, _) = app.delete(&uri, Some("Alice")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_by_another_participant_is_unauthorized_for_any_kind() {
    let app = room().await;
    let id = app.say("Alice", "Todos", "mine", "message").await;

    let (status, _) = app
        .put_json(
            &format!("/messages/{}", id),
            Some("Bob"),
            json!({ "to": "Todos", "text": "sai da sala...", "kind": "status" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
