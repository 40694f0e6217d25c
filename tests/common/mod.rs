//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use axum::{
    body::{to_bytes, Body},
    http::{HeaderValue, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use chat_room::config::Settings;
use chat_room::presentation::http::routes::create_router;
use chat_room::startup::AppState;

/// Test application over an in-memory store
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let settings = Settings::defaults().expect("default settings are valid");
        let state = AppState::in_memory(settings);

        Self {
            router: create_router(state.clone()),
            state,
        }
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header("User", HeaderValue::from_bytes(user.as_bytes()).unwrap());
        }

        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, user: Option<&str>) -> (StatusCode, Value) {
        self.send("GET", uri, user, None).await
    }

    pub async fn post_json(&self, uri: &str, user: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, user, Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, user: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, user, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, user: Option<&str>) -> (StatusCode, Value) {
        self.send("DELETE", uri, user, None).await
    }

    /// POST /status with no body
    pub async fn heartbeat(&self, user: Option<&str>) -> StatusCode {
        self.send("POST", "/status", user, None).await.0
    }

    /// Register a participant, asserting success
    pub async fn register(&self, name: &str) {
        let (status, _) = self
            .post_json("/participants", None, serde_json::json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "registering {}", name);
    }

    /// Post a message, asserting success, and return its id
    pub async fn say(&self, from: &str, to: &str, text: &str, kind: &str) -> String {
        let (status, body) = self
            .post_json(
                "/messages",
                Some(from),
                serde_json::json!({ "to": to, "text": text, "kind": kind }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "posting {:?}", body);
        body["id"].as_str().unwrap().to_string()
    }

    /// Texts of the messages visible to `viewer`, oldest first
    pub async fn texts_for(&self, viewer: &str, query: &str) -> Vec<String> {
        let (status, body) = self.get(&format!("/messages{}", query), Some(viewer)).await;
        assert_eq!(status, StatusCode::OK);
        body.as_array()
            .unwrap()
            .iter()
            .map(|m| m["text"].as_str().unwrap().to_string())
            .collect()
    }
}
