#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use user_api_rust::auth::TokenService;
use user_api_rust::store::MemoryStore;
use user_api_rust::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Build the router against a fresh in-memory store. Each test gets its own
/// isolated store, so tests never observe one another's records.
pub fn test_app() -> Router {
    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        tokens: TokenService::new(TEST_SECRET, 24),
    };
    app(state)
}

/// Mint a valid bearer token without going through register/login. The gate
/// only checks signature and expiry, so an arbitrary subject id is enough.
pub fn mint_token() -> String {
    TokenService::new(TEST_SECRET, 24)
        .issue(Uuid::new_v4())
        .expect("issue token")
}

/// Mint a token that expired in the past.
pub fn mint_expired_token() -> String {
    TokenService::new(TEST_SECRET, -2)
        .issue(Uuid::new_v4())
        .expect("issue token")
}

/// Drive one request through the router and parse the JSON envelope.
pub async fn request(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    let response = app.clone().oneshot(request).await.expect("send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value: Value = serde_json::from_slice(&bytes).expect("json body");

    (status, value)
}
