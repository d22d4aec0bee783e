pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod store;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenService;
use crate::store::Store;

/// Shared per-request dependencies: the store handle and the token service.
/// Injected into handlers via axum state rather than held as process
/// globals, so tests can swap in an in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: TokenService,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public credential routes (the entry point to obtaining a token)
        .merge(credential_routes())
        // Protected resource routes
        .merge(user_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn credential_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::auth;

    Router::new()
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
}

fn user_routes(state: AppState) -> Router<AppState> {
    use axum::routing::post;
    use handlers::users;

    Router::new()
        // Collection operations
        .route("/api/users", get(users::list).post(users::create))
        // Bulk variants (static segment wins over the :id capture)
        .route(
            "/api/users/bulk",
            post(users::create_bulk)
                .put(users::update_bulk)
                .delete(users::delete_bulk),
        )
        // Single-record operations
        .route(
            "/api/users/:id",
            get(users::get_one)
                .put(users::update_one)
                .delete(users::delete_one),
        )
        // Search and pagination
        .route("/api/users/page/:page", get(users::page))
        .route("/api/search/:key", get(users::search))
        // Every route above requires a verified bearer credential
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::require_auth,
        ))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "User API (Rust)",
            "version": version,
            "description": "User CRUD API with JWT-gated admin access, built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "register": "POST /api/register (public - token acquisition)",
                "login": "POST /api/login (public - token acquisition)",
                "users": "/api/users[/:id] (protected)",
                "bulk": "/api/users/bulk (protected)",
                "search": "/api/search/:key (protected)",
                "page": "/api/users/page/:page?limit=N (protected)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": "ok"
                }
            })),
        ),
        Err(e) => {
            // Detail stays in the logs; callers only learn the store is down.
            tracing::error!(error = %e, "store health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "store unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
