mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn protected_route_without_header_is_unauthorized() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::request(&app, Method::GET, "/api/users", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert!(
        body["error"]
            .as_str()
            .unwrap_or_default()
            .starts_with("Authentication required"),
        "unexpected error: {}",
        body
    );
    Ok(())
}

#[tokio::test]
async fn all_protected_routes_reject_missing_header() -> Result<()> {
    let app = common::test_app();

    let routes = [
        (Method::POST, "/api/users"),
        (Method::POST, "/api/users/bulk"),
        (Method::GET, "/api/users"),
        (Method::GET, "/api/users/4a3a4b1e-5f7e-4a5e-9d9f-0a1b2c3d4e5f"),
        (Method::PUT, "/api/users/4a3a4b1e-5f7e-4a5e-9d9f-0a1b2c3d4e5f"),
        (Method::PUT, "/api/users/bulk"),
        (Method::DELETE, "/api/users/4a3a4b1e-5f7e-4a5e-9d9f-0a1b2c3d4e5f"),
        (Method::DELETE, "/api/users/bulk"),
        (Method::GET, "/api/search/bob"),
        (Method::GET, "/api/users/page/1"),
    ];

    for (method, path) in routes {
        let (status, body) = common::request(&app, method.clone(), path, None, None).await;
        assert_eq!(
            status,
            StatusCode::UNAUTHORIZED,
            "{} {} should be guarded",
            method,
            path
        );
        assert_eq!(body["success"], false);
    }
    Ok(())
}

#[tokio::test]
async fn tampered_token_is_rejected_as_invalid_credential() -> Result<()> {
    let app = common::test_app();

    let mut token = common::mint_token();
    token.push('x');

    let (status, body) =
        common::request(&app, Method::GET, "/api/users", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert!(
        body["error"]
            .as_str()
            .unwrap_or_default()
            .starts_with("Invalid credential"),
        "unexpected error: {}",
        body
    );
    Ok(())
}

#[tokio::test]
async fn expired_token_is_rejected_as_invalid_credential() -> Result<()> {
    let app = common::test_app();
    let token = common::mint_expired_token();

    let (status, body) =
        common::request(&app, Method::GET, "/api/users", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(
        body["error"]
            .as_str()
            .unwrap_or_default()
            .starts_with("Invalid credential"),
        "unexpected error: {}",
        body
    );
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() -> Result<()> {
    let app = common::test_app();

    // Helper always sends "Bearer <token>", so build the bad header inline.
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/users")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())?;

    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn valid_token_passes_the_gate() -> Result<()> {
    let app = common::test_app();
    let token = common::mint_token();

    let (status, body) =
        common::request(&app, Method::GET, "/api/users", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
    Ok(())
}

#[tokio::test]
async fn health_and_root_are_public() -> Result<()> {
    let app = common::test_app();

    let (status, body) = common::request(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = common::request(&app, Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    Ok(())
}

#[tokio::test]
async fn error_envelope_shape_is_uniform() -> Result<()> {
    let app = common::test_app();

    let (_, body) = common::request(&app, Method::GET, "/api/users", None, None).await;
    assert_eq!(body, json!({"success": false, "error": body["error"]}));
    Ok(())
}
