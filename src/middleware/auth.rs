use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// Verified identity extracted from the bearer credential and attached to
/// the request for downstream handlers.
#[derive(Clone, Debug)]
pub struct AuthAdmin {
    pub admin_id: Uuid,
}

/// Authentication gate guarding every resource route.
///
/// Missing or malformed `Authorization` header rejects with 401
/// (authentication required); a present-but-unverifiable token rejects with
/// 401 (invalid credential). On success the verified subject id is attached
/// to request extensions and control proceeds.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)?;
    let claims = state.tokens.verify(&token)?;

    request.extensions_mut().insert(AuthAdmin {
        admin_id: claims.sub,
    });

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::authentication_required("missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::authentication_required("invalid Authorization header"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        Some(_) => Err(ApiError::authentication_required("empty bearer token")),
        None => Err(ApiError::authentication_required(
            "Authorization header must use Bearer token format",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).expect("header"));
        headers
    }

    #[test]
    fn missing_header_rejected() {
        let err = extract_bearer_token(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, ApiError::AuthenticationRequired(_)));
    }

    #[test]
    fn non_bearer_scheme_rejected() {
        let err = extract_bearer_token(&headers_with("Basic dXNlcjpwYXNz")).unwrap_err();
        assert!(matches!(err, ApiError::AuthenticationRequired(_)));
    }

    #[test]
    fn empty_token_rejected() {
        let err = extract_bearer_token(&headers_with("Bearer  ")).unwrap_err();
        assert!(matches!(err, ApiError::AuthenticationRequired(_)));
    }

    #[test]
    fn bearer_token_extracted() {
        let token = extract_bearer_token(&headers_with("Bearer abc.def.ghi")).expect("token");
        assert_eq!(token, "abc.def.ghi");
    }
}
