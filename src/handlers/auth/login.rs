use axum::extract::State;
use serde_json::{json, Value};

use crate::auth::password;
use crate::error::ApiError;
use crate::handlers::{parse_payload, ApiJson};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::LoginRequest;
use crate::AppState;

/// Unknown email and wrong password must be indistinguishable to the
/// caller, so both paths return exactly this message with 401.
const LOGIN_FAILED: &str = "invalid email or password";

/// POST /api/login - Verify admin credentials and issue a token.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Value> {
    let payload: LoginRequest = parse_payload(body)?;

    let email = payload
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("email and password are required"))?;
    let password = payload
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("email and password are required"))?;

    let email = email.trim().to_lowercase();
    let admin = state
        .store
        .find_admin_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::invalid_credential(LOGIN_FAILED))?;

    let verified = password::verify(password, admin.password_hash.clone()).await?;
    if !verified {
        return Err(ApiError::invalid_credential(LOGIN_FAILED));
    }

    let token = state.tokens.issue(admin.id)?;
    tracing::info!(admin_id = %admin.id, "admin logged in");

    Ok(ApiResponse::success(json!({
        "admin": admin,
        "token": token,
    })))
}
