use axum::extract::State;
use serde_json::{json, Value};

use crate::auth::password;
use crate::handlers::{parse_payload, ApiJson};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{NewAdmin, RegisterRequest};
use crate::AppState;

/// POST /api/register - Create an admin account and issue a token.
///
/// The password is hashed before it ever reaches the store; the response
/// carries the record with the hash stripped plus a fresh bearer token, so
/// a registered admin can call protected routes immediately.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Value> {
    let payload: RegisterRequest = parse_payload(body)?;
    let (name, email, password) = payload.validated()?;

    let password_hash = password::hash(password).await?;
    let admin = state
        .store
        .create_admin(NewAdmin {
            name,
            email,
            password_hash,
        })
        .await?;

    let token = state.tokens.issue(admin.id)?;
    tracing::info!(admin_id = %admin.id, "admin registered");

    Ok(ApiResponse::created(json!({
        "admin": admin,
        "token": token,
    })))
}
