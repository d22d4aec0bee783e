use axum::extract::State;
use serde_json::Value;

use crate::error::ApiError;
use crate::handlers::{parse_payload, ApiJson};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{CreateUserRequest, NewUser, UserRecord};
use crate::AppState;

/// POST /api/users - Insert one user.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<UserRecord> {
    let payload: CreateUserRequest = parse_payload(body)?;
    let user = state.store.insert_user(payload.into_new_user()?).await?;

    Ok(ApiResponse::created(user))
}

/// POST /api/users/bulk - Insert a batch of users as a single store call.
pub async fn create_bulk(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Vec<UserRecord>> {
    let payload: Vec<CreateUserRequest> = parse_payload(body)?;
    if payload.is_empty() {
        return Err(ApiError::validation_error("expected a non-empty array of users"));
    }

    let new_users = payload
        .into_iter()
        .map(CreateUserRequest::into_new_user)
        .collect::<Result<Vec<NewUser>, _>>()?;

    let users = state.store.insert_users(new_users).await?;
    let count = users.len();

    Ok(ApiResponse::created(users).with_count(count))
}
