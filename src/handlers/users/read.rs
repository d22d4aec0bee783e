use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::UserRecord;
use crate::AppState;

/// GET /api/users - All users, unfiltered and unpaginated.
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<UserRecord>> {
    let users = state.store.list_users().await?;
    let count = users.len();

    Ok(ApiResponse::success(users).with_count(count))
}

/// GET /api/users/:id - One user by id.
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserRecord> {
    let id = parse_id(&id)?;
    let user = state
        .store
        .find_user(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("user {} not found", id)))?;

    Ok(ApiResponse::success(user))
}
