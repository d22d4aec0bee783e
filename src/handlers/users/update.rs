use axum::extract::{Path, State};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::{parse_id, parse_payload, ApiJson};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{BulkUpdateItem, UpdateUserRequest, UserRecord};
use crate::AppState;

/// PUT /api/users/:id - Replace the supplied fields on one user.
pub async fn update_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<UserRecord> {
    let id = parse_id(&id)?;
    let payload: UpdateUserRequest = parse_payload(body)?;
    let changes = payload.into_changes()?;

    let user = state
        .store
        .update_user(id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("user {} not found", id)))?;

    Ok(ApiResponse::success(user))
}

/// PUT /api/users/bulk - Apply a batch of independent field-set updates.
///
/// Only the aggregate modified count is reported; a per-item failure (an id
/// that resolves to nothing) is invisible to the caller. See DESIGN.md for
/// why this lossy shape is kept.
pub async fn update_bulk(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Value> {
    let payload: Vec<BulkUpdateItem> = parse_payload(body)?;
    if payload.is_empty() {
        return Err(ApiError::validation_error("expected a non-empty array of updates"));
    }

    let updates = payload
        .into_iter()
        .map(|item| Ok((item.id, item.data.into_changes()?)))
        .collect::<Result<Vec<_>, ApiError>>()?;

    let modified = state.store.update_users(updates).await?;

    Ok(ApiResponse::success(json!({ "modified": modified })))
}
