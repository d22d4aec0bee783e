use axum::extract::{Path, State};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::{parse_id, parse_payload, ApiJson};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::BulkDeleteRequest;
use crate::AppState;

/// DELETE /api/users/:id - Remove one user.
pub async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    let removed = state.store.delete_user(id).await?;
    if !removed {
        return Err(ApiError::not_found(format!("user {} not found", id)));
    }

    Ok(ApiResponse::success(json!({})).with_message("user deleted"))
}

/// DELETE /api/users/bulk - Remove all users matching the id set.
///
/// Idempotent: ids that match nothing simply don't count, so repeating the
/// same request yields `deleted: 0` rather than an error.
pub async fn delete_bulk(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> ApiResult<Value> {
    let payload: BulkDeleteRequest = parse_payload(body)?;
    let deleted = state.store.delete_users(&payload.ids).await?;

    Ok(ApiResponse::success(json!({ "deleted": deleted })))
}
