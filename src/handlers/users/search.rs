use axum::extract::{Path, State};

use crate::middleware::{ApiResponse, ApiResult};
use crate::models::UserRecord;
use crate::AppState;

/// GET /api/search/:key - Case-insensitive substring match against name or
/// email. Zero matches is a success with count 0, not an error.
pub async fn search(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Vec<UserRecord>> {
    let users = state.store.search_users(&key).await?;
    let count = users.len();

    Ok(ApiResponse::success(users).with_count(count))
}
