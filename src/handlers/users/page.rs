use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

const DEFAULT_LIMIT: u64 = 10;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
}

/// GET /api/users/page/:page?limit=N - One page of users in the store's
/// natural order. Pages are 1-based; `pages` is derived from the full
/// collection count, not from the returned slice.
pub async fn page(
    State(state): State<AppState>,
    Path(page): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Value> {
    let page: u64 = page
        .parse()
        .ok()
        .filter(|p| *p >= 1)
        .ok_or_else(|| ApiError::bad_request(format!("invalid page number: {}", page)))?;

    let limit: u64 = match query.limit {
        Some(raw) => raw
            .parse()
            .ok()
            .filter(|l| *l >= 1)
            .ok_or_else(|| ApiError::bad_request(format!("invalid limit: {}", raw)))?,
        None => DEFAULT_LIMIT,
    };

    // page and limit are caller-supplied; the product can exceed u64.
    let offset = (page - 1)
        .checked_mul(limit)
        .ok_or_else(|| ApiError::bad_request(format!("page {} out of range", page)))?;
    let (items, total) = state.store.page_users(offset, limit).await?;
    let count = items.len();

    Ok(ApiResponse::success(json!({
        "items": items,
        "page": page,
        "limit": limit,
        "total": total,
        "pages": total.div_ceil(limit),
    }))
    .with_count(count))
}
