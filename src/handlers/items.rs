use crate::{
    models::TrackedItem,
    utils::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

/// List all tracked items
pub async fn list_items(State(state): State<crate::AppState>) -> ApiResult<Json<Value>> {
    let items = TrackedItem::find_all(state.db.pool()).await?;

    Ok(Json(json!({ "trackedItems": items })))
}

/// Fetch a single tracked item by id
pub async fn get_item(
    State(state): State<crate::AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let item = TrackedItem::get(state.db.pool(), id).await?;

    Ok(Json(json!({ "trackedItem": item })))
}
