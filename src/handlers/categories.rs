use crate::{
    models::Category,
    utils::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

/// List all categories
pub async fn list_categories(State(state): State<crate::AppState>) -> ApiResult<Json<Value>> {
    let categories = Category::find_all(state.db.pool()).await?;

    Ok(Json(json!({ "categories": categories })))
}

/// Fetch a single category by id
pub async fn get_category(
    State(state): State<crate::AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let category = Category::get(state.db.pool(), id).await?;

    Ok(Json(json!({ "category": category })))
}

/// Fetch a category together with its tracked items
pub async fn get_category_with_items(
    State(state): State<crate::AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let category = Category::get_with_items(state.db.pool(), id).await?;

    Ok(Json(json!({ "categoryWithItems": category })))
}
