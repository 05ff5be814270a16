use crate::{
    models::{CreatePreferenceRequest, Preference, UpdatePreferenceRequest},
    utils::{ApiError, ApiResult},
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

/// All preferences for a user; an empty list is a normal result
pub async fn list(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let preferences = Preference::find_all(state.db.pool(), user_id).await?;

    Ok(Json(json!({ "preferences": preferences })))
}

/// Add a tracked item to a user's preferences
pub async fn create(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i64>,
    payload: Result<Json<CreatePreferenceRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let tracked_item_id = request
        .tracked_item_id
        .ok_or_else(|| ApiError::bad_request("trackedItemId is required"))?;

    let preference =
        Preference::add(state.db.pool(), user_id, tracked_item_id, request.notify).await?;

    Ok((StatusCode::CREATED, Json(json!({ "preference": preference }))))
}

/// Update the notify flag on an existing preference
pub async fn update(
    State(state): State<crate::AppState>,
    params: Result<Path<(i64, i64)>, PathRejection>,
    payload: Result<Json<UpdatePreferenceRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Path((user_id, item_id)) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let preference =
        Preference::update_notify(state.db.pool(), user_id, item_id, request.notify).await?;

    Ok(Json(json!({ "preference": preference })))
}

/// Remove a tracked item from a user's preferences
pub async fn remove(
    State(state): State<crate::AppState>,
    params: Result<Path<(i64, i64)>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path((user_id, item_id)) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;

    Preference::remove(state.db.pool(), user_id, item_id).await?;

    Ok(Json(json!({
        "deleted": { "userId": user_id, "trackedItemId": item_id }
    })))
}
