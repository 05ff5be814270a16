use crate::{
    auth::AuthUser,
    models::{CreateNotificationRequest, Notification},
    utils::{ApiError, ApiResult},
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

/// All notifications for a user, newest first
pub async fn list_for_user(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let notifications = Notification::find_all_for_user(state.db.pool(), user_id).await?;

    Ok(Json(json!({ "notifications": notifications })))
}

/// Create a notification on behalf of any user (system events, no auth)
pub async fn create(
    State(state): State<crate::AppState>,
    payload: Result<Json<CreateNotificationRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let notification =
        Notification::create(state.db.pool(), request.user_id, request.message).await?;

    Ok((StatusCode::CREATED, Json(json!({ "notification": notification }))))
}

/// Mark one of the caller's notifications as read
pub async fn mark_read(
    State(state): State<crate::AppState>,
    Extension(auth_user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let notification = Notification::mark_as_read(state.db.pool(), id, auth_user.id).await?;

    Ok(Json(json!({ "notification": notification })))
}

/// Delete one of the caller's notifications
pub async fn remove(
    State(state): State<crate::AppState>,
    Extension(auth_user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path(id) = id.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let deleted = Notification::delete(state.db.pool(), id, auth_user.id).await?;

    Ok(Json(json!({ "deleted": deleted })))
}
