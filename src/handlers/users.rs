use crate::{
    models::{LoginRequest, RegisterRequest, User, UserUpdateRequest},
    utils::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use validator::Validate;

/// Register a new user
pub async fn register(
    State(state): State<crate::AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    request
        .validate()
        .map_err(|e| ApiError::bad_request(format!("Invalid request: {}", e)))?;

    let user = User::register(state.db.pool(), &request.email, &request.password).await?;

    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}

/// Log in an existing user; returns the identity rather than a token
pub async fn login(
    State(state): State<crate::AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let (email, password) = match (&request.email, &request.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email.as_str(), password.as_str())
        }
        _ => return Err(ApiError::bad_request("Email and password required")),
    };

    let user = User::authenticate(state.db.pool(), email, password).await?;

    Ok(Json(json!({ "user": user })))
}

/// Fetch a user by id; the route guard has already matched the caller
pub async fn get_user(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let user = User::get(state.db.pool(), user_id).await?;

    Ok(Json(json!({ "user": user })))
}

/// Apply a partial update to a user's email and/or password
pub async fn update_user(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i64>,
    payload: Result<Json<UserUpdateRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    request
        .validate()
        .map_err(|e| ApiError::bad_request(format!("Invalid request: {}", e)))?;

    let user = User::update(state.db.pool(), user_id, &request).await?;

    Ok(Json(json!({ "user": user })))
}

/// Delete a user
pub async fn remove_user(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    User::remove(state.db.pool(), user_id).await?;

    Ok(Json(json!({ "deleted": user_id })))
}
