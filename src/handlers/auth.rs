use crate::{
    models::{RegisterRequest, TokenRequest, User},
    utils::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use validator::Validate;

/// Exchange email and password for a session token
pub async fn issue_token(
    State(state): State<crate::AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    request
        .validate()
        .map_err(|e| ApiError::bad_request(format!("Invalid request: {}", e)))?;

    let user = User::authenticate(state.db.pool(), &request.email, &request.password).await?;
    let token = state.token_service.issue(user.id, &user.email)?;

    Ok(Json(json!({ "token": token })))
}

/// Register a new user and hand back a session token
pub async fn register(
    State(state): State<crate::AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    request
        .validate()
        .map_err(|e| ApiError::bad_request(format!("Invalid request: {}", e)))?;

    let user = User::register(state.db.pool(), &request.email, &request.password).await?;
    let token = state.token_service.issue(user.id, &user.email)?;

    Ok((StatusCode::CREATED, Json(json!({ "token": token }))))
}
