#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use pricewatch_api::{
    auth::TokenService,
    create_app,
    utils::config::{DatabaseConfig, FredConfig, JwtConfig, RateLimitConfig, ServerConfig},
    AppState, Config, Database,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-not-for-production";

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["http://localhost:5173".to_string()],
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
        rate_limit: RateLimitConfig {
            login_window_secs: 900,
            login_max_attempts: 5,
        },
        fred: FredConfig {
            api_key: Some("test-key".to_string()),
            base_url: "http://localhost/fred/series/observations".to_string(),
            observation_start: "2023-01-01".to_string(),
        },
    }
}

/// Fresh in-memory state with migrations applied.
pub async fn test_state() -> AppState {
    let db = Database::in_memory().await.expect("in-memory database");
    db.migrate().await.expect("migrations");

    AppState {
        db,
        token_service: Arc::new(TokenService::new(TEST_JWT_SECRET)),
        config: Arc::new(test_config()),
    }
}

pub async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    (create_app(state.clone()), state)
}

/// Fire one request at the router and decode the JSON response.
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    send(app, request).await
}

/// Fire a hand-built request (for custom headers) and decode the response.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Register a user directly against the model and mint a token for them.
pub async fn seed_user(state: &AppState, email: &str, password: &str) -> (i64, String) {
    let user = pricewatch_api::models::User::register(state.db.pool(), email, password)
        .await
        .expect("register user");
    let token = state
        .token_service
        .issue(user.id, &user.email)
        .expect("issue token");
    (user.id, token)
}

/// Mint a token with the admin flag set, bypassing the issuer.
pub fn admin_token(user_id: i64, email: &str) -> String {
    let claims = pricewatch_api::auth::Claims {
        id: user_id,
        email: email.to_string(),
        is_admin: Some(true),
        iat: chrono::Utc::now().timestamp(),
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("admin token")
}

/// Insert a category and return its id.
pub async fn seed_category(state: &AppState, name: &str, description: Option<&str>) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO categories (name, description) VALUES (?1, ?2) RETURNING id",
    )
    .bind(name)
    .bind(description)
    .fetch_one(state.db.pool())
    .await
    .expect("seed category")
}

/// Insert a tracked item and return its id.
pub async fn seed_item(state: &AppState, category_id: i64, name: &str, series_id: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO tracked_items (category_id, name, series_id) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(category_id)
    .bind(name)
    .bind(series_id)
    .fetch_one(state.db.pool())
    .await
    .expect("seed item")
}

/// Insert one observation.
pub async fn seed_observation(state: &AppState, item_id: i64, date: &str, value: f64) {
    sqlx::query("INSERT INTO inflation_data (tracked_item_id, date, value) VALUES (?1, ?2, ?3)")
        .bind(item_id)
        .bind(date)
        .bind(value)
        .execute(state.db.pool())
        .await
        .expect("seed observation");
}

/// Insert a notification and return its id.
pub async fn seed_notification(state: &AppState, user_id: i64, message: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO notifications (user_id, message, is_read, created_at)
         VALUES (?1, ?2, FALSE, ?3) RETURNING id",
    )
    .bind(user_id)
    .bind(message)
    .bind(chrono::Utc::now())
    .fetch_one(state.db.pool())
    .await
    .expect("seed notification")
}
