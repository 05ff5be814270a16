/// User account route tests
/// Registration, session login, and the owner-guarded profile routes.

mod common;

use axum::http::{Method, StatusCode};
use pricewatch_api::models::User;
use serde_json::json;

// Test user registration returns the public identity
#[tokio::test]
async fn test_register_creates_user() {
    let (app, _state) = common::test_app().await;

    let (status, body) = common::request(
        &app,
        Method::POST,
        "/users/register",
        None,
        Some(json!({ "email": "new@example.com", "password": "password123" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "new@example.com");
    assert!(body["user"]["id"].is_i64());
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

// Test registration rejects a duplicate email
#[tokio::test]
async fn test_register_rejects_duplicate() {
    let (app, state) = common::test_app().await;
    common::seed_user(&state, "taken@example.com", "password123").await;

    let (status, body) = common::request(
        &app,
        Method::POST,
        "/users/register",
        None,
        Some(json!({ "email": "taken@example.com", "password": "password123" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Duplicate email: taken@example.com");
}

// Test session login returns the identity, not a token
#[tokio::test]
async fn test_login_returns_identity() {
    let (app, state) = common::test_app().await;
    let (user_id, _) = common::seed_user(&state, "login@example.com", "password123").await;

    let (status, body) = common::request(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "email": "login@example.com", "password": "password123" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id);
    assert_eq!(body["user"]["email"], "login@example.com");
    assert!(body.get("token").is_none());
}

// Test login rejects missing or empty credentials with a fixed message
#[tokio::test]
async fn test_login_requires_credentials() {
    let (app, _state) = common::test_app().await;

    for payload in [
        json!({}),
        json!({ "email": "login@example.com" }),
        json!({ "password": "password123" }),
        json!({ "email": "", "password": "password123" }),
        json!({ "email": "login@example.com", "password": "" }),
    ] {
        let (status, body) =
            common::request(&app, Method::POST, "/users/login", None, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Email and password required");
    }
}

// Test login rejects bad credentials
#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let (app, state) = common::test_app().await;
    common::seed_user(&state, "login@example.com", "password123").await;

    let (status, body) = common::request(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "email": "login@example.com", "password": "not-the-password" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Invalid email/password");
}

// Test fetching the caller's own profile
#[tokio::test]
async fn test_get_user() {
    let (app, state) = common::test_app().await;
    let (user_id, token) = common::seed_user(&state, "me@example.com", "password123").await;

    let (status, body) = common::request(
        &app,
        Method::GET,
        &format!("/users/{user_id}"),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user_id);
    assert_eq!(body["user"]["email"], "me@example.com");
    assert!(body["user"]["created_at"].is_string());
}

// Test updating the caller's email
#[tokio::test]
async fn test_update_user_email() {
    let (app, state) = common::test_app().await;
    let (user_id, token) = common::seed_user(&state, "old@example.com", "password123").await;

    let (status, body) = common::request(
        &app,
        Method::PATCH,
        &format!("/users/{user_id}"),
        Some(&token),
        Some(json!({ "email": "renamed@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "renamed@example.com");

    // The change is visible on a fresh read; the token's embedded email is
    // stale but the guard keys on the id
    let (status, body) = common::request(
        &app,
        Method::GET,
        &format!("/users/{user_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "renamed@example.com");
}

// Test updating the caller's password
#[tokio::test]
async fn test_update_user_password() {
    let (app, state) = common::test_app().await;
    let (user_id, token) = common::seed_user(&state, "me@example.com", "password123").await;

    let (status, _) = common::request(
        &app,
        Method::PATCH,
        &format!("/users/{user_id}"),
        Some(&token),
        Some(json!({ "password": "changed-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Old password no longer works
    let (status, _) = common::request(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "email": "me@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // New one does
    let (status, _) = common::request(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "email": "me@example.com", "password": "changed-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

// Test that an empty update payload is rejected
#[tokio::test]
async fn test_update_user_rejects_empty_payload() {
    let (app, state) = common::test_app().await;
    let (user_id, token) = common::seed_user(&state, "me@example.com", "password123").await;

    let (status, body) = common::request(
        &app,
        Method::PATCH,
        &format!("/users/{user_id}"),
        Some(&token),
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "No data to update");
}

// Test that updates go through request validation
#[tokio::test]
async fn test_update_user_validates_email() {
    let (app, state) = common::test_app().await;
    let (user_id, token) = common::seed_user(&state, "me@example.com", "password123").await;

    let (status, _) = common::request(
        &app,
        Method::PATCH,
        &format!("/users/{user_id}"),
        Some(&token),
        Some(json!({ "email": "not-an-email" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// Test that updates reject tokens for a different user
#[tokio::test]
async fn test_update_user_rejects_other_user() {
    let (app, state) = common::test_app().await;
    let (owner_id, _) = common::seed_user(&state, "owner@example.com", "password123").await;
    let (_, intruder) = common::seed_user(&state, "intruder@example.com", "password123").await;

    let (status, _) = common::request(
        &app,
        Method::PATCH,
        &format!("/users/{owner_id}"),
        Some(&intruder),
        Some(json!({ "email": "hijack@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// Test account deletion
#[tokio::test]
async fn test_remove_user() {
    let (app, state) = common::test_app().await;
    let (user_id, token) = common::seed_user(&state, "gone@example.com", "password123").await;

    let (status, body) = common::request(
        &app,
        Method::DELETE,
        &format!("/users/{user_id}"),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], user_id);

    // The token remains signed but the account is gone
    let (status, body) = common::request(
        &app,
        Method::GET,
        &format!("/users/{user_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"]["message"],
        format!("No user with ID: {user_id}")
    );
}

// Test deletion rejects anonymous callers
#[tokio::test]
async fn test_remove_user_rejects_anonymous() {
    let (app, state) = common::test_app().await;
    let (user_id, _) = common::seed_user(&state, "safe@example.com", "password123").await;

    let (status, _) = common::request(
        &app,
        Method::DELETE,
        &format!("/users/{user_id}"),
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// Test the user listing used by maintenance tooling
#[tokio::test]
async fn test_find_all_users() {
    let state = common::test_state().await;
    common::seed_user(&state, "a@example.com", "password123").await;
    common::seed_user(&state, "b@example.com", "password123").await;

    let users = User::find_all(state.db.pool()).await.expect("find_all");

    assert_eq!(users.len(), 2);
    assert!(users[0].id < users[1].id);
    assert_eq!(users[0].email, "a@example.com");
}
