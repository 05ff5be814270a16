use crate::auth::{hash_password, verify_password};
use crate::utils::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, SqlitePool};
use validator::Validate;

/// Public user record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// The identity embedded in session tokens: id and email, nothing more.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserIdentity {
    pub id: i64,
    pub email: String,
}

#[derive(FromRow)]
struct CredentialRow {
    id: i64,
    email: String,
    password_hash: String,
}

/// Registration request
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 5, max = 100))]
    pub password: String,
}

/// Login request for the token endpoint
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 5, max = 100))]
    pub password: String,
}

/// Login request for the user session endpoint; fields are checked by hand
/// so missing and empty values get the same 400.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Partial user update
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UserUpdateRequest {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 5, max = 100))]
    pub password: Option<String>,
}

impl User {
    /// Authenticate by email and password.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn authenticate(
        pool: &SqlitePool,
        email: &str,
        password: &str,
    ) -> ApiResult<UserIdentity> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, email, password_hash FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        if let Some(user) = row {
            if verify_password(password, &user.password_hash) {
                return Ok(UserIdentity {
                    id: user.id,
                    email: user.email,
                });
            }
        }

        Err(ApiError::unauthorized("Invalid email/password"))
    }

    /// Register a new user, rejecting duplicate emails.
    pub async fn register(pool: &SqlitePool, email: &str, password: &str) -> ApiResult<UserIdentity> {
        let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = ?1")
            .bind(email)
            .fetch_optional(pool)
            .await?;
        if existing.is_some() {
            return Err(ApiError::bad_request(format!("Duplicate email: {email}")));
        }

        let password_hash = hash_password(password)?;

        let user = sqlx::query_as::<_, UserIdentity>(
            "INSERT INTO users (email, password_hash, created_at)
             VALUES (?1, ?2, ?3)
             RETURNING id, email",
        )
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Find a user by id.
    pub async fn get(pool: &SqlitePool, id: i64) -> ApiResult<User> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, created_at FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        user.ok_or_else(|| ApiError::not_found(format!("No user with ID: {id}")))
    }

    /// List all users ordered by id.
    pub async fn find_all(pool: &SqlitePool) -> ApiResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, created_at FROM users ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Apply a partial update (email and/or password).
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        changes: &UserUpdateRequest,
    ) -> ApiResult<UserIdentity> {
        if changes.email.is_none() && changes.password.is_none() {
            return Err(ApiError::bad_request("No data to update"));
        }

        let mut builder: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE users SET ");
        let mut fields = builder.separated(", ");
        if let Some(email) = &changes.email {
            fields.push("email = ");
            fields.push_bind_unseparated(email.as_str());
        }
        if let Some(password) = &changes.password {
            let password_hash = hash_password(password)?;
            fields.push("password_hash = ");
            fields.push_bind_unseparated(password_hash);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" RETURNING id, email");

        let updated = builder
            .build_query_as::<UserIdentity>()
            .fetch_optional(pool)
            .await?;

        updated.ok_or_else(|| ApiError::not_found(format!("No user with ID: {id}")))
    }

    /// Delete a user by id.
    pub async fn remove(pool: &SqlitePool, id: i64) -> ApiResult<()> {
        let deleted = sqlx::query_scalar::<_, i64>(
            "DELETE FROM users WHERE id = ?1 RETURNING id",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        if deleted.is_none() {
            return Err(ApiError::not_found(format!("No user with ID: {id}")));
        }

        Ok(())
    }
}
