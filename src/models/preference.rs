use crate::utils::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// A user's interest in one tracked item, keyed by (user, item).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Preference {
    pub user_id: i64,
    pub tracked_item_id: i64,
    pub notify: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePreferenceRequest {
    pub tracked_item_id: Option<i64>,
    pub notify: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatePreferenceRequest {
    pub notify: Option<bool>,
}

impl Preference {
    /// Add a preference; `notify` defaults to true.
    ///
    /// A second insert for the same (user, item) pair is a duplicate-entry
    /// error, not an upsert.
    pub async fn add(
        pool: &SqlitePool,
        user_id: i64,
        tracked_item_id: i64,
        notify: Option<bool>,
    ) -> ApiResult<Preference> {
        let result = sqlx::query_as::<_, Preference>(
            "INSERT INTO user_preferences (user_id, tracked_item_id, notify)
             VALUES (?1, ?2, ?3)
             RETURNING user_id, tracked_item_id, notify",
        )
        .bind(user_id)
        .bind(tracked_item_id)
        .bind(notify.unwrap_or(true))
        .fetch_one(pool)
        .await;

        match result {
            Ok(preference) => Ok(preference),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(ApiError::duplicate_entry(format!(
                    "Preference for user {user_id} and item {tracked_item_id} already exists."
                )))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Remove a preference.
    pub async fn remove(pool: &SqlitePool, user_id: i64, tracked_item_id: i64) -> ApiResult<()> {
        let deleted = sqlx::query_as::<_, Preference>(
            "DELETE FROM user_preferences
             WHERE user_id = ?1 AND tracked_item_id = ?2
             RETURNING user_id, tracked_item_id, notify",
        )
        .bind(user_id)
        .bind(tracked_item_id)
        .fetch_optional(pool)
        .await?;

        if deleted.is_none() {
            return Err(ApiError::not_found(format!(
                "No preference found for user {user_id} and item {tracked_item_id}"
            )));
        }

        Ok(())
    }

    /// Fetch a single preference.
    pub async fn get(
        pool: &SqlitePool,
        user_id: i64,
        tracked_item_id: i64,
    ) -> ApiResult<Preference> {
        let preference = sqlx::query_as::<_, Preference>(
            "SELECT user_id, tracked_item_id, notify
             FROM user_preferences
             WHERE user_id = ?1 AND tracked_item_id = ?2",
        )
        .bind(user_id)
        .bind(tracked_item_id)
        .fetch_optional(pool)
        .await?;

        preference.ok_or_else(|| {
            ApiError::not_found(format!(
                "No preference found for user {user_id} and item {tracked_item_id}"
            ))
        })
    }

    /// All preferences for a user; an empty list is a normal result.
    pub async fn find_all(pool: &SqlitePool, user_id: i64) -> ApiResult<Vec<Preference>> {
        let preferences = sqlx::query_as::<_, Preference>(
            "SELECT user_id, tracked_item_id, notify
             FROM user_preferences
             WHERE user_id = ?1",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(preferences)
    }

    /// Update the notify flag on an existing preference.
    pub async fn update_notify(
        pool: &SqlitePool,
        user_id: i64,
        tracked_item_id: i64,
        notify: Option<bool>,
    ) -> ApiResult<Preference> {
        let updated = sqlx::query_as::<_, Preference>(
            "UPDATE user_preferences
             SET notify = ?1
             WHERE user_id = ?2 AND tracked_item_id = ?3
             RETURNING user_id, tracked_item_id, notify",
        )
        .bind(notify)
        .bind(user_id)
        .bind(tracked_item_id)
        .fetch_optional(pool)
        .await?;

        updated.ok_or_else(|| {
            ApiError::not_found(format!(
                "No preference found for user {user_id} and item {tracked_item_id}"
            ))
        })
    }
}
