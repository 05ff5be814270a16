use crate::utils::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// A per-user notification. `user_id` is the owner and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Creation request. Both fields pass through unvalidated; missing values
/// surface as a storage error.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    pub user_id: Option<i64>,
    pub message: Option<String>,
}

impl Notification {
    /// Insert a notification on behalf of `user_id`. No ownership check.
    pub async fn create(
        pool: &SqlitePool,
        user_id: Option<i64>,
        message: Option<String>,
    ) -> ApiResult<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (user_id, message, is_read, created_at)
             VALUES (?1, ?2, FALSE, ?3)
             RETURNING id, user_id, message, is_read, created_at",
        )
        .bind(user_id)
        .bind(message)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(notification)
    }

    /// All notifications for a user, newest first.
    pub async fn find_all_for_user(
        pool: &SqlitePool,
        user_id: i64,
    ) -> ApiResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT id, user_id, message, is_read, created_at
             FROM notifications
             WHERE user_id = ?1
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        if notifications.is_empty() {
            return Err(ApiError::not_found(format!(
                "No notifications for user ID: {user_id}"
            )));
        }

        Ok(notifications)
    }

    /// Mark a notification as read, enforcing ownership.
    ///
    /// Missing id is 404; an existing row owned by someone else is 401. The
    /// update itself stays conditional on (id, owner), so a row that
    /// disappears between check and update reports 404 rather than
    /// succeeding against the wrong row.
    pub async fn mark_as_read(
        pool: &SqlitePool,
        notification_id: i64,
        user_id: i64,
    ) -> ApiResult<Notification> {
        Self::check_owner(pool, notification_id, user_id).await?;

        let updated = sqlx::query_as::<_, Notification>(
            "UPDATE notifications
             SET is_read = TRUE
             WHERE id = ?1 AND user_id = ?2
             RETURNING id, user_id, message, is_read, created_at",
        )
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        updated.ok_or_else(|| {
            ApiError::not_found(format!("No notification with ID: {notification_id}"))
        })
    }

    /// Delete a notification, enforcing ownership. Returns the deleted id.
    pub async fn delete(
        pool: &SqlitePool,
        notification_id: i64,
        user_id: i64,
    ) -> ApiResult<i64> {
        Self::check_owner(pool, notification_id, user_id).await?;

        let deleted = sqlx::query_scalar::<_, i64>(
            "DELETE FROM notifications
             WHERE id = ?1 AND user_id = ?2
             RETURNING id",
        )
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        deleted.ok_or_else(|| {
            ApiError::not_found(format!("No notification with ID: {notification_id}"))
        })
    }

    async fn check_owner(
        pool: &SqlitePool,
        notification_id: i64,
        user_id: i64,
    ) -> ApiResult<()> {
        let owner = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM notifications WHERE id = ?1",
        )
        .bind(notification_id)
        .fetch_optional(pool)
        .await?;

        match owner {
            None => Err(ApiError::not_found(format!(
                "No notification with ID: {notification_id}"
            ))),
            Some(owner) if owner != user_id => Err(ApiError::unauthorized("Unauthorized")),
            Some(_) => Ok(()),
        }
    }
}
