use crate::utils::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// An item whose price series is tracked, tied to a FRED series id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrackedItem {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub series_id: String,
    pub created_at: DateTime<Utc>,
}

impl TrackedItem {
    /// All tracked items, ordered by name.
    pub async fn find_all(pool: &SqlitePool) -> ApiResult<Vec<TrackedItem>> {
        let items = sqlx::query_as::<_, TrackedItem>(
            "SELECT id, category_id, name, series_id, created_at
             FROM tracked_items
             ORDER BY name",
        )
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    /// A single tracked item by id.
    pub async fn get(pool: &SqlitePool, id: i64) -> ApiResult<TrackedItem> {
        let item = sqlx::query_as::<_, TrackedItem>(
            "SELECT id, category_id, name, series_id, created_at
             FROM tracked_items
             WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        item.ok_or_else(|| ApiError::not_found(format!("No item: {id}")))
    }
}
