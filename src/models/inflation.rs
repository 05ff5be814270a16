use crate::utils::{ApiError, ApiResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// One CPI observation for a tracked item on a given date.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InflationData {
    pub id: i64,
    pub tracked_item_id: i64,
    pub date: NaiveDate,
    pub value: f64,
}

/// Query parameters for the ranged observation lookup. Both bounds are
/// required; they stay strings here so a missing value and an unparseable
/// one produce distinct 400 messages.
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl InflationData {
    /// All observations for one tracked item, ordered by date.
    pub async fn find_by_item(pool: &SqlitePool, item_id: i64) -> ApiResult<Vec<InflationData>> {
        let data = sqlx::query_as::<_, InflationData>(
            "SELECT id, tracked_item_id, date, value
             FROM inflation_data
             WHERE tracked_item_id = ?1
             ORDER BY date",
        )
        .bind(item_id)
        .fetch_all(pool)
        .await?;

        if data.is_empty() {
            return Err(ApiError::not_found(format!("No data for itemID: {item_id}")));
        }

        Ok(data)
    }

    /// Observations for one item between two dates, inclusive.
    pub async fn find_by_item_and_range(
        pool: &SqlitePool,
        item_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ApiResult<Vec<InflationData>> {
        let data = sqlx::query_as::<_, InflationData>(
            "SELECT id, tracked_item_id, date, value
             FROM inflation_data
             WHERE tracked_item_id = ?1
             AND date BETWEEN ?2 AND ?3
             ORDER BY date",
        )
        .bind(item_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        if data.is_empty() {
            return Err(ApiError::not_found(format!("No data for itemID: {item_id}")));
        }

        Ok(data)
    }

    /// The most recent observation for every tracked item with data.
    pub async fn latest_for_all(pool: &SqlitePool) -> ApiResult<Vec<InflationData>> {
        let data = sqlx::query_as::<_, InflationData>(
            "SELECT d.id, d.tracked_item_id, d.date, d.value
             FROM inflation_data AS d
             JOIN (
                 SELECT tracked_item_id, MAX(date) AS max_date
                 FROM inflation_data
                 GROUP BY tracked_item_id
             ) AS latest
               ON latest.tracked_item_id = d.tracked_item_id
              AND latest.max_date = d.date
             ORDER BY d.tracked_item_id",
        )
        .fetch_all(pool)
        .await?;

        if data.is_empty() {
            return Err(ApiError::not_found("No inflation data found."));
        }

        Ok(data)
    }

    /// Insert one observation, ignoring duplicates for the same item and
    /// date. Returns whether a row was actually written.
    pub async fn insert_observation(
        pool: &SqlitePool,
        item_id: i64,
        date: NaiveDate,
        value: f64,
    ) -> ApiResult<bool> {
        let result = sqlx::query(
            "INSERT INTO inflation_data (tracked_item_id, date, value)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (tracked_item_id, date) DO NOTHING",
        )
        .bind(item_id)
        .bind(date)
        .bind(value)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
