use crate::{models::InflationData, utils::config::FredConfig};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::{FromRow, SqlitePool};
use tracing::{info, warn};

/// One observation as FRED returns it. Values arrive as strings; missing
/// data points carry the "." placeholder.
#[derive(Debug, Clone, Deserialize)]
pub struct FredObservation {
    pub date: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
struct FredResponse {
    observations: Vec<FredObservation>,
}

/// HTTP client for the FRED series-observations endpoint
#[derive(Debug)]
pub struct FredClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    observation_start: String,
}

impl FredClient {
    pub fn new(config: &FredConfig) -> Result<Self> {
        let api_key = config.api_key.clone().context("FRED_API_KEY must be set")?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            observation_start: config.observation_start.clone(),
        })
    }

    /// Fetch all observations for a series since the configured start date.
    pub async fn observations(&self, series_id: &str) -> Result<Vec<FredObservation>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("observation_start", self.observation_start.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: FredResponse = response.json().await?;
        Ok(body.observations)
    }
}

/// Totals from one sync run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub synced_series: usize,
    pub skipped_series: usize,
    pub inserted: usize,
}

#[derive(FromRow)]
struct SeriesRow {
    id: i64,
    name: String,
    series_id: String,
}

/// Fetch observations for every tracked item and store them.
///
/// A series that fails to fetch is logged and skipped; the run continues
/// with the remaining items. Re-running is idempotent because inserts
/// ignore (item, date) conflicts.
pub async fn sync_inflation_data(pool: &SqlitePool, client: &FredClient) -> Result<SyncSummary> {
    let items =
        sqlx::query_as::<_, SeriesRow>("SELECT id, name, series_id FROM tracked_items")
            .fetch_all(pool)
            .await?;

    let mut summary = SyncSummary::default();
    for item in items {
        info!("Fetching data for {} ({})", item.name, item.series_id);
        match sync_series(pool, client, &item).await {
            Ok(inserted) => {
                info!("Synced {}", item.name);
                summary.synced_series += 1;
                summary.inserted += inserted;
            }
            Err(err) => {
                warn!(
                    "Skipping {} (bad series ID or FRED issue): {}",
                    item.name, err
                );
                summary.skipped_series += 1;
            }
        }
    }

    Ok(summary)
}

async fn sync_series(pool: &SqlitePool, client: &FredClient, item: &SeriesRow) -> Result<usize> {
    let observations = client.observations(&item.series_id).await?;

    let mut inserted = 0;
    for obs in observations {
        let value = match obs.value.parse::<f64>() {
            Ok(value) if !value.is_nan() => value,
            _ => continue,
        };
        let Ok(date) = obs.date.parse::<NaiveDate>() else {
            continue;
        };

        if InflationData::insert_observation(pool, item.id, date, value).await? {
            inserted += 1;
        }
    }

    Ok(inserted)
}
