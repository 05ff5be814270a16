use crate::{
    models::{DateRangeQuery, InflationData},
    utils::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde_json::{json, Value};

/// Latest observation per tracked item
pub async fn latest(State(state): State<crate::AppState>) -> ApiResult<Json<Value>> {
    let data = InflationData::latest_for_all(state.db.pool()).await?;

    Ok(Json(json!({ "data": data })))
}

/// All observations for one tracked item
pub async fn by_item(
    State(state): State<crate::AppState>,
    item_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let Path(item_id) = item_id.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let data = InflationData::find_by_item(state.db.pool(), item_id).await?;

    Ok(Json(json!({ "data": data })))
}

/// Observations for one tracked item within an inclusive date range
pub async fn by_item_range(
    State(state): State<crate::AppState>,
    item_id: Result<Path<i64>, PathRejection>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<Json<Value>> {
    let Path(item_id) = item_id.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let (Some(start), Some(end)) = (range.start, range.end) else {
        return Err(ApiError::bad_request(
            "Start and end query parameters are required.",
        ));
    };
    let start = parse_date(&start)?;
    let end = parse_date(&end)?;

    let data = InflationData::find_by_item_and_range(state.db.pool(), item_id, start, end).await?;

    Ok(Json(json!({ "data": data })))
}

fn parse_date(raw: &str) -> ApiResult<NaiveDate> {
    raw.parse::<NaiveDate>()
        .map_err(|_| ApiError::bad_request(format!("Invalid date: {raw}")))
}
