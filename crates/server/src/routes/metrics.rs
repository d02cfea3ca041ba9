use axum::{extract::State, Json};
use chrono::Utc;

use brewlog_api::db::tables::{BrewFeedback, Brews};
use brewlog_api::{db, MetricsResponse};
use brewlog_core::calc::round_tenth;

use crate::error::ApiErr;
use crate::storage::sq_query_row;
use crate::AppState;

/// GET /api/metrics — service info and aggregate totals.
pub async fn metrics(State(state): State<AppState>) -> Result<Json<MetricsResponse>, ApiErr> {
    let conn = state.db.conn();

    let brews_recorded: i64 = sq_query_row(&conn, &db::stats::row_count(Brews::Table), |r| {
        r.get(0)
    })
    .map_err(ApiErr::from_db("count brews"))?;
    let feedback_recorded: i64 =
        sq_query_row(&conn, &db::stats::row_count(BrewFeedback::Table), |r| {
            r.get(0)
        })
        .map_err(ApiErr::from_db("count feedback"))?;
    let average_rating: Option<f64> = sq_query_row(&conn, &db::stats::average_rating(), |r| {
        r.get(0)
    })
    .map_err(ApiErr::from_db("average rating"))?;

    let uptime_seconds = Utc::now()
        .signed_duration_since(state.started_at)
        .num_seconds()
        .max(0);

    Ok(Json(MetricsResponse {
        service: "brewlog".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.started_at.to_rfc3339(),
        uptime_seconds,
        brews_recorded,
        feedback_recorded,
        average_rating: average_rating.map(round_tenth),
    }))
}
