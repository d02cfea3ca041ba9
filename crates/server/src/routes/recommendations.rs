use axum::{
    extract::{Query, State},
    Json,
};

use brewlog_api::{db, RecommendationQuery, RecommendationResponse};
use brewlog_core::recommend;

use crate::error::ApiErr;
use crate::storage::{brew_record_from_row, sq_exists, sq_query_map, sq_query_row, Db};

/// How much history the recommender looks at.
const HISTORY_WINDOW: u32 = 50;

/// GET /api/recommendations?bean_id&method_id&grinder_id — run the
/// recommendation heuristic over the logged history for one equipment
/// combination. All three ids are required and must resolve.
pub async fn get_recommendation(
    State(db): State<Db>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<RecommendationResponse>, ApiErr> {
    let conn = db.conn();

    if !sq_exists(&conn, &db::beans::exists(&query.bean_id)).unwrap_or(false) {
        return Err(ApiErr::not_found("bean not found"));
    }
    let method_name: String =
        sq_query_row(&conn, &db::methods::get_name(&query.method_id), |row| {
            row.get(0)
        })
        .map_err(|_| ApiErr::not_found("method not found"))?;
    if !sq_exists(&conn, &db::grinders::exists(&query.grinder_id)).unwrap_or(false) {
        return Err(ApiErr::not_found("grinder not found"));
    }

    let history = sq_query_map(
        &conn,
        &db::brews::history(
            &query.bean_id,
            &query.method_id,
            &query.grinder_id,
            HISTORY_WINDOW,
        ),
        brew_record_from_row,
    )
    .map_err(ApiErr::from_db("load brew history"))?;

    let rec = recommend::recommend(&history, &method_name);
    Ok(Json(rec.into()))
}
