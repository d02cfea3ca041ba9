use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use brewlog_api::{
    db, service, BrewDetailResponse, BrewListQuery, BrewListResponse, BrewSummary,
    CreateBrewRequest, OkResponse,
};

use crate::error::ApiErr;
use crate::storage::{
    brew_from_row, feedback_from_row, grinder_from_row, sq_execute, sq_exists, sq_query_map,
    sq_query_row, Db,
};

/// POST /api/brews — log a brew. Ratio is derived when the client omits it;
/// the grind setting must fit the grinder's advertised range.
pub async fn create_brew(
    State(db): State<Db>,
    Json(req): Json<CreateBrewRequest>,
) -> Result<(StatusCode, Json<BrewSummary>), ApiErr> {
    service::validate_brew_input(req.water_ml, req.dose_g).map_err(ApiErr::from)?;

    let conn = db.conn();

    if !sq_exists(&conn, &db::beans::exists(&req.bean_id)).unwrap_or(false) {
        return Err(ApiErr::not_found("bean not found"));
    }
    if !sq_exists(&conn, &db::methods::exists(&req.method_id)).unwrap_or(false) {
        return Err(ApiErr::not_found("method not found"));
    }
    let grinder = sq_query_row(
        &conn,
        &db::grinders::get_by_id(&req.grinder_id),
        grinder_from_row,
    )
    .map_err(|_| ApiErr::not_found("grinder not found"))?;

    service::validate_grind_setting(req.grind_setting, grinder.min_setting, grinder.max_setting)
        .map_err(ApiErr::from)?;

    let ratio =
        service::resolve_ratio(req.water_ml, req.dose_g, req.ratio).map_err(ApiErr::from)?;
    let id = Uuid::new_v4().to_string();

    sq_execute(
        &conn,
        &db::brews::insert(&db::brews::InsertParams {
            id: &id,
            bean_id: &req.bean_id,
            method_id: &req.method_id,
            grinder_id: &req.grinder_id,
            water_ml: req.water_ml,
            dose_g: req.dose_g,
            grind_setting: req.grind_setting,
            ratio,
        }),
    )
    .map_err(ApiErr::from_db("create brew"))?;

    let brew = sq_query_row(&conn, &db::brews::get_by_id(&id), brew_from_row)
        .map_err(ApiErr::from_db("read back brew"))?;

    Ok((StatusCode::CREATED, Json(brew)))
}

/// GET /api/brews — paginated listing with optional equipment filters.
pub async fn list_brews(
    State(db): State<Db>,
    Query(query): Query<BrewListQuery>,
) -> Result<Json<BrewListResponse>, ApiErr> {
    let built = db::brews::list(&query);
    let conn = db.conn();

    let total: i64 = sq_query_row(&conn, &built.count_query, |row| row.get(0))
        .map_err(ApiErr::from_db("count brews"))?;
    let brews = sq_query_map(&conn, &built.select_query, brew_from_row)
        .map_err(ApiErr::from_db("list brews"))?;

    Ok(Json(BrewListResponse {
        brews,
        total,
        page: built.page,
        per_page: built.per_page,
    }))
}

/// GET /api/brews/{id} — brew detail with its feedback entries, newest first.
pub async fn get_brew(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<BrewDetailResponse>, ApiErr> {
    let conn = db.conn();

    let brew = sq_query_row(&conn, &db::brews::get_by_id(&id), brew_from_row)
        .map_err(|_| ApiErr::not_found("brew not found"))?;
    let feedback = sq_query_map(&conn, &db::feedback::list_by_brew(&id), feedback_from_row)
        .map_err(ApiErr::from_db("list brew feedback"))?;

    Ok(Json(BrewDetailResponse { brew, feedback }))
}

/// DELETE /api/brews/{id} — unconditional; feedback cascades.
pub async fn delete_brew(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiErr> {
    let conn = db.conn();

    if !sq_exists(&conn, &db::brews::exists(&id)).unwrap_or(false) {
        return Err(ApiErr::not_found("brew not found"));
    }

    sq_execute(&conn, &db::brews::delete(&id)).map_err(ApiErr::from_db("delete brew"))?;
    Ok(Json(OkResponse { success: true }))
}
