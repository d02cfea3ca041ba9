use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use brewlog_api::{
    db, service, CreateGrinderRequest, GrinderResponse, ListGrindersResponse, OkResponse,
    UpdateGrinderRequest,
};

use crate::error::ApiErr;
use crate::storage::{grinder_from_row, sq_execute, sq_exists, sq_query_map, sq_query_row, Db};

/// POST /api/grinders — register a grinder.
pub async fn create_grinder(
    State(db): State<Db>,
    Json(req): Json<CreateGrinderRequest>,
) -> Result<(StatusCode, Json<GrinderResponse>), ApiErr> {
    let name = service::validate_entity_name(&req.name, "grinder name").map_err(ApiErr::from)?;
    service::validate_grinder_range(req.min_setting, req.max_setting, req.step_size)
        .map_err(ApiErr::from)?;

    let id = Uuid::new_v4().to_string();
    let conn = db.conn();

    sq_execute(
        &conn,
        &db::grinders::insert(
            &id,
            &name,
            req.min_setting,
            req.max_setting,
            req.step_size,
            req.setting_type.as_str(),
        ),
    )
    .map_err(ApiErr::from_db("create grinder"))?;

    let grinder = sq_query_row(&conn, &db::grinders::get_by_id(&id), grinder_from_row)
        .map_err(ApiErr::from_db("read back grinder"))?;

    Ok((StatusCode::CREATED, Json(grinder)))
}

/// GET /api/grinders — list all grinders, newest first.
pub async fn list_grinders(State(db): State<Db>) -> Result<Json<ListGrindersResponse>, ApiErr> {
    let conn = db.conn();
    let grinders = sq_query_map(&conn, &db::grinders::list(), grinder_from_row)
        .map_err(ApiErr::from_db("list grinders"))?;
    Ok(Json(ListGrindersResponse { grinders }))
}

/// GET /api/grinders/{id} — fetch one grinder.
pub async fn get_grinder(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<GrinderResponse>, ApiErr> {
    let conn = db.conn();
    let grinder = sq_query_row(&conn, &db::grinders::get_by_id(&id), grinder_from_row)
        .map_err(|_| ApiErr::not_found("grinder not found"))?;
    Ok(Json(grinder))
}

/// PUT /api/grinders/{id} — partial update. The merged range is validated,
/// so a request can't leave min/max/step inconsistent.
pub async fn update_grinder(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(req): Json<UpdateGrinderRequest>,
) -> Result<Json<GrinderResponse>, ApiErr> {
    let conn = db.conn();

    let current = sq_query_row(&conn, &db::grinders::get_by_id(&id), grinder_from_row)
        .map_err(|_| ApiErr::not_found("grinder not found"))?;

    let min_setting = req.min_setting.unwrap_or(current.min_setting);
    let max_setting = req.max_setting.unwrap_or(current.max_setting);
    let step_size = req.step_size.unwrap_or(current.step_size);
    service::validate_grinder_range(min_setting, max_setting, step_size).map_err(ApiErr::from)?;

    if let Some(ref name) = req.name {
        let name = service::validate_entity_name(name, "grinder name").map_err(ApiErr::from)?;
        sq_execute(&conn, &db::grinders::update_name(&id, &name))
            .map_err(ApiErr::from_db("update grinder name"))?;
    }
    if req.min_setting.is_some() || req.max_setting.is_some() || req.step_size.is_some() {
        sq_execute(
            &conn,
            &db::grinders::update_range(&id, min_setting, max_setting, step_size),
        )
        .map_err(ApiErr::from_db("update grinder range"))?;
    }
    if let Some(setting_type) = req.setting_type {
        sq_execute(
            &conn,
            &db::grinders::update_setting_type(&id, setting_type.as_str()),
        )
        .map_err(ApiErr::from_db("update grinder setting type"))?;
    }

    let grinder = sq_query_row(&conn, &db::grinders::get_by_id(&id), grinder_from_row)
        .map_err(ApiErr::from_db("read back grinder"))?;
    Ok(Json(grinder))
}

/// DELETE /api/grinders/{id} — unconditional; brews and feedback cascade.
pub async fn delete_grinder(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiErr> {
    let conn = db.conn();

    if !sq_exists(&conn, &db::grinders::exists(&id)).unwrap_or(false) {
        return Err(ApiErr::not_found("grinder not found"));
    }

    sq_execute(&conn, &db::grinders::delete(&id)).map_err(ApiErr::from_db("delete grinder"))?;
    Ok(Json(OkResponse { success: true }))
}
