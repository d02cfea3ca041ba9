use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use brewlog_api::{
    db, service, CreateMethodRequest, ListMethodsResponse, MethodResponse, OkResponse,
    UpdateMethodRequest,
};

use crate::error::ApiErr;
use crate::storage::{method_from_row, sq_execute, sq_exists, sq_query_map, sq_query_row, Db};

/// POST /api/methods — register a brewing method.
pub async fn create_method(
    State(db): State<Db>,
    Json(req): Json<CreateMethodRequest>,
) -> Result<(StatusCode, Json<MethodResponse>), ApiErr> {
    let name = service::validate_entity_name(&req.name, "method name").map_err(ApiErr::from)?;

    let id = Uuid::new_v4().to_string();
    let conn = db.conn();

    sq_execute(&conn, &db::methods::insert(&id, &name))
        .map_err(ApiErr::from_db("create method"))?;

    let method = sq_query_row(&conn, &db::methods::get_by_id(&id), method_from_row)
        .map_err(ApiErr::from_db("read back method"))?;

    Ok((StatusCode::CREATED, Json(method)))
}

/// GET /api/methods — list all methods, newest first.
pub async fn list_methods(State(db): State<Db>) -> Result<Json<ListMethodsResponse>, ApiErr> {
    let conn = db.conn();
    let methods = sq_query_map(&conn, &db::methods::list(), method_from_row)
        .map_err(ApiErr::from_db("list methods"))?;
    Ok(Json(ListMethodsResponse { methods }))
}

/// GET /api/methods/{id} — fetch one method.
pub async fn get_method(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<MethodResponse>, ApiErr> {
    let conn = db.conn();
    let method = sq_query_row(&conn, &db::methods::get_by_id(&id), method_from_row)
        .map_err(|_| ApiErr::not_found("method not found"))?;
    Ok(Json(method))
}

/// PUT /api/methods/{id} — rename a method.
pub async fn update_method(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(req): Json<UpdateMethodRequest>,
) -> Result<Json<MethodResponse>, ApiErr> {
    let conn = db.conn();

    if !sq_exists(&conn, &db::methods::exists(&id)).unwrap_or(false) {
        return Err(ApiErr::not_found("method not found"));
    }

    if let Some(ref name) = req.name {
        let name = service::validate_entity_name(name, "method name").map_err(ApiErr::from)?;
        sq_execute(&conn, &db::methods::update_name(&id, &name))
            .map_err(ApiErr::from_db("update method name"))?;
    }

    let method = sq_query_row(&conn, &db::methods::get_by_id(&id), method_from_row)
        .map_err(ApiErr::from_db("read back method"))?;
    Ok(Json(method))
}

/// DELETE /api/methods/{id} — unconditional; brews and feedback cascade.
pub async fn delete_method(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiErr> {
    let conn = db.conn();

    if !sq_exists(&conn, &db::methods::exists(&id)).unwrap_or(false) {
        return Err(ApiErr::not_found("method not found"));
    }

    sq_execute(&conn, &db::methods::delete(&id)).map_err(ApiErr::from_db("delete method"))?;
    Ok(Json(OkResponse { success: true }))
}
