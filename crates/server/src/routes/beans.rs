use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use brewlog_api::{
    db, service, BeanResponse, CreateBeanRequest, ListBeansResponse, OkResponse, UpdateBeanRequest,
};

use crate::error::ApiErr;
use crate::storage::{bean_from_row, sq_execute, sq_exists, sq_query_map, sq_query_row, Db};

/// POST /api/beans — register a coffee bean.
pub async fn create_bean(
    State(db): State<Db>,
    Json(req): Json<CreateBeanRequest>,
) -> Result<(StatusCode, Json<BeanResponse>), ApiErr> {
    let name = service::validate_entity_name(&req.name, "bean name").map_err(ApiErr::from)?;

    let id = Uuid::new_v4().to_string();
    let conn = db.conn();

    sq_execute(
        &conn,
        &db::beans::insert(
            &id,
            &name,
            req.roaster.as_deref(),
            req.origin.as_deref(),
            req.roast_level.as_str(),
        ),
    )
    .map_err(ApiErr::from_db("create bean"))?;

    let bean = sq_query_row(&conn, &db::beans::get_by_id(&id), bean_from_row)
        .map_err(ApiErr::from_db("read back bean"))?;

    Ok((StatusCode::CREATED, Json(bean)))
}

/// GET /api/beans — list all beans, newest first.
pub async fn list_beans(State(db): State<Db>) -> Result<Json<ListBeansResponse>, ApiErr> {
    let conn = db.conn();
    let beans = sq_query_map(&conn, &db::beans::list(), bean_from_row)
        .map_err(ApiErr::from_db("list beans"))?;
    Ok(Json(ListBeansResponse { beans }))
}

/// GET /api/beans/{id} — fetch one bean.
pub async fn get_bean(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<BeanResponse>, ApiErr> {
    let conn = db.conn();
    let bean = sq_query_row(&conn, &db::beans::get_by_id(&id), bean_from_row)
        .map_err(|_| ApiErr::not_found("bean not found"))?;
    Ok(Json(bean))
}

/// PUT /api/beans/{id} — partial update; only provided fields change.
pub async fn update_bean(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBeanRequest>,
) -> Result<Json<BeanResponse>, ApiErr> {
    let conn = db.conn();

    if !sq_exists(&conn, &db::beans::exists(&id)).unwrap_or(false) {
        return Err(ApiErr::not_found("bean not found"));
    }

    if let Some(ref name) = req.name {
        let name = service::validate_entity_name(name, "bean name").map_err(ApiErr::from)?;
        sq_execute(&conn, &db::beans::update_name(&id, &name))
            .map_err(ApiErr::from_db("update bean name"))?;
    }
    if let Some(ref roaster) = req.roaster {
        sq_execute(&conn, &db::beans::update_roaster(&id, roaster))
            .map_err(ApiErr::from_db("update bean roaster"))?;
    }
    if let Some(ref origin) = req.origin {
        sq_execute(&conn, &db::beans::update_origin(&id, origin))
            .map_err(ApiErr::from_db("update bean origin"))?;
    }
    if let Some(roast_level) = req.roast_level {
        sq_execute(
            &conn,
            &db::beans::update_roast_level(&id, roast_level.as_str()),
        )
        .map_err(ApiErr::from_db("update bean roast level"))?;
    }

    let bean = sq_query_row(&conn, &db::beans::get_by_id(&id), bean_from_row)
        .map_err(ApiErr::from_db("read back bean"))?;
    Ok(Json(bean))
}

/// DELETE /api/beans/{id} — unconditional; brews and feedback cascade.
pub async fn delete_bean(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiErr> {
    let conn = db.conn();

    if !sq_exists(&conn, &db::beans::exists(&id)).unwrap_or(false) {
        return Err(ApiErr::not_found("bean not found"));
    }

    sq_execute(&conn, &db::beans::delete(&id)).map_err(ApiErr::from_db("delete bean"))?;
    Ok(Json(OkResponse { success: true }))
}
