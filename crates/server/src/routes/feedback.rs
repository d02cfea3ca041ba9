use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use brewlog_api::{db, service, CreateFeedbackRequest, FeedbackResponse, OkResponse};

use crate::error::ApiErr;
use crate::storage::{feedback_from_row, sq_execute, sq_exists, sq_query_row, Db};

/// POST /api/brews/{id}/feedback — record how a brew tasted.
pub async fn create_feedback(
    State(db): State<Db>,
    Path(brew_id): Path<String>,
    Json(req): Json<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), ApiErr> {
    service::validate_rating(req.overall_rating).map_err(ApiErr::from)?;

    let conn = db.conn();

    if !sq_exists(&conn, &db::brews::exists(&brew_id)).unwrap_or(false) {
        return Err(ApiErr::not_found("brew not found"));
    }

    let id = Uuid::new_v4().to_string();
    sq_execute(
        &conn,
        &db::feedback::insert(&db::feedback::InsertParams {
            id: &id,
            brew_id: &brew_id,
            overall_rating: req.overall_rating,
            too_strong: req.too_strong,
            too_weak: req.too_weak,
            is_sour: req.is_sour,
            is_bitter: req.is_bitter,
            coffee_amount_ml: req.coffee_amount_ml,
            notes: req.notes.as_deref(),
        }),
    )
    .map_err(ApiErr::from_db("create feedback"))?;

    let feedback = sq_query_row(&conn, &db::feedback::get_by_id(&id), feedback_from_row)
        .map_err(ApiErr::from_db("read back feedback"))?;

    Ok((StatusCode::CREATED, Json(feedback)))
}

/// DELETE /api/feedback/{id} — remove one feedback entry.
pub async fn delete_feedback(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiErr> {
    let conn = db.conn();

    if !sq_exists(&conn, &db::feedback::exists(&id)).unwrap_or(false) {
        return Err(ApiErr::not_found("feedback not found"));
    }

    sq_execute(&conn, &db::feedback::delete(&id)).map_err(ApiErr::from_db("delete feedback"))?;
    Ok(Json(OkResponse { success: true }))
}
