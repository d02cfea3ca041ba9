use axum::{extract::State, Json};

use brewlog_api::db::tables::{Beans, BrewFeedback, Brews, Grinders, Methods};
use brewlog_api::{db, HealthResponse, TableCounts};

use crate::error::ApiErr;
use crate::storage::{sq_query_row, Db};

/// GET /api/health — database connectivity plus per-table row counts.
/// A database failure yields 503 with the underlying message attached.
pub async fn health(State(db): State<Db>) -> Result<Json<HealthResponse>, ApiErr> {
    let conn = db.conn();

    let counts = (|| -> rusqlite::Result<TableCounts> {
        Ok(TableCounts {
            beans: sq_query_row(&conn, &db::stats::row_count(Beans::Table), |r| r.get(0))?,
            methods: sq_query_row(&conn, &db::stats::row_count(Methods::Table), |r| r.get(0))?,
            grinders: sq_query_row(&conn, &db::stats::row_count(Grinders::Table), |r| r.get(0))?,
            brews: sq_query_row(&conn, &db::stats::row_count(Brews::Table), |r| r.get(0))?,
            brew_feedback: sq_query_row(&conn, &db::stats::row_count(BrewFeedback::Table), |r| {
                r.get(0)
            })?,
        })
    })();

    match counts {
        Ok(tables) => Ok(Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: "connected".to_string(),
            tables,
        })),
        Err(e) => {
            tracing::error!("health check query failed: {e}");
            Err(ApiErr::unavailable(format!("database unavailable: {e}")))
        }
    }
}
