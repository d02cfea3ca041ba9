use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use brewlog_api::db::migrations::MIGRATIONS;
use brewlog_api::{
    BeanResponse, BrewSummary, FeedbackResponse, GrinderResponse, MethodResponse, RoastLevel,
    SettingType,
};
use brewlog_core::recommend::{BrewRecord, TasteFeedback};

/// A built sea-query statement: SQL plus bind values.
pub type Built = (String, sea_query::Values);

/// Shared database state
#[derive(Clone)]
pub struct Db {
    conn: Arc<Mutex<Connection>>,
}

impl Db {
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }
}

/// Initialize the database: open connection, enable WAL, run migrations
pub fn init_db(data_dir: &Path) -> Result<Db> {
    std::fs::create_dir_all(data_dir)?;
    let db_path = data_dir.join("brewlog.db");
    let conn = Connection::open(&db_path).context("opening SQLite database")?;

    // WAL for concurrent reads; cascades depend on foreign_keys being on
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    run_migrations(&conn)?;

    Ok(Db {
        conn: Arc::new(Mutex::new(conn)),
    })
}

fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    for (name, sql) in MIGRATIONS {
        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if !already_applied {
            conn.execute_batch(sql)
                .with_context(|| format!("running migration {name}"))?;
            conn.execute("INSERT INTO _migrations (name) VALUES (?1)", [name])?;
            tracing::info!("Applied migration: {name}");
        }
    }

    Ok(())
}

// ── sea-query → rusqlite bridge ────────────────────────────────────────────

fn bind_values(values: &sea_query::Values) -> Vec<rusqlite::types::Value> {
    values
        .0
        .iter()
        .map(|v| match v {
            sea_query::Value::String(Some(s)) => {
                rusqlite::types::Value::Text(s.as_str().to_owned())
            }
            sea_query::Value::Bool(Some(b)) => rusqlite::types::Value::Integer(*b as i64),
            sea_query::Value::Int(Some(i)) => rusqlite::types::Value::Integer(*i as i64),
            sea_query::Value::BigInt(Some(i)) => rusqlite::types::Value::Integer(*i),
            sea_query::Value::Unsigned(Some(u)) => rusqlite::types::Value::Integer(*u as i64),
            sea_query::Value::BigUnsigned(Some(u)) => rusqlite::types::Value::Integer(*u as i64),
            sea_query::Value::Float(Some(f)) => rusqlite::types::Value::Real(*f as f64),
            sea_query::Value::Double(Some(f)) => rusqlite::types::Value::Real(*f),
            _ => rusqlite::types::Value::Null,
        })
        .collect()
}

/// Execute a built INSERT/UPDATE/DELETE, returning the affected row count.
pub fn sq_execute(conn: &Connection, built: &Built) -> rusqlite::Result<usize> {
    let (sql, values) = built;
    conn.execute(sql, rusqlite::params_from_iter(bind_values(values)))
}

/// Run a built SELECT expected to return exactly one row.
pub fn sq_query_row<T, F>(conn: &Connection, built: &Built, f: F) -> rusqlite::Result<T>
where
    F: FnOnce(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
{
    let (sql, values) = built;
    conn.query_row(sql, rusqlite::params_from_iter(bind_values(values)), f)
}

/// Run a built SELECT, mapping every row.
pub fn sq_query_map<T, F>(conn: &Connection, built: &Built, f: F) -> rusqlite::Result<Vec<T>>
where
    F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
{
    let (sql, values) = built;
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(bind_values(values)), f)?;
    rows.collect()
}

/// `COUNT(*) > 0` convenience for the `exists` builders.
pub fn sq_exists(conn: &Connection, built: &Built) -> rusqlite::Result<bool> {
    sq_query_row(conn, built, |row| row.get::<_, i64>(0).map(|c| c > 0))
}

// ── Row mappers ────────────────────────────────────────────────────────────

fn bad_column(index: usize, what: &str, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        index,
        rusqlite::types::Type::Text,
        format!("unknown {what}: {value}").into(),
    )
}

/// Map a row from `beans::bean_columns` order.
pub fn bean_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BeanResponse> {
    let roast_level: String = row.get(4)?;
    Ok(BeanResponse {
        id: row.get(0)?,
        name: row.get(1)?,
        roaster: row.get(2)?,
        origin: row.get(3)?,
        roast_level: RoastLevel::parse(&roast_level)
            .ok_or_else(|| bad_column(4, "roast level", &roast_level))?,
        created_at: row.get(5)?,
    })
}

/// Map a row from `methods::method_columns` order.
pub fn method_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MethodResponse> {
    Ok(MethodResponse {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}

/// Map a row from `grinders::grinder_columns` order.
pub fn grinder_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<GrinderResponse> {
    let setting_type: String = row.get(5)?;
    Ok(GrinderResponse {
        id: row.get(0)?,
        name: row.get(1)?,
        min_setting: row.get(2)?,
        max_setting: row.get(3)?,
        step_size: row.get(4)?,
        setting_type: SettingType::parse(&setting_type)
            .ok_or_else(|| bad_column(5, "setting type", &setting_type))?,
        created_at: row.get(6)?,
    })
}

/// Map a row from `brews::brew_columns` order (equipment names joined in).
pub fn brew_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BrewSummary> {
    Ok(BrewSummary {
        id: row.get(0)?,
        bean_id: row.get(1)?,
        bean_name: row.get(2)?,
        method_id: row.get(3)?,
        method_name: row.get(4)?,
        grinder_id: row.get(5)?,
        grinder_name: row.get(6)?,
        water_ml: row.get(7)?,
        dose_g: row.get(8)?,
        grind_setting: row.get(9)?,
        ratio: row.get(10)?,
        created_at: row.get(11)?,
    })
}

/// Map a row from `feedback::feedback_columns` order.
pub fn feedback_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FeedbackResponse> {
    Ok(FeedbackResponse {
        id: row.get(0)?,
        brew_id: row.get(1)?,
        overall_rating: row.get(2)?,
        too_strong: row.get(3)?,
        too_weak: row.get(4)?,
        is_sour: row.get(5)?,
        is_bitter: row.get(6)?,
        coffee_amount_ml: row.get(7)?,
        notes: row.get(8)?,
        created_at: row.get(9)?,
    })
}

/// Map a row from `brews::history` into the recommender's input type.
/// The feedback side of the LEFT JOIN is all-or-nothing on the rating column.
pub fn brew_record_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BrewRecord> {
    let rating: Option<i64> = row.get(4)?;
    let feedback = match rating {
        Some(overall_rating) => Some(TasteFeedback {
            overall_rating,
            too_strong: row.get(5)?,
            too_weak: row.get(6)?,
            is_sour: row.get(7)?,
            is_bitter: row.get(8)?,
        }),
        None => None,
    };
    Ok(BrewRecord {
        water_ml: row.get(0)?,
        dose_g: row.get(1)?,
        grind_setting: row.get(2)?,
        ratio: row.get(3)?,
        feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewlog_api::db;

    #[test]
    fn init_db_applies_all_migrations() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = init_db(dir.path()).expect("init db");
        let conn = db.conn();

        let applied: i64 = conn
            .query_row("SELECT COUNT(*) FROM _migrations", [], |row| row.get(0))
            .expect("count migrations");
        assert_eq!(applied as usize, MIGRATIONS.len());

        // setting_type arrives in a later migration than the grinders table
        conn.execute(
            "INSERT INTO grinders (id, name, min_setting, max_setting, step_size) \
             VALUES ('g1', 'Comandante', 0, 40, 1)",
            [],
        )
        .expect("insert grinder");
        let setting_type: String = conn
            .query_row("SELECT setting_type FROM grinders WHERE id = 'g1'", [], |r| {
                r.get(0)
            })
            .expect("read setting_type");
        assert_eq!(setting_type, "numeric");
    }

    #[test]
    fn init_db_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let db = init_db(dir.path()).expect("first init");
            drop(db);
        }
        let db = init_db(dir.path()).expect("second init");
        let applied: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM _migrations", [], |row| row.get(0))
            .expect("count migrations");
        assert_eq!(applied as usize, MIGRATIONS.len());
    }

    #[test]
    fn deleting_a_brew_cascades_to_feedback() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = init_db(dir.path()).expect("init db");
        let conn = db.conn();

        conn.execute_batch(
            "INSERT INTO beans (id, name, roast_level) VALUES ('be1', 'Kenya AA', 'light');
             INSERT INTO methods (id, name) VALUES ('m1', 'V60');
             INSERT INTO grinders (id, name, min_setting, max_setting, step_size)
                 VALUES ('g1', 'Comandante', 0, 40, 1);
             INSERT INTO brews (id, bean_id, method_id, grinder_id, water_ml, dose_g, grind_setting, ratio)
                 VALUES ('br1', 'be1', 'm1', 'g1', 300, 20, 22, 15);
             INSERT INTO brew_feedback (id, brew_id, overall_rating) VALUES ('f1', 'br1', 4);",
        )
        .expect("seed rows");

        sq_execute(&conn, &db::brews::delete("br1")).expect("delete brew");

        let feedback_left: i64 = conn
            .query_row("SELECT COUNT(*) FROM brew_feedback", [], |row| row.get(0))
            .expect("count feedback");
        assert_eq!(feedback_left, 0);
    }

    #[test]
    fn bridge_round_trips_builders() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = init_db(dir.path()).expect("init db");
        let conn = db.conn();

        sq_execute(
            &conn,
            &db::beans::insert("be1", "Odd Kin", Some("Odd Kin Roasters"), None, "medium"),
        )
        .expect("insert bean");

        assert!(sq_exists(&conn, &db::beans::exists("be1")).expect("exists"));
        assert!(!sq_exists(&conn, &db::beans::exists("nope")).expect("exists"));

        let bean = sq_query_row(&conn, &db::beans::get_by_id("be1"), bean_from_row)
            .expect("get bean");
        assert_eq!(bean.name, "Odd Kin");
        assert_eq!(bean.roaster.as_deref(), Some("Odd Kin Roasters"));
        assert_eq!(bean.origin, None);
        assert_eq!(bean.roast_level, RoastLevel::Medium);
    }
}
