//! Brew query builders.

use sea_query::{Alias, Asterisk, Expr, Func, Order, Query, SqliteQueryBuilder};

use super::tables::{Beans, Brews, Grinders, Methods};
use crate::BrewListQuery;

pub type Built = (String, sea_query::Values);

/// Result of building a paginated brew list query.
pub struct BuiltBrewListQuery {
    pub count_query: Built,
    pub select_query: Built,
    pub page: u32,
    pub per_page: u32,
}

// ── Helpers ────────────────────────────────────────────────────────────────

/// Brew columns plus equipment names from the joins.
/// Column order must match `brew_from_row()`.
fn brew_columns(q: &mut sea_query::SelectStatement) -> &mut sea_query::SelectStatement {
    q.column((Brews::Table, Brews::Id))
        .column((Brews::Table, Brews::BeanId))
        .column((Beans::Table, Beans::Name))
        .column((Brews::Table, Brews::MethodId))
        .column((Methods::Table, Methods::Name))
        .column((Brews::Table, Brews::GrinderId))
        .column((Grinders::Table, Grinders::Name))
        .column((Brews::Table, Brews::WaterMl))
        .column((Brews::Table, Brews::DoseG))
        .column((Brews::Table, Brews::GrindSetting))
        .column((Brews::Table, Brews::Ratio))
        .column((Brews::Table, Brews::CreatedAt))
}

/// Base SELECT for brew listings (equipment JOINs included).
fn brew_select() -> sea_query::SelectStatement {
    let mut q = Query::select().to_owned();
    brew_columns(&mut q);
    q.from(Brews::Table)
        .inner_join(
            Beans::Table,
            Expr::col((Brews::Table, Brews::BeanId)).equals((Beans::Table, Beans::Id)),
        )
        .inner_join(
            Methods::Table,
            Expr::col((Brews::Table, Brews::MethodId)).equals((Methods::Table, Methods::Id)),
        )
        .inner_join(
            Grinders::Table,
            Expr::col((Brews::Table, Brews::GrinderId)).equals((Grinders::Table, Grinders::Id)),
        )
        .to_owned()
}

// ── Queries ────────────────────────────────────────────────────────────────

/// Parameters for inserting a brew.
pub struct InsertParams<'a> {
    pub id: &'a str,
    pub bean_id: &'a str,
    pub method_id: &'a str,
    pub grinder_id: &'a str,
    pub water_ml: f64,
    pub dose_g: f64,
    pub grind_setting: f64,
    pub ratio: f64,
}

/// INSERT a new brew.
pub fn insert(p: &InsertParams<'_>) -> Built {
    Query::insert()
        .into_table(Brews::Table)
        .columns([
            Brews::Id,
            Brews::BeanId,
            Brews::MethodId,
            Brews::GrinderId,
            Brews::WaterMl,
            Brews::DoseG,
            Brews::GrindSetting,
            Brews::Ratio,
        ])
        .values_panic([
            p.id.into(),
            p.bean_id.into(),
            p.method_id.into(),
            p.grinder_id.into(),
            p.water_ml.into(),
            p.dose_g.into(),
            p.grind_setting.into(),
            p.ratio.into(),
        ])
        .build(SqliteQueryBuilder)
}

/// SELECT a single brew by id (with equipment JOINs).
pub fn get_by_id(id: &str) -> Built {
    brew_select()
        .and_where(Expr::col((Brews::Table, Brews::Id)).eq(id))
        .build(SqliteQueryBuilder)
}

/// Build paginated brew list queries with equipment filters.
pub fn list(q: &BrewListQuery) -> BuiltBrewListQuery {
    let page = q.page.max(1);
    let per_page = q.per_page.clamp(1, 100);
    let offset = (page as u64 - 1) * per_page as u64;

    let mut count_q = Query::select()
        .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("count"))
        .from(Brews::Table)
        .to_owned();

    let mut select_q = brew_select();

    if let Some(ref bean_id) = q.bean_id {
        count_q.and_where(Expr::col(Brews::BeanId).eq(bean_id.as_str()));
        select_q.and_where(Expr::col((Brews::Table, Brews::BeanId)).eq(bean_id.as_str()));
    }
    if let Some(ref method_id) = q.method_id {
        count_q.and_where(Expr::col(Brews::MethodId).eq(method_id.as_str()));
        select_q.and_where(Expr::col((Brews::Table, Brews::MethodId)).eq(method_id.as_str()));
    }
    if let Some(ref grinder_id) = q.grinder_id {
        count_q.and_where(Expr::col(Brews::GrinderId).eq(grinder_id.as_str()));
        select_q.and_where(Expr::col((Brews::Table, Brews::GrinderId)).eq(grinder_id.as_str()));
    }

    select_q
        .order_by((Brews::Table, Brews::CreatedAt), Order::Desc)
        .limit(per_page as u64)
        .offset(offset);

    BuiltBrewListQuery {
        count_query: count_q.build(SqliteQueryBuilder),
        select_query: select_q.build(SqliteQueryBuilder),
        page,
        per_page,
    }
}

/// Check if a brew exists.
pub fn exists(id: &str) -> Built {
    Query::select()
        .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("count"))
        .from(Brews::Table)
        .and_where(Expr::col(Brews::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// DELETE a brew by id. Feedback cascades.
pub fn delete(id: &str) -> Built {
    Query::delete()
        .from_table(Brews::Table)
        .and_where(Expr::col(Brews::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// Brew history for one bean/method/grinder combination, most recent first,
/// each row joined with the brew's latest feedback entry (NULLs when the brew
/// was never rated). The correlated subquery is awkward to express through
/// the builder, so this one stays raw SQL.
/// Column order must match `brew_record_from_row()`.
pub fn history(bean_id: &str, method_id: &str, grinder_id: &str, limit: u32) -> Built {
    let sql = concat!(
        "SELECT \"b\".\"water_ml\", \"b\".\"dose_g\", \"b\".\"grind_setting\", \"b\".\"ratio\", ",
        "\"f\".\"overall_rating\", \"f\".\"too_strong\", \"f\".\"too_weak\", \"f\".\"is_sour\", \"f\".\"is_bitter\" ",
        "FROM \"brews\" \"b\" ",
        "LEFT JOIN \"brew_feedback\" \"f\" ON \"f\".\"id\" = ",
        "(SELECT \"f2\".\"id\" FROM \"brew_feedback\" \"f2\" WHERE \"f2\".\"brew_id\" = \"b\".\"id\" ",
        "ORDER BY \"f2\".\"created_at\" DESC, \"f2\".\"rowid\" DESC LIMIT 1) ",
        "WHERE \"b\".\"bean_id\" = ? AND \"b\".\"method_id\" = ? AND \"b\".\"grinder_id\" = ? ",
        "ORDER BY \"b\".\"created_at\" DESC, \"b\".\"rowid\" DESC LIMIT ?",
    )
    .to_string();
    let values = sea_query::Values(vec![
        bean_id.into(),
        method_id.into(),
        grinder_id.into(),
        (limit as i64).into(),
    ]);
    (sql, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(
        bean_id: Option<&str>,
        method_id: Option<&str>,
        grinder_id: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> BrewListQuery {
        BrewListQuery {
            page,
            per_page,
            bean_id: bean_id.map(String::from),
            method_id: method_id.map(String::from),
            grinder_id: grinder_id.map(String::from),
        }
    }

    #[test]
    fn list_clamps_pagination() {
        let built = list(&query(None, None, None, 0, 500));
        assert_eq!(built.page, 1);
        assert_eq!(built.per_page, 100);
        assert!(built.select_query.0.contains("LIMIT 100"));
        assert!(built.select_query.0.contains("OFFSET 0"));
    }

    #[test]
    fn list_applies_equipment_filters_to_both_queries() {
        let built = list(&query(Some("bean-1"), Some("method-1"), None, 2, 10));
        assert!(built.count_query.0.contains("\"bean_id\" = ?"));
        assert!(built.count_query.0.contains("\"method_id\" = ?"));
        assert!(!built.count_query.0.contains("\"grinder_id\""));
        assert!(built.select_query.0.contains("\"brews\".\"bean_id\" = ?"));
        assert!(built.select_query.0.contains("OFFSET 10"));
        assert_eq!(built.count_query.1.0.len(), 2);
    }

    #[test]
    fn insert_binds_every_parameter() {
        let (sql, values) = insert(&InsertParams {
            id: "brew-1",
            bean_id: "bean-1",
            method_id: "method-1",
            grinder_id: "grinder-1",
            water_ml: 300.0,
            dose_g: 20.0,
            grind_setting: 15.0,
            ratio: 15.0,
        });
        assert!(sql.starts_with("INSERT INTO \"brews\""));
        assert_eq!(values.0.len(), 8);
    }

    #[test]
    fn history_binds_triple_and_limit() {
        let (sql, values) = history("bean-1", "method-1", "grinder-1", 50);
        assert!(sql.contains("LEFT JOIN \"brew_feedback\""));
        assert_eq!(values.0.len(), 4);
        assert_eq!(values.0[3], sea_query::Value::BigInt(Some(50)));
    }
}
