//! Taste feedback query builders.

use sea_query::{Alias, Asterisk, Expr, Func, Order, Query, SqliteQueryBuilder};

use super::tables::BrewFeedback;

pub type Built = (String, sea_query::Values);

/// Column list for feedback SELECTs. Order must match `feedback_from_row()`.
fn feedback_columns(q: &mut sea_query::SelectStatement) -> &mut sea_query::SelectStatement {
    q.column(BrewFeedback::Id)
        .column(BrewFeedback::BrewId)
        .column(BrewFeedback::OverallRating)
        .column(BrewFeedback::TooStrong)
        .column(BrewFeedback::TooWeak)
        .column(BrewFeedback::IsSour)
        .column(BrewFeedback::IsBitter)
        .column(BrewFeedback::CoffeeAmountMl)
        .column(BrewFeedback::Notes)
        .column(BrewFeedback::CreatedAt)
}

/// Parameters for inserting a feedback entry.
pub struct InsertParams<'a> {
    pub id: &'a str,
    pub brew_id: &'a str,
    pub overall_rating: i64,
    pub too_strong: bool,
    pub too_weak: bool,
    pub is_sour: bool,
    pub is_bitter: bool,
    pub coffee_amount_ml: Option<f64>,
    pub notes: Option<&'a str>,
}

/// INSERT a new feedback entry.
pub fn insert(p: &InsertParams<'_>) -> Built {
    Query::insert()
        .into_table(BrewFeedback::Table)
        .columns([
            BrewFeedback::Id,
            BrewFeedback::BrewId,
            BrewFeedback::OverallRating,
            BrewFeedback::TooStrong,
            BrewFeedback::TooWeak,
            BrewFeedback::IsSour,
            BrewFeedback::IsBitter,
            BrewFeedback::CoffeeAmountMl,
            BrewFeedback::Notes,
        ])
        .values_panic([
            p.id.into(),
            p.brew_id.into(),
            p.overall_rating.into(),
            p.too_strong.into(),
            p.too_weak.into(),
            p.is_sour.into(),
            p.is_bitter.into(),
            p.coffee_amount_ml.into(),
            p.notes.map(|s| s.to_string()).into(),
        ])
        .build(SqliteQueryBuilder)
}

/// SELECT a single feedback entry by id.
pub fn get_by_id(id: &str) -> Built {
    let mut q = Query::select().to_owned();
    feedback_columns(&mut q);
    q.from(BrewFeedback::Table)
        .and_where(Expr::col(BrewFeedback::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// List all feedback for a brew, newest first.
pub fn list_by_brew(brew_id: &str) -> Built {
    let mut q = Query::select().to_owned();
    feedback_columns(&mut q);
    q.from(BrewFeedback::Table)
        .and_where(Expr::col(BrewFeedback::BrewId).eq(brew_id))
        .order_by(BrewFeedback::CreatedAt, Order::Desc)
        .build(SqliteQueryBuilder)
}

/// Check if a feedback entry exists.
pub fn exists(id: &str) -> Built {
    Query::select()
        .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("count"))
        .from(BrewFeedback::Table)
        .and_where(Expr::col(BrewFeedback::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// DELETE a feedback entry by id.
pub fn delete(id: &str) -> Built {
    Query::delete()
        .from_table(BrewFeedback::Table)
        .and_where(Expr::col(BrewFeedback::Id).eq(id))
        .build(SqliteQueryBuilder)
}
