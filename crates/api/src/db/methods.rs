//! Brew method query builders.

use sea_query::{Alias, Asterisk, Expr, Func, Order, Query, SqliteQueryBuilder};

use super::tables::Methods;

pub type Built = (String, sea_query::Values);

/// Column list for method SELECTs. Order must match `method_from_row()`.
fn method_columns(q: &mut sea_query::SelectStatement) -> &mut sea_query::SelectStatement {
    q.column(Methods::Id)
        .column(Methods::Name)
        .column(Methods::CreatedAt)
}

/// INSERT a new method.
pub fn insert(id: &str, name: &str) -> Built {
    Query::insert()
        .into_table(Methods::Table)
        .columns([Methods::Id, Methods::Name])
        .values_panic([id.into(), name.into()])
        .build(SqliteQueryBuilder)
}

/// SELECT a single method by id.
pub fn get_by_id(id: &str) -> Built {
    let mut q = Query::select().to_owned();
    method_columns(&mut q);
    q.from(Methods::Table)
        .and_where(Expr::col(Methods::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// Get a method's name by id.
pub fn get_name(id: &str) -> Built {
    Query::select()
        .column(Methods::Name)
        .from(Methods::Table)
        .and_where(Expr::col(Methods::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// List all methods, newest first.
pub fn list() -> Built {
    let mut q = Query::select().to_owned();
    method_columns(&mut q);
    q.from(Methods::Table)
        .order_by(Methods::CreatedAt, Order::Desc)
        .build(SqliteQueryBuilder)
}

/// Check if a method exists.
pub fn exists(id: &str) -> Built {
    Query::select()
        .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("count"))
        .from(Methods::Table)
        .and_where(Expr::col(Methods::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// Update a method's name.
pub fn update_name(id: &str, name: &str) -> Built {
    Query::update()
        .table(Methods::Table)
        .value(Methods::Name, name)
        .and_where(Expr::col(Methods::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// DELETE a method by id. Brews (and their feedback) cascade.
pub fn delete(id: &str) -> Built {
    Query::delete()
        .from_table(Methods::Table)
        .and_where(Expr::col(Methods::Id).eq(id))
        .build(SqliteQueryBuilder)
}
