//! Grinder query builders.

use sea_query::{Alias, Asterisk, Expr, Func, Order, Query, SqliteQueryBuilder};

use super::tables::Grinders;

pub type Built = (String, sea_query::Values);

/// Column list for grinder SELECTs. Order must match `grinder_from_row()`.
fn grinder_columns(q: &mut sea_query::SelectStatement) -> &mut sea_query::SelectStatement {
    q.column(Grinders::Id)
        .column(Grinders::Name)
        .column(Grinders::MinSetting)
        .column(Grinders::MaxSetting)
        .column(Grinders::StepSize)
        .column(Grinders::SettingType)
        .column(Grinders::CreatedAt)
}

/// INSERT a new grinder.
pub fn insert(
    id: &str,
    name: &str,
    min_setting: f64,
    max_setting: f64,
    step_size: f64,
    setting_type: &str,
) -> Built {
    Query::insert()
        .into_table(Grinders::Table)
        .columns([
            Grinders::Id,
            Grinders::Name,
            Grinders::MinSetting,
            Grinders::MaxSetting,
            Grinders::StepSize,
            Grinders::SettingType,
        ])
        .values_panic([
            id.into(),
            name.into(),
            min_setting.into(),
            max_setting.into(),
            step_size.into(),
            setting_type.into(),
        ])
        .build(SqliteQueryBuilder)
}

/// SELECT a single grinder by id.
pub fn get_by_id(id: &str) -> Built {
    let mut q = Query::select().to_owned();
    grinder_columns(&mut q);
    q.from(Grinders::Table)
        .and_where(Expr::col(Grinders::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// List all grinders, newest first.
pub fn list() -> Built {
    let mut q = Query::select().to_owned();
    grinder_columns(&mut q);
    q.from(Grinders::Table)
        .order_by(Grinders::CreatedAt, Order::Desc)
        .build(SqliteQueryBuilder)
}

/// Check if a grinder exists.
pub fn exists(id: &str) -> Built {
    Query::select()
        .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("count"))
        .from(Grinders::Table)
        .and_where(Expr::col(Grinders::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// Update a grinder's name.
pub fn update_name(id: &str, name: &str) -> Built {
    Query::update()
        .table(Grinders::Table)
        .value(Grinders::Name, name)
        .and_where(Expr::col(Grinders::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// Update a grinder's adjustment range.
pub fn update_range(id: &str, min_setting: f64, max_setting: f64, step_size: f64) -> Built {
    Query::update()
        .table(Grinders::Table)
        .value(Grinders::MinSetting, min_setting)
        .value(Grinders::MaxSetting, max_setting)
        .value(Grinders::StepSize, step_size)
        .and_where(Expr::col(Grinders::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// Update a grinder's scale type.
pub fn update_setting_type(id: &str, setting_type: &str) -> Built {
    Query::update()
        .table(Grinders::Table)
        .value(Grinders::SettingType, setting_type)
        .and_where(Expr::col(Grinders::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// DELETE a grinder by id. Brews (and their feedback) cascade.
pub fn delete(id: &str) -> Built {
    Query::delete()
        .from_table(Grinders::Table)
        .and_where(Expr::col(Grinders::Id).eq(id))
        .build(SqliteQueryBuilder)
}
