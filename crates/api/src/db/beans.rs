//! Bean query builders.

use sea_query::{Alias, Asterisk, Expr, Func, Order, Query, SqliteQueryBuilder};

use super::tables::Beans;

pub type Built = (String, sea_query::Values);

/// Column list for bean SELECTs. Order must match `bean_from_row()`.
fn bean_columns(q: &mut sea_query::SelectStatement) -> &mut sea_query::SelectStatement {
    q.column(Beans::Id)
        .column(Beans::Name)
        .column(Beans::Roaster)
        .column(Beans::Origin)
        .column(Beans::RoastLevel)
        .column(Beans::CreatedAt)
}

/// INSERT a new bean.
pub fn insert(
    id: &str,
    name: &str,
    roaster: Option<&str>,
    origin: Option<&str>,
    roast_level: &str,
) -> Built {
    Query::insert()
        .into_table(Beans::Table)
        .columns([
            Beans::Id,
            Beans::Name,
            Beans::Roaster,
            Beans::Origin,
            Beans::RoastLevel,
        ])
        .values_panic([
            id.into(),
            name.into(),
            roaster.map(|s| s.to_string()).into(),
            origin.map(|s| s.to_string()).into(),
            roast_level.into(),
        ])
        .build(SqliteQueryBuilder)
}

/// SELECT a single bean by id.
pub fn get_by_id(id: &str) -> Built {
    let mut q = Query::select().to_owned();
    bean_columns(&mut q);
    q.from(Beans::Table)
        .and_where(Expr::col(Beans::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// List all beans, newest first.
pub fn list() -> Built {
    let mut q = Query::select().to_owned();
    bean_columns(&mut q);
    q.from(Beans::Table)
        .order_by(Beans::CreatedAt, Order::Desc)
        .build(SqliteQueryBuilder)
}

/// Check if a bean exists.
pub fn exists(id: &str) -> Built {
    Query::select()
        .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("count"))
        .from(Beans::Table)
        .and_where(Expr::col(Beans::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// Update a bean's name.
pub fn update_name(id: &str, name: &str) -> Built {
    Query::update()
        .table(Beans::Table)
        .value(Beans::Name, name)
        .and_where(Expr::col(Beans::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// Update a bean's roaster.
pub fn update_roaster(id: &str, roaster: &str) -> Built {
    Query::update()
        .table(Beans::Table)
        .value(Beans::Roaster, roaster)
        .and_where(Expr::col(Beans::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// Update a bean's origin.
pub fn update_origin(id: &str, origin: &str) -> Built {
    Query::update()
        .table(Beans::Table)
        .value(Beans::Origin, origin)
        .and_where(Expr::col(Beans::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// Update a bean's roast level.
pub fn update_roast_level(id: &str, roast_level: &str) -> Built {
    Query::update()
        .table(Beans::Table)
        .value(Beans::RoastLevel, roast_level)
        .and_where(Expr::col(Beans::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// DELETE a bean by id. Brews (and their feedback) cascade.
pub fn delete(id: &str) -> Built {
    Query::delete()
        .from_table(Beans::Table)
        .and_where(Expr::col(Beans::Id).eq(id))
        .build(SqliteQueryBuilder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_binds_optional_fields_as_null() {
        let (sql, values) = insert("b1", "Odd Kin", None, Some("Ethiopia"), "light");
        assert!(sql.starts_with("INSERT INTO \"beans\""));
        assert_eq!(values.0.len(), 5);
        assert_eq!(values.0[2], sea_query::Value::String(None));
    }

    #[test]
    fn list_orders_newest_first() {
        let (sql, _) = list();
        assert!(sql.contains("ORDER BY \"created_at\" DESC"));
    }
}
