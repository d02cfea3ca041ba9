//! Row counts and aggregates for the health and metrics endpoints.

use sea_query::{Alias, Asterisk, Expr, Func, IntoTableRef, Query, SqliteQueryBuilder};

use super::tables::BrewFeedback;

pub type Built = (String, sea_query::Values);

/// COUNT(*) over a table.
pub fn row_count<T: IntoTableRef>(table: T) -> Built {
    Query::select()
        .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("count"))
        .from(table)
        .build(SqliteQueryBuilder)
}

/// Mean overall rating across all feedback (NULL when none recorded).
pub fn average_rating() -> Built {
    Query::select()
        .expr_as(
            Func::avg(Expr::col(BrewFeedback::OverallRating)),
            Alias::new("avg_rating"),
        )
        .from(BrewFeedback::Table)
        .build(SqliteQueryBuilder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tables::Brews;

    #[test]
    fn row_count_targets_the_given_table() {
        let (sql, _) = row_count(Brews::Table);
        assert_eq!(sql, "SELECT COUNT(*) AS \"count\" FROM \"brews\"");
    }

    #[test]
    fn average_rating_reads_brew_feedback() {
        let (sql, _) = average_rating();
        assert!(sql.contains("AVG(\"overall_rating\")"));
        assert!(sql.contains("\"brew_feedback\""));
    }
}
