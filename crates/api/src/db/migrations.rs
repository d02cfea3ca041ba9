//! Canonical migration definitions.
//!
//! Applied in order by the server's startup runner, which records each name
//! in a `_migrations` table.

/// A named migration: `(name, sql)`.
pub type Migration = (&'static str, &'static str);

pub const MIGRATIONS: &[Migration] = &[
    (
        "0001_equipment",
        include_str!("../../migrations/0001_equipment.sql"),
    ),
    (
        "0002_brews",
        include_str!("../../migrations/0002_brews.sql"),
    ),
    (
        "0003_brew_feedback",
        include_str!("../../migrations/0003_brew_feedback.sql"),
    ),
    (
        "0004_grinder_setting_type",
        include_str!("../../migrations/0004_grinder_setting_type.sql"),
    ),
];
