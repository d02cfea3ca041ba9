//! Shared database schema, migrations, and query builders.
//!
//! Every builder returns `(String, sea_query::Values)`; the server's storage
//! layer bridges that tuple to rusqlite.

pub mod beans;
pub mod brews;
pub mod feedback;
pub mod grinders;
pub mod methods;
pub mod migrations;
pub mod stats;
pub mod tables;

// Re-export tables for convenience
pub use tables::*;
