//! Integration tests for fedsql.

pub mod postgres_test;
pub mod presto_test;
pub mod render_test;
pub mod sqlite_test;
