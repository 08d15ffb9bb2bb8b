//! Database abstraction layer for fedsql.
//!
//! Provides a trait-based interface for running SQL, so the demo runner can
//! talk to PostgreSQL, SQLite or the federated query engine interchangeably.

mod mock;
mod postgres;
mod presto;
mod schema;
mod sqlite;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use postgres::PostgresClient;
pub use presto::PrestoClient;
pub use schema::{Catalog, Column, LogicalType, Relation, RelationKind, DEFAULT_SCHEMA};
pub use sqlite::SqliteClient;
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the interface for database clients.
///
/// All database operations are async and return Results with DemoError.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a SQL query and returns the fully fetched results.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;

    /// Closes the connection.
    async fn close(&self) -> Result<()>;
}
