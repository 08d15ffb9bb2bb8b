//! Seeding of the two demo databases.
//!
//! Both seeders are destructive: the SQLite file is recreated and the
//! PostgreSQL tables are dropped before being rebuilt.

mod data;
mod postgres;
mod sqlite;

pub use data::{CUSTOMERS, CUSTOMER_ORDERS, DEPARTMENTS, EMPLOYEES, ORDERS, PRODUCTS};
pub use postgres::seed_postgres;
pub use sqlite::seed_sqlite;

use crate::db::DatabaseClient;
use crate::error::{DemoError, Result};

/// Row counts of the tables a seeder created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    /// Where the data went (file path or connection display string).
    pub target: String,
    /// `(table, rows)` in creation order.
    pub tables: Vec<(String, i64)>,
}

impl SeedSummary {
    /// Returns the row count recorded for a table.
    pub fn rows(&self, table: &str) -> Option<i64> {
        self.tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, rows)| *rows)
    }

    /// Formats one aligned `name - N rows` line per table.
    pub fn lines(&self) -> Vec<String> {
        let width = self
            .tables
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0);

        self.tables
            .iter()
            .map(|(name, rows)| format!("  {name:<width$} - {rows} rows"))
            .collect()
    }
}

/// Counts rows through the generic client interface.
async fn count_rows(client: &dyn DatabaseClient, table: &str) -> Result<i64> {
    let result = client
        .execute_query(&format!("SELECT COUNT(*) FROM {table}"))
        .await?;

    result
        .scalar()
        .and_then(|v| v.as_i64())
        .ok_or_else(|| DemoError::internal(format!("COUNT(*) on {table} returned no integer")))
}

async fn summarize(
    client: &dyn DatabaseClient,
    target: String,
    tables: &[&str],
) -> Result<SeedSummary> {
    let mut counts = Vec::with_capacity(tables.len());
    for table in tables {
        counts.push((table.to_string(), count_rows(client, table).await?));
    }
    Ok(SeedSummary {
        target,
        tables: counts,
    })
}
