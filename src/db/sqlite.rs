//! SQLite database client implementation.
//!
//! Opens (or recreates) the demo SQLite file, runs queries against it
//! directly, and introspects the catalog the query engine exposes.

use crate::db::postgres::format_query_error;
use crate::db::{
    Catalog, Column, ColumnInfo, DatabaseClient, LogicalType, QueryResult, Relation, RelationKind,
    Row, Value,
};
use crate::error::{DemoError, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Column as SqlxColumn, Executor, Row as SqlxRow, TypeInfo, ValueRef};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// SQLite database client.
#[derive(Debug)]
pub struct SqliteClient {
    pool: SqlitePool,
    path: PathBuf,
}

impl SqliteClient {
    /// Opens an existing database file.
    pub async fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DemoError::config(format!(
                "Database not found: {}. Run `fedsql seed-sqlite` first.",
                path.display()
            )));
        }
        Self::connect(path, false).await
    }

    /// Creates a fresh database file, replacing any existing one.
    pub async fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Removing existing database {}", path.display());
            std::fs::remove_file(path)?;
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::connect(path, true).await
    }

    async fn connect(path: &Path, create: bool) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(create)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| {
                DemoError::connection(format!("Failed to open {}: {e}", path.display()))
            })?;

        debug!("Opened SQLite database {}", path.display());

        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    /// Returns the underlying pool, for transactional work such as seeding.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the database file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lists every table and view with its columns and row count.
    pub async fn introspect_catalog(&self) -> Result<Catalog> {
        let names: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT type, name
            FROM sqlite_master
            WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite_%'
            ORDER BY type, name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DemoError::query(format!("Failed to list tables: {e}")))?;

        let mut relations = Vec::with_capacity(names.len());

        for (kind, name) in names {
            let Some(kind) = RelationKind::parse(&kind) else {
                continue;
            };
            let columns = self.fetch_columns(&name).await?;
            let row_count = self.count_rows(&name).await?;

            relations.push(Relation {
                name,
                kind,
                columns,
                row_count,
            });
        }

        Ok(Catalog { relations })
    }

    /// Fetches columns for a table or view in ordinal order.
    async fn fetch_columns(&self, relation: &str) -> Result<Vec<Column>> {
        let rows: Vec<(i64, String, String, i64, i64)> = sqlx::query_as(
            r#"
            SELECT cid, name, type, "notnull", pk
            FROM pragma_table_info(?1)
            ORDER BY cid
            "#,
        )
        .bind(relation)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DemoError::query(format!("Failed to get columns for {relation}: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(cid, name, declared_type, not_null, pk)| Column {
                name,
                ordinal: cid as usize,
                logical_type: LogicalType::from_declared(&declared_type),
                declared_type,
                is_nullable: not_null == 0,
                is_primary_key: pk > 0,
            })
            .collect())
    }

    async fn count_rows(&self, relation: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(relation));
        sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DemoError::query(format!("Failed to count rows in {relation}: {e}")))
    }

    async fn fetch_column_metadata(&self, sql: &str) -> Vec<ColumnInfo> {
        match (&self.pool).describe(sql).await {
            Ok(described) => described
                .columns()
                .iter()
                .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                .collect(),
            Err(e) => {
                debug!("Could not describe statement: {e}");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl DatabaseClient for SqliteClient {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();

        let result = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DemoError::query(format_query_error(e)))?;

        let execution_time = start.elapsed();

        let columns: Vec<ColumnInfo> = if let Some(first_row) = result.first() {
            first_row
                .columns()
                .iter()
                .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                .collect()
        } else {
            self.fetch_column_metadata(sql).await
        };

        let rows: Vec<Row> = result.iter().map(convert_row).collect();

        Ok(QueryResult::with_data(columns, rows).with_execution_time(execution_time))
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

/// Quotes an identifier for interpolation into SQL.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn convert_row(row: &SqliteRow) -> Row {
    (0..row.columns().len())
        .map(|i| convert_value(row, i))
        .collect()
}

/// Converts a value by its runtime storage class.
///
/// SQLite columns carry no enforced type, so the declared column type is
/// not a reliable guide to what a given cell holds.
fn convert_value(row: &SqliteRow, index: usize) -> Value {
    let storage_class = match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw.type_info().name().to_string(),
        Err(_) => return Value::Null,
    };

    match storage_class.as_str() {
        "INTEGER" => row
            .try_get::<i64, _>(index)
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "REAL" => row
            .try_get::<f64, _>(index)
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "BLOB" => row
            .try_get::<Vec<u8>, _>(index)
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        _ => row
            .try_get::<String, _>(index)
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}
