//! SQLite seeding and the standalone check, against a scratch directory.

use fedsql_demo::config::SqliteConfig;
use fedsql_demo::db::{DatabaseClient, LogicalType, SqliteClient, Value};
use fedsql_demo::demo::check_sqlite;
use fedsql_demo::error::DemoError;
use fedsql_demo::seed::seed_sqlite;

fn scratch_config(dir: &tempfile::TempDir) -> SqliteConfig {
    SqliteConfig {
        path: dir.path().join("mock_data.db"),
    }
}

#[tokio::test]
async fn test_seed_then_check() {
    let dir = tempfile::tempdir().unwrap();
    let config = scratch_config(&dir);

    let summary = seed_sqlite(&config).await.unwrap();
    assert_eq!(summary.target, config.path.display().to_string());

    let mut out = Vec::new();
    check_sqlite(&config, &mut out).await.unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("[table] departments"));
    assert!(text.contains("[view ] employee_summary"));
    assert!(text.contains("(11 rows)"));
    assert!(text.contains("--- departments ---"));
    assert!(text.contains("1,500,000.00"));
    assert!(text.contains("--- Top 5 orders ---"));
    assert!(text.contains("Laptop Pro 15"));
    assert!(text.trim_end().ends_with(&format!(
        "OK - all queries passed ({})",
        config.path.display()
    )));
}

#[tokio::test]
async fn test_check_without_seed_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut out = Vec::new();

    let err = check_sqlite(&scratch_config(&dir), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, DemoError::Config(_)));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_seeded_catalog_types() {
    let dir = tempfile::tempdir().unwrap();
    let config = scratch_config(&dir);
    seed_sqlite(&config).await.unwrap();

    let client = SqliteClient::open(&config.path).await.unwrap();
    let catalog = client.introspect_catalog().await.unwrap();

    assert_eq!(catalog.tables().count(), 4);
    assert_eq!(catalog.views().count(), 1);

    let products = catalog.get("products").unwrap();
    let types: Vec<LogicalType> = products.columns.iter().map(|c| c.logical_type).collect();
    assert_eq!(
        types,
        vec![
            LogicalType::Integer,
            LogicalType::Varchar,
            LogicalType::Varchar,
            LogicalType::Double,
            LogicalType::Integer,
        ]
    );
}

#[tokio::test]
async fn test_cross_catalog_products_exist() {
    let dir = tempfile::tempdir().unwrap();
    let config = scratch_config(&dir);
    seed_sqlite(&config).await.unwrap();

    let client = SqliteClient::open(&config.path).await.unwrap();
    let result = client
        .execute_query("SELECT name FROM products WHERE id IN (1, 6) ORDER BY id")
        .await
        .unwrap();

    assert_eq!(
        result.rows,
        vec![
            vec![Value::from("Laptop Pro 15")],
            vec![Value::from("Monitor 27-inch")],
        ]
    );
    client.close().await.unwrap();
}
