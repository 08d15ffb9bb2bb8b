//! PostgreSQL seeding tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL environment variable to run them.

use fedsql_demo::config::PostgresConfig;
use fedsql_demo::db::{DatabaseClient, PostgresClient, Value};
use fedsql_demo::seed::seed_postgres;
use rust_decimal::Decimal;

/// Helper to create a test client.
async fn get_test_client() -> Option<PostgresClient> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let config = PostgresConfig {
        connect_retries: 1,
        ..PostgresConfig::from_connection_string(&url).ok()?
    };
    PostgresClient::connect(&config).await.ok()
}

#[tokio::test]
async fn test_seed_postgres_counts() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let summary = seed_postgres(&client, "test").await.unwrap();
    assert_eq!(summary.rows("customers"), Some(8));
    assert_eq!(summary.rows("customer_orders"), Some(16));

    // Seeding again replaces rather than appends.
    let summary = seed_postgres(&client, "test").await.unwrap();
    assert_eq!(summary.rows("customer_orders"), Some(16));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_seeded_numeric_and_date_types() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    seed_postgres(&client, "test").await.unwrap();

    let result = client
        .execute_query(
            "SELECT order_date, total_amount FROM customer_orders ORDER BY total_amount DESC LIMIT 1",
        )
        .await
        .unwrap();

    assert_eq!(result.rows[0][0].to_string(), "2024-04-01");
    assert_eq!(
        result.rows[0][1],
        Value::Decimal(Decimal::new(1_299_990, 2))
    );

    client.close().await.unwrap();
}
