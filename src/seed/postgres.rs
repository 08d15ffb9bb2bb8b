//! Builds the PostgreSQL demo tables.

use super::data::{CUSTOMERS, CUSTOMER_ORDERS};
use super::{summarize, SeedSummary};
use crate::db::PostgresClient;
use crate::error::{DemoError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Tables reported after seeding, in creation order.
pub const POSTGRES_TABLES: &[&str] = &["customers", "customer_orders"];

const DROP_TABLES: &[&str] = &[
    "DROP TABLE IF EXISTS customer_orders",
    "DROP TABLE IF EXISTS customers",
];

const CREATE_CUSTOMERS: &str = r#"
    CREATE TABLE customers (
        id       SERIAL PRIMARY KEY,
        name     TEXT NOT NULL,
        email    TEXT NOT NULL,
        country  TEXT NOT NULL,
        tier     TEXT NOT NULL
    )
"#;

// product_id has no constraint; it refers to products in the SQLite catalog.
const CREATE_CUSTOMER_ORDERS: &str = r#"
    CREATE TABLE customer_orders (
        id            SERIAL PRIMARY KEY,
        customer_id   INTEGER       NOT NULL REFERENCES customers(id),
        product_id    INTEGER       NOT NULL,
        quantity      INTEGER       NOT NULL,
        order_date    DATE          NOT NULL,
        total_amount  NUMERIC(10,2) NOT NULL
    )
"#;

fn seed_error(step: &str, e: sqlx::Error) -> DemoError {
    DemoError::query(format!("Failed to {step}: {e}"))
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| DemoError::internal(format!("Invalid seed date {text}: {e}")))
}

/// Drops and recreates `customers` and `customer_orders`, then loads the
/// demo rows. Everything happens in one transaction.
///
/// `target` is only used to label the returned summary.
pub async fn seed_postgres(client: &PostgresClient, target: &str) -> Result<SeedSummary> {
    let mut tx = client
        .pool()
        .begin()
        .await
        .map_err(|e| seed_error("begin transaction", e))?;

    for sql in DROP_TABLES
        .iter()
        .copied()
        .chain([CREATE_CUSTOMERS, CREATE_CUSTOMER_ORDERS])
    {
        sqlx::query(sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| seed_error("recreate tables", e))?;
    }

    for &(name, email, country, tier) in CUSTOMERS {
        sqlx::query("INSERT INTO customers (name, email, country, tier) VALUES ($1, $2, $3, $4)")
            .bind(name)
            .bind(email)
            .bind(country)
            .bind(tier)
            .execute(&mut *tx)
            .await
            .map_err(|e| seed_error("insert customer", e))?;
    }

    for &(customer, product, quantity, date, cents) in CUSTOMER_ORDERS {
        sqlx::query(
            "INSERT INTO customer_orders \
             (customer_id, product_id, quantity, order_date, total_amount) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(customer)
        .bind(product)
        .bind(quantity)
        .bind(parse_date(date)?)
        .bind(Decimal::new(cents, 2))
        .execute(&mut *tx)
        .await
        .map_err(|e| seed_error("insert customer order", e))?;
    }

    tx.commit()
        .await
        .map_err(|e| seed_error("commit transaction", e))?;
    debug!("PostgreSQL schema and data committed");

    let summary = summarize(client, target.to_string(), POSTGRES_TABLES).await?;
    info!("Seeded PostgreSQL database {}", target);
    Ok(summary)
}
