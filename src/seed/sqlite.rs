//! Builds the SQLite demo database.

use super::data::{DEPARTMENTS, EMPLOYEES, ORDERS, PRODUCTS};
use super::{summarize, SeedSummary};
use crate::config::SqliteConfig;
use crate::db::{DatabaseClient, SqliteClient};
use crate::error::{DemoError, Result};
use tracing::{debug, info};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE departments (
        id        INTEGER PRIMARY KEY,
        name      TEXT    NOT NULL,
        budget    REAL    NOT NULL,
        location  TEXT    NOT NULL
    )
    "#,
    r#"
    CREATE TABLE employees (
        id             INTEGER PRIMARY KEY,
        first_name     TEXT    NOT NULL,
        last_name      TEXT    NOT NULL,
        email          TEXT    NOT NULL,
        department_id  INTEGER NOT NULL,
        salary         REAL    NOT NULL,
        hire_date      TEXT    NOT NULL,
        is_active      INTEGER NOT NULL DEFAULT 1,
        FOREIGN KEY (department_id) REFERENCES departments(id)
    )
    "#,
    r#"
    CREATE TABLE products (
        id        INTEGER PRIMARY KEY,
        name      TEXT    NOT NULL,
        category  TEXT    NOT NULL,
        price     REAL    NOT NULL,
        stock     INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE orders (
        id            INTEGER PRIMARY KEY,
        employee_id   INTEGER NOT NULL,
        product_id    INTEGER NOT NULL,
        quantity      INTEGER NOT NULL,
        order_date    TEXT    NOT NULL,
        total_amount  REAL    NOT NULL,
        FOREIGN KEY (employee_id) REFERENCES employees(id),
        FOREIGN KEY (product_id)  REFERENCES products(id)
    )
    "#,
    r#"
    CREATE VIEW employee_summary AS
    SELECT
        e.id,
        e.first_name || ' ' || e.last_name AS full_name,
        d.name AS department,
        e.salary,
        e.hire_date
    FROM employees e
    JOIN departments d ON e.department_id = d.id
    WHERE e.is_active = 1
    "#,
];

/// Tables reported after seeding, in creation order.
pub const SQLITE_TABLES: &[&str] = &["departments", "employees", "products", "orders"];

fn seed_error(step: &str, e: sqlx::Error) -> DemoError {
    DemoError::query(format!("Failed to {step}: {e}"))
}

/// Recreates the SQLite file at `config.path` and fills it with the demo data.
///
/// All statements run in one transaction; on failure the file is left
/// without any demo tables.
pub async fn seed_sqlite(config: &SqliteConfig) -> Result<SeedSummary> {
    let client = SqliteClient::create(&config.path).await?;
    let mut tx = client
        .pool()
        .begin()
        .await
        .map_err(|e| seed_error("begin transaction", e))?;

    for ddl in SCHEMA {
        sqlx::query(ddl)
            .execute(&mut *tx)
            .await
            .map_err(|e| seed_error("create schema", e))?;
    }

    for &(id, name, budget, location) in DEPARTMENTS {
        sqlx::query("INSERT INTO departments VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(budget)
            .bind(location)
            .execute(&mut *tx)
            .await
            .map_err(|e| seed_error("insert department", e))?;
    }

    for &(id, first, last, email, department, salary, hired, active) in EMPLOYEES {
        sqlx::query("INSERT INTO employees VALUES (?, ?, ?, ?, ?, ?, ?, ?)")
            .bind(id)
            .bind(first)
            .bind(last)
            .bind(email)
            .bind(department)
            .bind(salary)
            .bind(hired)
            .bind(i64::from(active))
            .execute(&mut *tx)
            .await
            .map_err(|e| seed_error("insert employee", e))?;
    }

    for &(id, name, category, price, stock) in PRODUCTS {
        sqlx::query("INSERT INTO products VALUES (?, ?, ?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(category)
            .bind(price)
            .bind(stock)
            .execute(&mut *tx)
            .await
            .map_err(|e| seed_error("insert product", e))?;
    }

    for &(id, employee, product, quantity, date, total) in ORDERS {
        sqlx::query("INSERT INTO orders VALUES (?, ?, ?, ?, ?, ?)")
            .bind(id)
            .bind(employee)
            .bind(product)
            .bind(quantity)
            .bind(date)
            .bind(total)
            .execute(&mut *tx)
            .await
            .map_err(|e| seed_error("insert order", e))?;
    }

    tx.commit()
        .await
        .map_err(|e| seed_error("commit transaction", e))?;
    debug!("SQLite schema and data committed");

    let summary = summarize(
        &client,
        config.path.display().to_string(),
        SQLITE_TABLES,
    )
    .await?;
    client.close().await?;

    info!("Seeded SQLite database {}", config.path.display());
    Ok(summary)
}
