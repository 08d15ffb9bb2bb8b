//! The fixed federated query sequence.

use crate::config::PrestoConfig;
use crate::db::DEFAULT_SCHEMA;

/// A titled SQL statement shown by the demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoQuery {
    pub title: String,
    pub sql: String,
}

impl DemoQuery {
    fn new(title: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sql: sql.into(),
        }
    }
}

/// Builds the federated query sequence for the configured catalog names.
///
/// The first query is always `SHOW CATALOGS`; the runner uses it as the
/// reachability probe.
pub fn federated_queries(config: &PrestoConfig) -> Vec<DemoQuery> {
    let lite = format!("{}.\"{}\"", config.sqlite_catalog, DEFAULT_SCHEMA);
    let pg = format!("{}.public", config.postgres_catalog);

    vec![
        DemoQuery::new("Catalogs", "SHOW CATALOGS"),
        DemoQuery::new(
            format!("Tables in {}", config.sqlite_catalog),
            format!("SHOW TABLES FROM {lite}"),
        ),
        DemoQuery::new("Departments", format!("SELECT * FROM {lite}.departments")),
        DemoQuery::new(
            "Employees",
            format!("SELECT * FROM {lite}.employees ORDER BY salary DESC"),
        ),
        DemoQuery::new(
            "Avg salary by department",
            format!(
                r#"
        SELECT
            d.name AS department,
            COUNT(*) AS headcount,
            ROUND(AVG(e.salary), 2) AS avg_salary,
            MIN(e.salary) AS min_salary,
            MAX(e.salary) AS max_salary
        FROM {lite}.employees e
        JOIN {lite}.departments d ON e.department_id = d.id
        WHERE e.is_active = 1
        GROUP BY d.name
        ORDER BY avg_salary DESC
        "#
            ),
        ),
        DemoQuery::new(
            "Top 5 orders",
            format!(
                r#"
        SELECT
            e.first_name || ' ' || e.last_name AS employee,
            p.name AS product,
            o.quantity,
            o.total_amount,
            o.order_date
        FROM {lite}.orders o
        JOIN {lite}.employees e ON o.employee_id = e.id
        JOIN {lite}.products p ON o.product_id = p.id
        ORDER BY o.total_amount DESC
        LIMIT 5
        "#
            ),
        ),
        DemoQuery::new(
            "Revenue by product category",
            format!(
                r#"
        SELECT
            p.category,
            SUM(o.total_amount) AS total_revenue,
            SUM(o.quantity) AS units_sold
        FROM {lite}.orders o
        JOIN {lite}.products p ON o.product_id = p.id
        GROUP BY p.category
        ORDER BY total_revenue DESC
        "#
            ),
        ),
        DemoQuery::new(
            "Employee summary view",
            format!("SELECT * FROM {lite}.employee_summary"),
        ),
        DemoQuery::new("Tables in postgresql", format!("SHOW TABLES FROM {pg}")),
        DemoQuery::new(
            "Customers",
            format!("SELECT * FROM {pg}.customers ORDER BY tier, name"),
        ),
        DemoQuery::new(
            "Customer spend summary",
            format!(
                r#"
        SELECT
            c.name    AS customer,
            c.tier,
            c.country,
            COUNT(*)  AS orders,
            SUM(co.total_amount) AS total_spent
        FROM {pg}.customer_orders co
        JOIN {pg}.customers c ON co.customer_id = c.id
        GROUP BY c.name, c.tier, c.country
        ORDER BY total_spent DESC
        "#
            ),
        ),
        DemoQuery::new(
            "Product demand from external customers (cross-catalog join)",
            format!(
                r#"
        SELECT
            p.name        AS product,
            p.category,
            p.price       AS unit_price,
            SUM(co.quantity)     AS customer_units,
            SUM(co.total_amount) AS customer_revenue
        FROM {pg}.customer_orders co
        JOIN {lite}.products p ON co.product_id = p.id
        GROUP BY p.name, p.category, p.price
        ORDER BY customer_revenue DESC
        "#
            ),
        ),
        DemoQuery::new(
            "Internal vs customer demand per product (SQLite + PostgreSQL)",
            format!(
                r#"
        SELECT
            p.name        AS product,
            p.category,
            SUM(o.quantity)  AS internal_units,
            SUM(co.quantity) AS customer_units,
            SUM(o.quantity) + SUM(co.quantity) AS total_units
        FROM {lite}.products p
        LEFT JOIN {lite}.orders o   ON o.product_id  = p.id
        LEFT JOIN {pg}.customer_orders co ON co.product_id = p.id
        GROUP BY p.name, p.category
        ORDER BY total_units DESC
        "#
            ),
        ),
    ]
}
