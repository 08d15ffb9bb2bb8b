//! Standalone check of the SQLite file, without the query engine.
//!
//! Lists the catalog the connector would expose and runs the demo's
//! SQLite-only queries directly. Money columns are formatted here, before
//! rendering, since the renderer prints values as they are.

use std::io::Write;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;

use crate::config::SqliteConfig;
use crate::db::{Catalog, DatabaseClient, QueryResult, SqliteClient, Value};
use crate::error::Result;
use crate::render::TableRenderer;

/// One titled query of the standalone check.
#[derive(Debug, Clone, Copy)]
pub struct CheckSection {
    pub title: &'static str,
    pub sql: &'static str,
    /// Columns shown as money.
    pub money: &'static [&'static str],
}

pub const CHECK_SECTIONS: &[CheckSection] = &[
    CheckSection {
        title: "departments",
        sql: "SELECT id, name, budget, location FROM departments",
        money: &["budget"],
    },
    CheckSection {
        title: "Employees by salary",
        sql: r#"
            SELECT e.first_name || ' ' || e.last_name AS name, d.name AS department, e.salary
            FROM employees e JOIN departments d ON e.department_id = d.id
            ORDER BY e.salary DESC
        "#,
        money: &["salary"],
    },
    CheckSection {
        title: "Avg salary by department",
        sql: r#"
            SELECT d.name AS department, COUNT(*) AS headcount,
                   ROUND(AVG(e.salary), 2) AS avg_salary,
                   MIN(e.salary) AS min_salary, MAX(e.salary) AS max_salary
            FROM employees e JOIN departments d ON e.department_id = d.id
            WHERE e.is_active = 1
            GROUP BY d.name
            ORDER BY avg_salary DESC
        "#,
        money: &["avg_salary", "min_salary", "max_salary"],
    },
    CheckSection {
        title: "Revenue by category",
        sql: r#"
            SELECT p.category, SUM(o.total_amount) AS revenue, SUM(o.quantity) AS units
            FROM orders o JOIN products p ON o.product_id = p.id
            GROUP BY p.category ORDER BY revenue DESC
        "#,
        money: &["revenue"],
    },
    CheckSection {
        title: "Top 5 orders",
        sql: r#"
            SELECT e.first_name || ' ' || e.last_name AS employee, p.name AS product,
                   o.quantity AS qty, o.total_amount AS total, o.order_date
            FROM orders o
            JOIN employees e ON o.employee_id = e.id
            JOIN products p ON o.product_id = p.id
            ORDER BY o.total_amount DESC LIMIT 5
        "#,
        money: &["total"],
    },
    CheckSection {
        title: "employee_summary view",
        sql: "SELECT id, full_name, department, salary, hire_date AS hired FROM employee_summary",
        money: &["salary"],
    },
];

/// Formats an amount with two decimals and thousands separators.
///
/// `1500000` becomes `1,500,000.00`. Halves round away from zero.
pub fn format_money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = rounded.abs().to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{cents}")
}

/// Exact amount held by a numeric value.
///
/// Floats outside the decimal range (or NaN) have no amount.
fn money_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Decimal(d) => Some(*d),
        Value::Int(i) => Some(Decimal::from(*i)),
        Value::Float(f) => Decimal::try_from(*f).ok(),
        _ => None,
    }
}

/// Replaces numeric values in the named columns with their money text.
///
/// Values without an exact amount are left as they are.
fn format_money_columns(result: &mut QueryResult, money: &[&str]) {
    let indices: Vec<usize> = result
        .columns
        .iter()
        .enumerate()
        .filter(|(_, col)| money.contains(&col.name.as_str()))
        .map(|(i, _)| i)
        .collect();

    for row in &mut result.rows {
        for &i in &indices {
            if let Some(amount) = row.get(i).and_then(money_amount) {
                row[i] = Value::String(format_money(amount));
            }
        }
    }
}

/// Writes the tables/views listing and a column listing with logical types.
pub fn write_catalog<W: Write>(catalog: &Catalog, out: &mut W) -> Result<()> {
    writeln!(out, "\n--- Tables and Views ---\n")?;
    for relation in &catalog.relations {
        writeln!(
            out,
            "  [{:<5}] {:<25}  ({} rows)",
            relation.kind.as_str(), relation.name, relation.row_count
        )?;
    }

    let rows: Vec<Vec<Value>> = catalog
        .relations
        .iter()
        .flat_map(|relation| {
            relation.columns.iter().map(move |col| {
                vec![
                    Value::from(relation.name.as_str()),
                    Value::from(col.name.as_str()),
                    Value::from(col.declared_type.as_str()),
                    Value::from(col.logical_type.as_str()),
                ]
            })
        })
        .collect();

    let table = TableRenderer::new().with_title("Columns").render(
        &["relation", "column", "declared", "type"],
        &rows,
    )?;
    write!(out, "\n{table}")?;
    Ok(())
}

/// Runs every check section against `client`.
pub async fn run_sections<W: Write>(
    client: &dyn DatabaseClient,
    sections: &[CheckSection],
    out: &mut W,
) -> Result<()> {
    for section in sections {
        let mut result = client.execute_query(section.sql).await?;
        format_money_columns(&mut result, section.money);

        let table = TableRenderer::new()
            .with_title(section.title)
            .render_result(&result)?;
        write!(out, "\n{table}")?;
    }
    Ok(())
}

/// Checks the SQLite file at `config.path` end to end.
///
/// A missing file is a configuration error pointing at `seed-sqlite`.
pub async fn check_sqlite<W: Write>(config: &SqliteConfig, out: &mut W) -> Result<()> {
    let client = SqliteClient::open(&config.path).await?;

    let catalog = client.introspect_catalog().await?;
    write_catalog(&catalog, out)?;
    run_sections(&client, CHECK_SECTIONS, out).await?;
    client.close().await?;

    writeln!(
        out,
        "\nOK - all queries passed ({})",
        config.path.display()
    )?;
    info!("SQLite check passed for {}", config.path.display());
    Ok(())
}
