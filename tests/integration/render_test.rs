//! Properties of the text table renderer.

use fedsql_demo::db::{Row, Value};
use fedsql_demo::error::DemoError;
use fedsql_demo::render::{column_widths, TableRenderer};
use pretty_assertions::assert_eq;

fn people() -> Vec<Row> {
    vec![
        vec![Value::Int(1), Value::from("Alice")],
        vec![Value::Int(2), Value::from("Bob")],
    ]
}

#[test]
fn test_one_line_per_row_between_rule_and_count() {
    let rows: Vec<Row> = (0..7)
        .map(|i| vec![Value::Int(i), Value::from(format!("name-{i}"))])
        .collect();
    let text = TableRenderer::new().render(&["id", "name"], &rows).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    // header, rule, rows, blank, count
    assert_eq!(lines.len(), 2 + rows.len() + 2);
    assert_eq!(lines[lines.len() - 2], "");
    assert_eq!(lines[lines.len() - 1], "(7 rows)");
}

#[test]
fn test_header_width_is_exact_maximum() {
    let rows = vec![
        vec![Value::from("Laptop Pro 15"), Value::Float(1299.99)],
        vec![Value::from("Desk Lamp"), Value::Float(35.0)],
    ];
    let widths = column_widths(&["product", "price"], &rows).unwrap();
    assert_eq!(widths, vec![13, 7]);

    let text = TableRenderer::new().render(&["product", "price"], &rows).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(header.len(), 13 + 3 + 7);
    assert_eq!(header, "product       | price  ");
}

#[test]
fn test_rendering_is_deterministic() {
    let renderer = TableRenderer::new().with_title("People");
    let first = renderer.render(&["id", "name"], &people()).unwrap();
    let second = renderer.render(&["id", "name"], &people()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_worked_example() {
    let text = TableRenderer::new().render(&["id", "name"], &people()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "id | name ");
    assert_eq!(lines[1], "---+------");
    assert_eq!(lines[2], "1  | Alice");
    assert_eq!(lines[3], "2  | Bob  ");
}

#[test]
fn test_zero_rows() {
    let text = TableRenderer::new().render(&["a", "b"], &[]).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines, vec!["a | b", "--+--", "", "(0 rows)"]);
    assert!(text.ends_with("(0 rows)\n"));
}

#[test]
fn test_short_row_is_rejected() {
    let rows = vec![vec![Value::Int(1), Value::Int(2)]];
    let result = TableRenderer::new().render(&["a", "b", "c"], &rows);

    match result {
        Err(DemoError::ShapeMismatch {
            row,
            expected,
            found,
        }) => {
            assert_eq!((row, expected, found), (0, 3, 2));
        }
        other => panic!("expected shape mismatch, got {other:?}"),
    }
}
