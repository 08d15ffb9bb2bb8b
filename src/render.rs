//! Plain-text rendering of query results.
//!
//! Rendering is two passes: a measure pass walks every row to find each
//! column's width, then a render pass lays out the lines. A column's width
//! is unknown until the last row has been seen, so nothing is emitted before
//! measuring finishes. That also means a malformed row is reported before
//! any text exists.
//!
//! ```text
//! id | name
//! ---+------
//! 1  | Alice
//! 2  | Bob
//!
//! (2 rows)
//! ```

use crate::db::{QueryResult, Row};
use crate::error::{DemoError, Result};

const FIELD_SEPARATOR: &str = " | ";
const RULE_SEPARATOR: &str = "-+-";

/// Renders result sets as aligned text tables.
///
/// Values are printed with their default text form; callers that want money
/// or thousands formatting convert values to text before rendering.
#[derive(Debug, Clone, Default)]
pub struct TableRenderer {
    title: Option<String>,
}

impl TableRenderer {
    /// Creates a renderer without a title.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a title line printed above the header.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Renders a query result.
    pub fn render_result(&self, result: &QueryResult) -> Result<String> {
        let names = result.column_names();
        self.render(names.as_slice(), &result.rows)
    }

    /// Renders columns and rows into a text block ending with a newline.
    ///
    /// `columns` must not be empty. Every row must have exactly one value
    /// per column; the first row that does not yields
    /// [`DemoError::ShapeMismatch`] and no output.
    pub fn render<S: AsRef<str>>(&self, columns: &[S], rows: &[Row]) -> Result<String> {
        let cells = stringify(columns.len(), rows)?;
        let widths = measure(columns, &cells);

        let mut lines = Vec::with_capacity(cells.len() + 5);

        if let Some(title) = &self.title {
            lines.push(format!("--- {title} ---"));
        }

        lines.push(join_padded(columns.iter().map(|c| c.as_ref()), &widths));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join(RULE_SEPARATOR),
        );

        for row in &cells {
            lines.push(join_padded(row.iter().map(String::as_str), &widths));
        }

        lines.push(String::new());
        lines.push(format!("({} rows)", rows.len()));

        let mut text = lines.join("\n");
        text.push('\n');
        Ok(text)
    }
}

/// Computes the display width of each column.
///
/// Width is the longest of the column name and every value's text form,
/// counted in characters.
pub fn column_widths<S: AsRef<str>>(columns: &[S], rows: &[Row]) -> Result<Vec<usize>> {
    let cells = stringify(columns.len(), rows)?;
    Ok(measure(columns, &cells))
}

/// Converts every value to text, checking row shape as it goes.
fn stringify(column_count: usize, rows: &[Row]) -> Result<Vec<Vec<String>>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            if row.len() != column_count {
                return Err(DemoError::ShapeMismatch {
                    row: index,
                    expected: column_count,
                    found: row.len(),
                });
            }
            Ok(row.iter().map(|v| v.to_display_string()).collect())
        })
        .collect()
}

fn measure<S: AsRef<str>>(columns: &[S], cells: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|name| name.as_ref().chars().count())
        .collect();

    for row in cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    widths
}

/// Left-justifies each field to its width and joins them.
fn join_padded<'a>(fields: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    fields
        .zip(widths)
        .map(|(field, width)| format!("{field:<width$}"))
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}
