//! Runs the federated query sequence and prints each result.

use std::io::Write;

use tracing::{debug, info};

use super::DemoQuery;
use crate::db::DatabaseClient;
use crate::error::{DemoError, Result};
use crate::render::TableRenderer;

/// Builds the message shown when the engine cannot be reached at all.
pub fn unreachable_message(engine: &str) -> String {
    format!(
        "Could not connect to the query engine at {engine}.\n\
         Make sure the server is running first.\n\n  \
         Windows:     docker start presto-postgres presto\n  \
         Linux/macOS: <presto-home>/bin/launcher start"
    )
}

/// Executes `queries` in order against `client`, writing each titled table
/// to `out`.
///
/// A connection failure on the first query is reported with start-up
/// guidance for the engine at `engine` (`host:port`). Any other failure
/// stops the run and propagates unchanged. Returns the number of queries
/// that ran.
pub async fn run_queries<W: Write>(
    client: &dyn DatabaseClient,
    queries: &[DemoQuery],
    engine: &str,
    out: &mut W,
) -> Result<usize> {
    let renderer = TableRenderer::new();

    for (index, query) in queries.iter().enumerate() {
        debug!("Running query {}: {}", index + 1, query.title);

        let result = match client.execute_query(&query.sql).await {
            Ok(result) => result,
            Err(e) if index == 0 && e.is_connection() => {
                return Err(DemoError::connection(unreachable_message(engine)));
            }
            Err(e) => return Err(e),
        };

        let table = renderer.render_result(&result)?;

        writeln!(out, "\n--- {} ---", query.title)?;
        writeln!(out, "SQL: {}\n", query.sql.trim())?;
        write!(out, "{table}")?;
    }

    writeln!(out, "\nDone.")?;
    info!("Ran {} queries", queries.len());
    Ok(queries.len())
}
