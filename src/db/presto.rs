//! Federated query engine client.
//!
//! Speaks the Presto HTTP client protocol: the statement is POSTed to
//! `/v1/statement`, then the client follows `nextUri` until the engine stops
//! handing one out. Each page may carry column metadata, a batch of rows,
//! or an error.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::PrestoConfig;
use crate::db::{ColumnInfo, DatabaseClient, QueryResult, Row, Value};
use crate::error::{DemoError, Result};

/// Maximum attempts for a page the coordinator reports as busy.
const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Base delay between retry attempts (doubles each retry).
const RETRY_BASE_DELAY_MS: u64 = 100;

/// Federated query engine client.
#[derive(Debug, Clone)]
pub struct PrestoClient {
    config: PrestoConfig,
    client: Client,
}

impl PrestoClient {
    /// Creates a new client with the given configuration.
    ///
    /// No connection is made until the first query.
    pub fn new(config: PrestoConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DemoError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Returns the statement endpoint URL.
    fn statement_url(&self) -> String {
        format!("{}/v1/statement", self.config.base_url())
    }

    /// Submits a statement and returns the first page.
    async fn submit(&self, sql: &str) -> Result<QueryResults> {
        let mut request = self
            .client
            .post(self.statement_url())
            .header("X-Presto-User", &self.config.user)
            .header("X-Presto-Source", &self.config.source)
            .body(sql.to_string());

        if let Some(catalog) = &self.config.catalog {
            request = request.header("X-Presto-Catalog", catalog);
        }
        if let Some(schema) = &self.config.schema {
            request = request.header("X-Presto-Schema", schema);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        Self::read_page(response).await
    }

    /// Fetches a follow-up page, retrying while the coordinator is busy.
    async fn fetch(&self, uri: &str) -> Result<QueryResults> {
        let mut delay = Duration::from_millis(RETRY_BASE_DELAY_MS);

        for attempt in 1..=MAX_RETRY_ATTEMPTS {
            let response = self
                .client
                .get(uri)
                .header("X-Presto-User", &self.config.user)
                .send()
                .await
                .map_err(|e| self.map_send_error(e))?;

            if response.status() == StatusCode::SERVICE_UNAVAILABLE && attempt < MAX_RETRY_ATTEMPTS
            {
                warn!(
                    "Coordinator busy on attempt {}, retrying in {:?}",
                    attempt, delay
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
                continue;
            }

            return Self::read_page(response).await;
        }

        Err(DemoError::query(format!(
            "Coordinator stayed unavailable after {MAX_RETRY_ATTEMPTS} attempts"
        )))
    }

    async fn read_page(response: reqwest::Response) -> Result<QueryResults> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DemoError::query(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(DemoError::query(format!(
                "Query engine error ({status}): {body}"
            )));
        }

        parse_page(&body)
    }

    fn map_send_error(&self, error: reqwest::Error) -> DemoError {
        if error.is_connect() {
            DemoError::connection(format!(
                "Could not connect to the query engine at {}",
                self.config.display_string()
            ))
        } else if error.is_timeout() {
            DemoError::query(format!(
                "Request timed out after {} seconds",
                self.config.timeout_secs
            ))
        } else {
            DemoError::query(format!("Request failed: {error}"))
        }
    }
}

#[async_trait]
impl DatabaseClient for PrestoClient {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();
        let mut results = ResultAccumulator::default();

        let mut page = self.submit(sql).await?;
        debug!("Query {} submitted", page.id);

        loop {
            let next_uri = results.absorb(page)?;
            match next_uri {
                Some(uri) => page = self.fetch(&uri).await?,
                None => break,
            }
        }

        Ok(results.finish().with_execution_time(start.elapsed()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Collects columns and rows across the pages of one query.
#[derive(Debug, Default)]
struct ResultAccumulator {
    columns: Option<Vec<ColumnInfo>>,
    rows: Vec<Row>,
}

impl ResultAccumulator {
    /// Folds one page into the result and returns where to go next.
    fn absorb(&mut self, page: QueryResults) -> Result<Option<String>> {
        if let Some(error) = page.error {
            return Err(DemoError::query(error.describe()));
        }

        if self.columns.is_none() {
            if let Some(columns) = page.columns {
                self.columns = Some(
                    columns
                        .into_iter()
                        .map(|c| ColumnInfo::new(c.name, c.data_type))
                        .collect(),
                );
            }
        }

        if let Some(data) = page.data {
            let columns = self.columns.as_deref().ok_or_else(|| {
                DemoError::internal("query engine sent rows before column metadata")
            })?;
            for raw in data {
                let row = raw
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| {
                        let data_type = columns.get(i).map(|c| c.data_type.as_str());
                        convert_value(v, data_type.unwrap_or(""))
                    })
                    .collect();
                self.rows.push(row);
            }
        }

        if let Some(stats) = &page.stats {
            debug!("Query {} state: {}", page.id, stats.state);
        }

        Ok(page.next_uri)
    }

    fn finish(self) -> QueryResult {
        QueryResult::with_data(self.columns.unwrap_or_default(), self.rows)
    }
}

fn parse_page(body: &str) -> Result<QueryResults> {
    serde_json::from_str(body)
        .map_err(|e| DemoError::query(format!("Failed to parse query engine response: {e}")))
}

/// Converts one JSON cell using the engine-reported column type.
///
/// Decimals and dates arrive as strings on the wire.
fn convert_value(value: serde_json::Value, data_type: &str) -> Value {
    use serde_json::Value as Json;

    let data_type = data_type.to_lowercase();

    match value {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                n.as_f64().map(Value::Float).unwrap_or(Value::Null)
            }
        }
        Json::String(s) => {
            if data_type.starts_with("decimal") {
                Decimal::from_str(&s)
                    .map(Value::Decimal)
                    .unwrap_or(Value::String(s))
            } else if data_type == "date" {
                NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .map(Value::Date)
                    .unwrap_or(Value::String(s))
            } else if data_type == "double" || data_type == "real" {
                // NaN and Infinity are sent as strings
                s.parse::<f64>()
                    .map(Value::Float)
                    .unwrap_or(Value::String(s))
            } else {
                Value::String(s)
            }
        }
        other @ (Json::Array(_) | Json::Object(_)) => Value::String(other.to_string()),
    }
}

// Query engine wire types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResults {
    id: String,
    next_uri: Option<String>,
    columns: Option<Vec<WireColumn>>,
    data: Option<Vec<Vec<serde_json::Value>>>,
    stats: Option<WireStats>,
    error: Option<WireError>,
}

#[derive(Debug, Deserialize)]
struct WireColumn {
    name: String,
    #[serde(rename = "type")]
    data_type: String,
}

#[derive(Debug, Deserialize)]
struct WireStats {
    state: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireError {
    message: String,
    error_name: Option<String>,
}

impl WireError {
    fn describe(&self) -> String {
        match &self.error_name {
            Some(name) => format!("{name}: {}", self.message),
            None => self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn page(value: serde_json::Value) -> QueryResults {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_statement_url() {
        let client = PrestoClient::new(PrestoConfig::default()).unwrap();
        assert_eq!(client.statement_url(), "http://localhost:8080/v1/statement");
    }

    #[test]
    fn test_accumulates_rows_across_pages() {
        let mut acc = ResultAccumulator::default();

        let next = acc
            .absorb(page(json!({
                "id": "q1",
                "nextUri": "http://localhost:8080/v1/statement/q1/1",
                "stats": {"state": "QUEUED"}
            })))
            .unwrap();
        assert_eq!(next.as_deref(), Some("http://localhost:8080/v1/statement/q1/1"));

        let next = acc
            .absorb(page(json!({
                "id": "q1",
                "nextUri": "http://localhost:8080/v1/statement/q1/2",
                "columns": [
                    {"name": "department", "type": "varchar"},
                    {"name": "headcount", "type": "bigint"}
                ],
                "data": [["Engineering", 4]]
            })))
            .unwrap();
        assert!(next.is_some());

        let next = acc
            .absorb(page(json!({
                "id": "q1",
                "columns": [
                    {"name": "department", "type": "varchar"},
                    {"name": "headcount", "type": "bigint"}
                ],
                "data": [["Sales", 3]],
                "stats": {"state": "FINISHED"}
            })))
            .unwrap();
        assert!(next.is_none());

        let result = acc.finish();
        assert_eq!(result.column_names(), vec!["department", "headcount"]);
        assert_eq!(result.row_count, 2);
        assert_eq!(result.rows[1], vec![Value::from("Sales"), Value::Int(3)]);
    }

    #[test]
    fn test_columns_without_rows() {
        let mut acc = ResultAccumulator::default();
        acc.absorb(page(json!({
            "id": "q2",
            "columns": [{"name": "a", "type": "integer"}, {"name": "b", "type": "varchar"}]
        })))
        .unwrap();

        let result = acc.finish();
        assert!(result.is_empty());
        assert_eq!(result.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_error_page_fails_query() {
        let mut acc = ResultAccumulator::default();
        let err = acc
            .absorb(page(json!({
                "id": "q3",
                "error": {
                    "message": "line 1:15: Table sqlite.default.nope does not exist",
                    "errorName": "TABLE_NOT_FOUND",
                    "errorCode": 46
                }
            })))
            .unwrap_err();

        assert!(matches!(err, DemoError::Query(_)));
        assert!(err.to_string().contains("TABLE_NOT_FOUND: line 1:15"));
    }

    #[test]
    fn test_rows_before_columns_is_internal_error() {
        let mut acc = ResultAccumulator::default();
        let err = acc
            .absorb(page(json!({"id": "q4", "data": [[1]]})))
            .unwrap_err();
        assert!(matches!(err, DemoError::Internal(_)));
    }

    #[test]
    fn test_convert_value_by_type() {
        assert_eq!(convert_value(json!(null), "bigint"), Value::Null);
        assert_eq!(convert_value(json!(true), "boolean"), Value::Bool(true));
        assert_eq!(convert_value(json!(42), "integer"), Value::Int(42));
        assert_eq!(convert_value(json!(1299.99), "double"), Value::Float(1299.99));
        assert_eq!(
            convert_value(json!("6499.95"), "decimal(10,2)"),
            Value::Decimal(Decimal::from_str("6499.95").unwrap())
        );
        assert_eq!(
            convert_value(json!("2024-01-05"), "date"),
            Value::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
        );
        assert_eq!(
            convert_value(json!("Acme Corp"), "varchar"),
            Value::String("Acme Corp".into())
        );
        assert_eq!(
            convert_value(json!([1, 2]), "array(integer)"),
            Value::String("[1,2]".into())
        );
    }

    #[test]
    fn test_convert_value_keeps_unparseable_text() {
        assert_eq!(
            convert_value(json!("not-a-date"), "date"),
            Value::String("not-a-date".into())
        );
        assert!(matches!(convert_value(json!("NaN"), "double"), Value::Float(f) if f.is_nan()));
    }

    #[tokio::test]
    async fn test_unreachable_engine_is_connection_error() {
        let config = PrestoConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            timeout_secs: 5,
            ..Default::default()
        };
        let client = PrestoClient::new(config).unwrap();

        let err = client.execute_query("SHOW CATALOGS").await.unwrap_err();

        assert!(err.is_connection(), "unexpected error: {err}");
        assert!(err.to_string().contains("127.0.0.1:1"));
    }

    /// Serves scripted `(status, body)` responses, one connection each,
    /// and returns the request lines it saw.
    async fn serve_script(listener: TcpListener, script: Vec<(u16, String)>) -> Vec<String> {
        let mut seen = Vec::new();

        for (status, body) in script {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            seen.push(request.lines().next().unwrap_or_default().to_string());

            let reason = if status == 200 { "OK" } else { "Service Unavailable" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        }

        seen
    }

    /// Reads one request: headers plus a `Content-Length` body.
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let body_len = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&buf).into_owned()
    }

    async fn local_coordinator() -> (TcpListener, PrestoConfig) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = PrestoConfig {
            host: "127.0.0.1".to_string(),
            port: listener.local_addr().unwrap().port(),
            timeout_secs: 5,
            ..Default::default()
        };
        (listener, config)
    }

    #[tokio::test]
    async fn test_follows_next_uri_and_retries_busy_page() {
        let (listener, config) = local_coordinator().await;
        let base = config.base_url();
        let columns = json!([
            {"name": "id", "type": "integer"},
            {"name": "name", "type": "varchar"}
        ]);
        let script = vec![
            (
                200,
                json!({"id": "q1", "nextUri": format!("{base}/v1/statement/q1/1")}).to_string(),
            ),
            (503, String::new()),
            (
                200,
                json!({
                    "id": "q1",
                    "nextUri": format!("{base}/v1/statement/q1/2"),
                    "columns": columns.clone(),
                    "data": [[1, "Alice"]]
                })
                .to_string(),
            ),
            (
                200,
                json!({
                    "id": "q1",
                    "columns": columns,
                    "data": [[2, "Bob"]],
                    "stats": {"state": "FINISHED"}
                })
                .to_string(),
            ),
        ];
        let server = tokio::spawn(serve_script(listener, script));
        let client = PrestoClient::new(config).unwrap();

        let result = client.execute_query("SELECT id, name FROM people").await.unwrap();

        assert_eq!(result.column_names(), vec!["id", "name"]);
        assert_eq!(
            result.rows,
            vec![
                vec![Value::Int(1), Value::from("Alice")],
                vec![Value::Int(2), Value::from("Bob")],
            ]
        );
        assert_eq!(
            server.await.unwrap(),
            vec![
                "POST /v1/statement HTTP/1.1",
                "GET /v1/statement/q1/1 HTTP/1.1",
                "GET /v1/statement/q1/1 HTTP/1.1",
                "GET /v1/statement/q1/2 HTTP/1.1",
            ]
        );
    }

    #[tokio::test]
    async fn test_page_busy_past_retry_limit_fails_query() {
        let (listener, config) = local_coordinator().await;
        let base = config.base_url();
        let mut script = vec![(
            200,
            json!({"id": "q2", "nextUri": format!("{base}/v1/statement/q2/1")}).to_string(),
        )];
        script.extend((0..MAX_RETRY_ATTEMPTS).map(|_| (503, String::new())));
        let server = tokio::spawn(serve_script(listener, script));
        let client = PrestoClient::new(config).unwrap();

        let err = client.execute_query("SHOW CATALOGS").await.unwrap_err();

        assert!(matches!(err, DemoError::Query(_)));
        assert!(err.to_string().contains("503"));
        assert_eq!(server.await.unwrap().len(), 1 + MAX_RETRY_ATTEMPTS as usize);
    }
}
