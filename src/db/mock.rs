//! Mock database clients for testing.
//!
//! Provide scripted results so the demo runner can be exercised without a
//! database or query engine.

use super::{DatabaseClient, QueryResult};
use crate::error::{DemoError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A mock database client that replays predefined results in order.
///
/// Once the script is exhausted every query returns an empty result.
/// Executed SQL is recorded for later inspection.
#[derive(Default)]
pub struct MockDatabaseClient {
    script: Mutex<VecDeque<Result<QueryResult>>>,
    executed: Mutex<Vec<String>>,
}

impl MockDatabaseClient {
    /// Creates a new mock client with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock client that replays the given results.
    pub fn with_results(results: Vec<Result<QueryResult>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Returns the SQL statements executed so far.
    pub fn executed(&self) -> Vec<String> {
        self.executed
            .lock()
            .map(|sql| sql.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(sql.to_string());
        }

        let next = self
            .script
            .lock()
            .map_err(|_| DemoError::internal("mock script lock poisoned"))?
            .pop_front();

        next.unwrap_or_else(|| Ok(QueryResult::new()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A client whose every query fails with a connection error.
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a failing client reporting the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        Err(DemoError::connection(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
