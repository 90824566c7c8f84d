//! Mock database clients for testing.
//!
//! Provides in-memory database implementations for tests and headless use.

use super::{ColumnInfo, DatabaseClient, QueryResult, Value};
use crate::error::{RelayError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A mock database client that returns predefined results.
#[derive(Debug)]
pub struct MockDatabaseClient {
    databases: Vec<String>,
    tables: HashMap<String, Vec<String>>,
    canned_result: Option<QueryResult>,
    closed: Arc<AtomicBool>,
}

impl MockDatabaseClient {
    /// Creates a new mock database client with no databases or tables.
    pub fn new() -> Self {
        Self {
            databases: Vec::new(),
            tables: HashMap::new(),
            canned_result: None,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sets the database names returned by `list_databases`.
    pub fn with_databases(mut self, databases: Vec<String>) -> Self {
        self.databases = databases;
        self
    }

    /// Sets the table names returned by `list_tables` for one database.
    pub fn with_tables(mut self, database: impl Into<String>, tables: Vec<String>) -> Self {
        self.tables.insert(database.into(), tables);
        self
    }

    /// Sets a canned result returned by every `execute_query` call.
    pub fn with_result(mut self, result: QueryResult) -> Self {
        self.canned_result = Some(result);
        self
    }

    /// Returns a handle that observes whether `close` has been called.
    pub fn close_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }

    /// Returns true if `close` has been called on this client.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Default for MockDatabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        if let Some(result) = &self.canned_result {
            return Ok(result.clone());
        }

        // Parse simple SELECT queries and return mock results
        let sql_upper = sql.to_uppercase();

        if sql_upper.trim_start().starts_with("SELECT") {
            // Return a simple result with one row
            let columns = vec![ColumnInfo::new("result", "VARCHAR")];
            let rows = vec![vec![Value::String(format!("Mock result for: {}", sql))]];

            Ok(QueryResult::with_data(columns, rows)
                .with_execution_time(Duration::from_millis(1)))
        } else {
            // For non-SELECT queries, return empty result
            Ok(QueryResult::new().with_execution_time(Duration::from_millis(1)))
        }
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        Ok(self.databases.clone())
    }

    async fn list_tables(&self, database: &str) -> Result<QueryResult> {
        let names = self.tables.get(database).cloned().unwrap_or_default();
        let rows = names
            .into_iter()
            .map(|name| vec![Value::String(name)])
            .collect();

        Ok(QueryResult::with_data(
            vec![ColumnInfo::new("table_name", "VARCHAR")],
            rows,
        ))
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// A mock database client whose every operation fails.
///
/// Useful for testing error propagation paths.
#[derive(Debug)]
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a failing client that reports the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn ping(&self) -> Result<()> {
        Err(RelayError::connection(self.message.clone()))
    }

    async fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        Err(RelayError::query(self.message.clone()))
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        Err(RelayError::query(self.message.clone()))
    }

    async fn list_tables(&self, _database: &str) -> Result<QueryResult> {
        Err(RelayError::query(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
