//! Query execution against registered connections.
//!
//! Provides isolated query execution that can be tested independently of the
//! surrounding application.

use std::time::Instant;

use tracing::{debug, warn};

use crate::connection::ConnectionRegistry;
use crate::db::QueryResult;
use crate::error::Result;

/// Executes ad-hoc SQL against connections held by a [`ConnectionRegistry`].
///
/// The executor is purely functional per call: it resolves the connection
/// name, runs the statement verbatim, and returns the decoded result. No
/// validation, sanitization, or statement-type restriction is applied; any
/// SQL the backend accepts is executed, including mutating statements.
pub struct QueryExecutor<'a> {
    registry: &'a ConnectionRegistry,
}

impl<'a> QueryExecutor<'a> {
    /// Creates a new query executor over the given registry.
    pub fn new(registry: &'a ConnectionRegistry) -> Self {
        Self { registry }
    }

    /// Runs `sql` against the connection registered under `name`.
    ///
    /// An unknown name fails with `NotFoundError` before any backend call is
    /// attempted. Row-returning statements yield one record per row, keyed by
    /// the query's column list in returned order; non-row statements yield an
    /// empty result.
    pub async fn execute(&self, name: &str, sql: &str) -> Result<QueryResult> {
        let client = self.registry.lookup(name).await?;

        let start = Instant::now();
        let result = client.execute_query(sql).await;
        let elapsed = start.elapsed();

        match result {
            Ok(query_result) => {
                debug!(
                    connection = name,
                    rows = query_result.row_count,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Query executed"
                );
                Ok(query_result)
            }
            Err(e) => {
                warn!(
                    connection = name,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Query failed: {e}"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ColumnInfo, FailingDatabaseClient, MockDatabaseClient, QueryResult, Value};
    use crate::error::RelayError;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_execute_select_query() {
        let registry = ConnectionRegistry::new();
        registry
            .register("main", Arc::new(MockDatabaseClient::new()))
            .await;

        let executor = QueryExecutor::new(&registry);
        let result = executor.execute("main", "SELECT * FROM users").await.unwrap();

        assert_eq!(result.row_count, 1);
        assert_eq!(result.columns[0].name, "result");
    }

    #[tokio::test]
    async fn test_execute_unknown_connection() {
        let registry = ConnectionRegistry::new();
        let executor = QueryExecutor::new(&registry);

        let err = executor.execute("missing", "SELECT 1").await.unwrap_err();
        assert!(matches!(err, RelayError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_execute_non_row_statement_returns_empty() {
        let registry = ConnectionRegistry::new();
        registry
            .register("main", Arc::new(MockDatabaseClient::new()))
            .await;

        let executor = QueryExecutor::new(&registry);
        let result = executor
            .execute("main", "UPDATE users SET name = 'x'")
            .await
            .unwrap();

        assert!(result.is_empty());
        assert_eq!(result.row_count, 0);
    }

    #[tokio::test]
    async fn test_execute_record_keys_match_columns_in_order() {
        let canned = QueryResult::with_data(
            vec![
                ColumnInfo::new("id", "BIGINT"),
                ColumnInfo::new("email", "VARCHAR"),
                ColumnInfo::new("active", "BOOLEAN"),
            ],
            vec![
                vec![
                    Value::Int(1),
                    Value::String("a@example.com".into()),
                    Value::Bool(true),
                ],
                vec![Value::Int(2), Value::Null, Value::Bool(false)],
            ],
        );
        let registry = ConnectionRegistry::new();
        registry
            .register("main", Arc::new(MockDatabaseClient::new().with_result(canned)))
            .await;

        let executor = QueryExecutor::new(&registry);
        let result = executor.execute("main", "SELECT id, email, active FROM users").await.unwrap();

        assert_eq!(result.row_count, 2);
        for record in result.records() {
            let keys: Vec<&str> = record.iter().map(|(name, _)| name).collect();
            assert_eq!(keys, vec!["id", "email", "active"]);
        }
    }

    #[tokio::test]
    async fn test_execute_propagates_query_errors() {
        let registry = ConnectionRegistry::new();
        registry
            .register("bad", Arc::new(FailingDatabaseClient::new("syntax error")))
            .await;

        let executor = QueryExecutor::new(&registry);
        let err = executor.execute("bad", "SELECT 1").await.unwrap_err();

        assert!(matches!(err, RelayError::Query(_)));
        assert!(err.to_string().contains("syntax error"));
    }
}
