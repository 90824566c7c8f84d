//! Query execution integration tests.
//!
//! Covers the executor's behavior over the registry, including the
//! end-to-end scenario against a live MySQL server when DATABASE_URL is set.

use std::sync::Arc;

use db_relay::connection::ConnectionRegistry;
use db_relay::db::{MockDatabaseClient, Value};
use db_relay::error::RelayError;
use db_relay::query::QueryExecutor;

fn get_test_database_url() -> Option<String> {
    std::env::var("DATABASE_URL").ok()
}

async fn live_registry() -> Option<ConnectionRegistry> {
    let url = get_test_database_url()?;
    let registry = ConnectionRegistry::new();
    registry.connect("main", "mysql", &url).await.ok()?;
    Some(registry)
}

#[tokio::test]
async fn test_select_one_live() {
    let Some(registry) = live_registry().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let executor = QueryExecutor::new(&registry);
    let result = executor.execute("main", "SELECT 1 AS x").await.unwrap();

    assert_eq!(result.row_count, 1);
    assert_eq!(result.column_names(), vec!["x"]);

    let record = result.records().next().unwrap();
    assert_eq!(record.get("x"), Some(&Value::Int(1)));

    registry.close_all().await;
}

#[tokio::test]
async fn test_mixed_types_live() {
    let Some(registry) = live_registry().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let executor = QueryExecutor::new(&registry);
    let result = executor
        .execute("main", "SELECT 1 AS i, 2.5e0 AS f, 'hi' AS s, NULL AS n")
        .await
        .unwrap();

    assert_eq!(result.column_names(), vec!["i", "f", "s", "n"]);
    let record = result.records().next().unwrap();
    assert_eq!(record.get("i"), Some(&Value::Int(1)));
    assert_eq!(record.get("f"), Some(&Value::Float(2.5)));
    assert_eq!(record.get("s"), Some(&Value::String("hi".to_string())));
    assert_eq!(record.get("n"), Some(&Value::Null));

    registry.close_all().await;
}

#[tokio::test]
async fn test_non_row_statement_live() {
    let Some(registry) = live_registry().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let executor = QueryExecutor::new(&registry);

    // DO evaluates its expression and returns no result set
    let result = executor.execute("main", "DO 1").await.unwrap();
    assert!(result.is_empty());
    assert_eq!(result.row_count, 0);

    registry.close_all().await;
}

#[tokio::test]
async fn test_query_error_live() {
    let Some(registry) = live_registry().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let executor = QueryExecutor::new(&registry);
    let result = executor
        .execute("main", "SELECT * FROM no_such_table")
        .await;

    assert!(matches!(result.unwrap_err(), RelayError::Query(_)));

    registry.close_all().await;
}

#[tokio::test]
async fn test_execute_on_unregistered_name() {
    let registry = ConnectionRegistry::new();
    let executor = QueryExecutor::new(&registry);

    let err = executor.execute("missing", "SELECT 1").await.unwrap_err();
    assert!(matches!(err, RelayError::NotFound(_)));
    assert_eq!(err.to_string(), "No connection found for name: missing");
}

#[tokio::test]
async fn test_json_records_shape() {
    let registry = ConnectionRegistry::new();
    registry
        .register("main", Arc::new(MockDatabaseClient::new()))
        .await;

    let executor = QueryExecutor::new(&registry);
    let result = executor.execute("main", "SELECT * FROM users").await.unwrap();

    let records = result.to_json_records();
    assert_eq!(records.len(), 1);
    assert!(records[0].is_object());
    assert!(records[0].get("result").is_some());
}
