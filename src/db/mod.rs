//! Database abstraction layer for db-relay.
//!
//! Provides a trait-based interface for database operations, allowing
//! different database backends to be used interchangeably.

mod mock;
mod mysql;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use mysql::MySqlClient;
pub use types::{ColumnInfo, QueryResult, Record, Row, Value};

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Supported database backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    MySql,
    // Future: Postgres, SQLite, etc.
}

impl DatabaseBackend {
    /// Returns the backend as a string for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
        }
    }

    /// Parses a driver identifier from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mysql" | "mariadb" => Some(Self::MySql),
            _ => None,
        }
    }

    /// Returns the default port for this backend.
    pub fn default_port(&self) -> u16 {
        match self {
            Self::MySql => 3306,
        }
    }

    /// Returns the URL scheme for this backend.
    pub fn url_scheme(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
        }
    }
}

/// Opens a database client for the given backend and DSN.
///
/// This is the central factory function for database connections. The client
/// is only returned once the liveness probe has succeeded.
pub async fn connect(backend: DatabaseBackend, dsn: &str) -> Result<Arc<dyn DatabaseClient>> {
    match backend {
        DatabaseBackend::MySql => {
            let client = MySqlClient::connect(dsn).await?;
            Ok(Arc::new(client))
        }
    }
}

/// Trait defining the interface for database clients.
///
/// All database operations are async and return Results with RelayError.
#[async_trait]
pub trait DatabaseClient: Send + Sync + std::fmt::Debug {
    /// Performs a liveness round trip against the server.
    async fn ping(&self) -> Result<()>;

    /// Executes a SQL statement verbatim and returns the results.
    ///
    /// Non-row-returning statements yield an empty result without error.
    async fn execute_query(&self, sql: &str) -> Result<QueryResult>;

    /// Enumerates database/schema names available on the server.
    async fn list_databases(&self) -> Result<Vec<String>>;

    /// Enumerates table names within the given database as records keyed
    /// `table_name`.
    async fn list_tables(&self, database: &str) -> Result<QueryResult>;

    /// Closes the database connection.
    async fn close(&self) -> Result<()>;
}
