//! Named connection registry.
//!
//! Owns the mapping from a caller-chosen connection name to an open database
//! handle. The registry is constructed by the application's composition root
//! and shared by reference; there is no module-level global state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::db::{self, DatabaseBackend, DatabaseClient, QueryResult};
use crate::error::{RelayError, Result};

/// Registry of named database connections.
///
/// The map is guarded by an async `RwLock` so that registration and lookup
/// are atomic with respect to each other. Handles are shared via `Arc` and
/// never copied; they live until replaced, disconnected, or process teardown.
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<String, Arc<dyn DatabaseClient>>>,
}

impl ConnectionRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Opens a connection and registers it under `name`.
    ///
    /// `driver` must name a supported backend and `dsn` is the backend's
    /// connection URL. The handle is registered only after the liveness probe
    /// has succeeded; on failure the name keeps whatever registration it had
    /// before. Reconnecting under an existing name closes the prior handle
    /// (close-then-replace), so no connection is leaked.
    pub async fn connect(&self, name: &str, driver: &str, dsn: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(RelayError::connection("Connection name must not be empty"));
        }
        if driver.trim().is_empty() {
            return Err(RelayError::connection("Driver must not be empty"));
        }
        if dsn.trim().is_empty() {
            return Err(RelayError::connection("DSN must not be empty"));
        }

        let backend = DatabaseBackend::parse(driver).ok_or_else(|| {
            RelayError::connection(format!("Unsupported driver: '{driver}'"))
        })?;

        debug!(name, driver, "Opening connection");
        let client = db::connect(backend, dsn).await?;

        self.register(name, client).await;
        info!(name, "Connection registered");
        Ok(())
    }

    /// Registers an already-open client under `name`.
    ///
    /// A previous handle under the same name is swapped out atomically and
    /// closed, so callers never observe a moment where the name is
    /// unregistered during replacement.
    pub async fn register(&self, name: &str, client: Arc<dyn DatabaseClient>) {
        let previous = {
            let mut connections = self.connections.write().await;
            connections.insert(name.to_string(), client)
        };

        if let Some(old) = previous {
            debug!(name, "Replacing existing connection");
            if let Err(e) = old.close().await {
                warn!(name, "Failed to close replaced connection: {e}");
            }
        }
    }

    /// Returns the handle registered under `name`.
    ///
    /// Side-effect free; the liveness probe is not re-run.
    pub async fn lookup(&self, name: &str) -> Result<Arc<dyn DatabaseClient>> {
        self.connections
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| RelayError::not_found(name))
    }

    /// Returns true if a connection is registered under `name`.
    pub async fn contains(&self, name: &str) -> bool {
        self.connections.read().await.contains_key(name)
    }

    /// Returns the registered connection names, sorted for stable output.
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.connections.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    /// Enumerates database/schema names on the server behind `name`.
    ///
    /// Result order is whatever the backend returns.
    pub async fn list_databases(&self, name: &str) -> Result<Vec<String>> {
        let client = self.lookup(name).await?;
        client.list_databases().await
    }

    /// Enumerates table names within `database` on the connection `name`.
    pub async fn list_tables(&self, name: &str, database: &str) -> Result<QueryResult> {
        let client = self.lookup(name).await?;
        client.list_tables(database).await
    }

    /// Closes and removes the connection registered under `name`.
    pub async fn disconnect(&self, name: &str) -> Result<()> {
        let client = {
            let mut connections = self.connections.write().await;
            connections
                .remove(name)
                .ok_or_else(|| RelayError::not_found(name))?
        };

        info!(name, "Disconnecting");
        client.close().await
    }

    /// Closes every registered connection. Used at process teardown.
    pub async fn close_all(&self) {
        let drained: Vec<(String, Arc<dyn DatabaseClient>)> = {
            let mut connections = self.connections.write().await;
            connections.drain().collect()
        };

        for (name, client) in drained {
            if let Err(e) = client.close().await {
                warn!(name, "Failed to close connection: {e}");
            }
        }
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
