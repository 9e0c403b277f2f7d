//! Connection registry
//!
//! Concurrent map of live connections keyed by connection id.

use super::{Connection, ConnectionState};
use dashmap::DashMap;
use std::sync::Arc;

/// Registry of currently open connections
pub struct ConnectionRegistry {
    connections: DashMap<String, Arc<Connection>>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Register a connection. Called once per accepted connection, before
    /// anything is sent to it.
    pub fn add(&self, connection: Arc<Connection>) {
        let id = connection.id().to_owned();
        self.connections.insert(id.clone(), connection);

        tracing::debug!(
            connection_id = %id,
            connections = self.count(),
            "Connection registered"
        );
    }

    /// Remove a connection and mark it closed. A second call for the same id
    /// is a no-op.
    pub async fn remove(&self, id: &str) {
        if let Some((_, connection)) = self.connections.remove(id) {
            connection.set_state(ConnectionState::Closed).await;

            tracing::debug!(
                connection_id = %id,
                connections = self.count(),
                age_ms = connection.age().as_millis() as u64,
                "Connection removed"
            );
        }
    }

    /// Number of registered connections
    pub fn count(&self) -> usize {
        self.connections.len()
    }

    /// Snapshot of all registered connections
    pub fn connections(&self) -> Vec<Arc<Connection>> {
        self.connections
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("connections", &self.count())
            .finish()
    }
}
