//! Broadcast router
//!
//! Serializes a frame once and enqueues it on every open connection. A
//! connection whose queue is full or gone is dropped from the registry; the
//! rest of the sweep continues.

use crate::connection::ConnectionRegistry;
use crate::protocol::OutboundFrame;
use std::sync::Arc;

/// Fans outbound frames out over the connection registry
#[derive(Debug, Clone)]
pub struct BroadcastRouter {
    registry: Arc<ConnectionRegistry>,
}

impl BroadcastRouter {
    /// Create a router over the given registry
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Send `frame` to every registered connection except `exclude`.
    ///
    /// Returns the number of successful enqueues. Enqueue never waits: a slow
    /// peer loses its registration instead of stalling the sweep.
    pub async fn broadcast(&self, frame: &OutboundFrame, exclude: Option<&str>) -> usize {
        let json = match frame.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize outbound frame");
                return 0;
            }
        };

        let mut sent = 0;
        let mut stale: Vec<String> = Vec::new();

        for connection in self.registry.connections() {
            if exclude.is_some_and(|id| id == connection.id()) {
                continue;
            }
            if connection.is_closed().await {
                continue;
            }

            match connection.try_send(json.clone()) {
                Ok(()) => sent += 1,
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection.id(),
                        error = %e,
                        "Failed to enqueue frame; dropping connection"
                    );
                    stale.push(connection.id().to_owned());
                }
            }
        }

        for id in stale {
            self.registry.remove(&id).await;
        }

        sent
    }
}
