//! Connection state
//!
//! Tracks a single client connection and its outbound frame queue.

use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::sync::RwLock;

/// Connection lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Socket accepted, not yet registered
    Connecting,
    /// Registered; receives broadcasts
    Open,
    /// Terminal; no further sends
    Closed,
}

/// A single client connection
///
/// Holds the sending half of the outbound frame queue; the draining task owns
/// the receiving half and performs the actual socket writes.
pub struct Connection {
    /// Unique connection id
    id: String,
    /// Current lifecycle state
    state: RwLock<ConnectionState>,
    /// Outbound frame queue
    sender: mpsc::Sender<String>,
    /// Accept time
    connected_at: Instant,
}

impl Connection {
    /// Create a new connection in the `Connecting` state
    pub fn new(id: impl Into<String>, sender: mpsc::Sender<String>) -> Self {
        Self {
            id: id.into(),
            state: RwLock::new(ConnectionState::Connecting),
            sender,
            connected_at: Instant::now(),
        }
    }

    /// Connection id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current lifecycle state
    pub async fn state(&self) -> ConnectionState {
        *self.state.read().await
    }

    /// Transition to a new state
    pub async fn set_state(&self, state: ConnectionState) {
        *self.state.write().await = state;
    }

    /// Whether the connection has reached its terminal state
    pub async fn is_closed(&self) -> bool {
        *self.state.read().await == ConnectionState::Closed
    }

    /// Enqueue a frame, waiting for queue capacity
    pub async fn send(&self, frame: String) -> Result<(), mpsc::error::SendError<String>> {
        self.sender.send(frame).await
    }

    /// Enqueue a frame without waiting. Fails when the queue is full or the
    /// draining task is gone.
    pub fn try_send(&self, frame: String) -> Result<(), mpsc::error::TrySendError<String>> {
        self.sender.try_send(frame)
    }

    /// Time since the connection was accepted
    pub fn age(&self) -> Duration {
        self.connected_at.elapsed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("age", &self.age())
            .finish_non_exhaustive()
    }
}
