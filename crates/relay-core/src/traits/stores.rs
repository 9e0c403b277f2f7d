//! Store traits (ports) - define the interface for persistence
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. The gateway only ever sees these traits,
//! so tests can substitute in-memory fakes.

use async_trait::async_trait;

use crate::entities::{Message, Reaction, ReactionTally};
use crate::error::StoreError;
use crate::value_objects::MessageId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Append-only log of chat messages
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist one message and return it with its assigned id
    ///
    /// Appends are serialized: the assigned id is the smallest integer
    /// greater than every previously assigned id. On failure nothing is
    /// persisted; a message is visible to `list_all` only if its append
    /// returned success.
    async fn append(&self, sender: &str, text: &str) -> StoreResult<Message>;

    /// List every stored message, oldest first (ascending id)
    async fn list_all(&self) -> StoreResult<Vec<Message>>;
}

/// Append-only log of reaction events
#[async_trait]
pub trait ReactionStore: Send + Sync {
    /// Persist one reaction event and return the created row
    ///
    /// Referential integrity is enforced by the storage engine; a reaction
    /// against a nonexistent message surfaces
    /// [`StoreError::ReferentialViolation`], never a silent success.
    async fn append(&self, message_id: MessageId, emoji: &str, user: &str)
        -> StoreResult<Reaction>;

    /// Count reactions for a message, grouped by emoji (order insignificant)
    async fn tally(&self, message_id: MessageId) -> StoreResult<Vec<ReactionTally>>;
}
