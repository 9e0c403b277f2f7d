//! Reaction entity - represents an emoji reaction event on a message

use chrono::{DateTime, Utc};

use crate::value_objects::MessageId;

/// Reaction entity
///
/// Reactions are append-only events. Repeated `(message, emoji, user)`
/// triples are allowed; each row counts toward the tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: i64,
    pub message_id: MessageId,
    pub emoji: String,
    pub user: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(id: i64, message_id: MessageId, emoji: String, user: String) -> Self {
        Self {
            id,
            message_id,
            emoji,
            user,
            created_at: Utc::now(),
        }
    }

    /// Check if reaction uses a specific emoji
    #[inline]
    pub fn is_emoji(&self, emoji: &str) -> bool {
        self.emoji == emoji
    }
}

/// Aggregated per-emoji count for one message
///
/// Derived, never stored: recomputed from the raw reaction rows on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionTally {
    pub emoji: String,
    pub count: i64,
}

impl ReactionTally {
    /// Create a new ReactionTally
    pub fn new(emoji: String, count: i64) -> Self {
        Self { emoji, count }
    }
}
