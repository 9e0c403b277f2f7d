//! Frame definitions
//!
//! Inbound requests are what clients may submit; outbound frames are what the
//! relay sends back. Both sides are JSON with a `type` discriminant.

use chrono::{DateTime, Utc};
use relay_core::{Message, MessageId, ReactionTally};
use serde::{Deserialize, Serialize};

/// Inbound chat submission
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatRequest {
    pub sender: String,
    #[serde(rename = "message")]
    pub text: String,
}

/// Inbound reaction submission
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRequest {
    pub message_id: MessageId,
    pub emoji: String,
    pub user: String,
}

/// A decoded inbound frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Persist a chat message and fan it out
    Chat(ChatRequest),
    /// Persist a reaction and fan out fresh tallies
    Reaction(ReactionRequest),
}

/// Per-emoji reaction count as sent on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyEntry {
    pub emoji: String,
    pub count: i64,
}

impl From<ReactionTally> for TallyEntry {
    fn from(tally: ReactionTally) -> Self {
        Self {
            emoji: tally.emoji,
            count: tally.count,
        }
    }
}

/// One message in the history replay, with its current tallies
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: MessageId,
    pub sender: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub reactions: Vec<TallyEntry>,
}

impl HistoryEntry {
    /// Pair a stored message with its tallies
    #[must_use]
    pub fn new(message: Message, tallies: Vec<ReactionTally>) -> Self {
        Self {
            id: message.id,
            sender: message.sender,
            message: message.text,
            timestamp: message.created_at,
            reactions: tallies.into_iter().map(TallyEntry::from).collect(),
        }
    }
}

/// A frame sent from the relay to clients
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundFrame {
    /// Full replay sent once per connection
    History { messages: Vec<HistoryEntry> },
    /// A persisted chat message with its assigned id
    Chat {
        id: MessageId,
        sender: String,
        message: String,
    },
    /// Updated tallies for one message
    Reaction {
        #[serde(rename = "messageId")]
        message_id: MessageId,
        reactions: Vec<TallyEntry>,
    },
}

impl OutboundFrame {
    /// History replay frame
    #[must_use]
    pub fn history(messages: Vec<HistoryEntry>) -> Self {
        Self::History { messages }
    }

    /// Live chat event carrying the store-assigned id
    #[must_use]
    pub fn chat(message: &Message) -> Self {
        Self::Chat {
            id: message.id,
            sender: message.sender.clone(),
            message: message.text.clone(),
        }
    }

    /// Updated tallies for one message
    #[must_use]
    pub fn reaction(message_id: MessageId, tallies: Vec<ReactionTally>) -> Self {
        Self::Reaction {
            message_id,
            reactions: tallies.into_iter().map(TallyEntry::from).collect(),
        }
    }

    /// Serialize to the wire representation
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
