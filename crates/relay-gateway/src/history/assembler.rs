//! History assembler
//!
//! Joins the message log with per-message reaction tallies.

use crate::protocol::HistoryEntry;
use relay_core::{MessageStore, ReactionStore, StoreResult};
use std::sync::Arc;

/// Builds the replay payload for a newly connected client
#[derive(Clone)]
pub struct HistoryAssembler {
    messages: Arc<dyn MessageStore>,
    reactions: Arc<dyn ReactionStore>,
}

impl HistoryAssembler {
    /// Create an assembler over the two stores
    #[must_use]
    pub fn new(messages: Arc<dyn MessageStore>, reactions: Arc<dyn ReactionStore>) -> Self {
        Self {
            messages,
            reactions,
        }
    }

    /// Build the replay: every stored message, oldest first, with its current
    /// tallies.
    ///
    /// A tally fault for one message downgrades that entry to an empty tally
    /// set; a message-log fault fails the whole build.
    pub async fn build(&self) -> StoreResult<Vec<HistoryEntry>> {
        let messages = self.messages.list_all().await?;
        let mut entries = Vec::with_capacity(messages.len());

        for message in messages {
            let tallies = match self.reactions.tally(message.id).await {
                Ok(tallies) => tallies,
                Err(e) => {
                    tracing::warn!(
                        message_id = %message.id,
                        error = %e,
                        "Failed to tally reactions for history entry"
                    );
                    Vec::new()
                }
            };

            entries.push(HistoryEntry::new(message, tallies));
        }

        Ok(entries)
    }
}

impl std::fmt::Debug for HistoryAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryAssembler").finish_non_exhaustive()
    }
}
