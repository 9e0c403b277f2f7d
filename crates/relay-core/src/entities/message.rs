//! Message entity - represents a relayed chat message

use chrono::{DateTime, Utc};

use crate::value_objects::MessageId;

/// Message entity
///
/// Created only by the message store; immutable once created and never
/// deleted in normal operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub sender: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new Message
    pub fn new(id: MessageId, sender: String, text: String) -> Self {
        Self {
            id,
            sender,
            text,
            created_at: Utc::now(),
        }
    }

    /// Check if message text is empty after trimming
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Get a truncated preview of the text (for logs)
    pub fn preview(&self, max_len: usize) -> &str {
        if self.text.len() <= max_len {
            &self.text
        } else {
            let mut end = max_len;
            while !self.text.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.text[..end]
        }
    }
}
