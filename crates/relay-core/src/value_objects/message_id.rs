//! Message ID - store-assigned 64-bit message identifier
//!
//! Ids are handed out by the message store in append order: strictly
//! increasing, unique, never reused. They double as the replay ordering key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a persisted message by the store.
///
/// Serialized as a plain JSON integer, matching the wire protocol.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MessageId(i64);

impl MessageId {
    /// Create a MessageId from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Check that the id lies in the range the store can assign
    ///
    /// The store starts numbering at 1, so zero and negatives never
    /// reference a real message.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MessageId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<MessageId> for i64 {
    fn from(id: MessageId) -> Self {
        id.0
    }
}
