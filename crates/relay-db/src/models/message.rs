//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the messages table
///
/// Column names follow the persisted schema; the entity mapper renames
/// `message`/`timestamp` to the domain's `text`/`created_at`.
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub sender: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
