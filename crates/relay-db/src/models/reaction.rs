//! Reaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: i64,
    pub message_id: i64,
    pub emoji: String,
    pub user: String,
    pub timestamp: DateTime<Utc>,
}

/// Aggregated per-emoji count (from the tally query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionTallyModel {
    pub emoji: String,
    pub count: i64,
}
