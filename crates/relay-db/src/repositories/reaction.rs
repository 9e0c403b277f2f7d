//! SQLite implementation of ReactionStore

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

use relay_core::entities::{Reaction, ReactionTally};
use relay_core::traits::{ReactionStore, StoreResult};
use relay_core::value_objects::MessageId;

use crate::models::{ReactionModel, ReactionTallyModel};

use super::error::{map_db_error, map_fk_violation};

/// SQLite implementation of ReactionStore
#[derive(Clone)]
pub struct SqliteReactionStore {
    pool: SqlitePool,
}

impl SqliteReactionStore {
    /// Create a new SqliteReactionStore
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionStore for SqliteReactionStore {
    #[instrument(skip(self))]
    async fn append(
        &self,
        message_id: MessageId,
        emoji: &str,
        user: &str,
    ) -> StoreResult<Reaction> {
        let model = sqlx::query_as::<_, ReactionModel>(
            r#"
            INSERT INTO reactions (message_id, emoji, user, timestamp)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, message_id, emoji, user, timestamp
            "#,
        )
        .bind(message_id.into_inner())
        .bind(emoji)
        .bind(user)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, message_id))?;

        Ok(Reaction::from(model))
    }

    #[instrument(skip(self))]
    async fn tally(&self, message_id: MessageId) -> StoreResult<Vec<ReactionTally>> {
        let models = sqlx::query_as::<_, ReactionTallyModel>(
            r#"
            SELECT emoji, COUNT(*) AS count
            FROM reactions
            WHERE message_id = ?1
            GROUP BY emoji
            ORDER BY count DESC
            "#,
        )
        .bind(message_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(ReactionTally::from).collect())
    }
}
