//! SQLite implementation of MessageStore

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

use relay_core::entities::Message;
use relay_core::traits::{MessageStore, StoreResult};

use crate::models::MessageModel;

use super::error::map_db_error;

/// SQLite implementation of MessageStore
///
/// Id assignment rides on AUTOINCREMENT: ids are strictly increasing in
/// commit order and never reused, even across restarts.
#[derive(Clone)]
pub struct SqliteMessageStore {
    pool: SqlitePool,
}

impl SqliteMessageStore {
    /// Create a new SqliteMessageStore
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    #[instrument(skip(self, text))]
    async fn append(&self, sender: &str, text: &str) -> StoreResult<Message> {
        let model = sqlx::query_as::<_, MessageModel>(
            r#"
            INSERT INTO messages (sender, message, timestamp)
            VALUES (?1, ?2, ?3)
            RETURNING id, sender, message, timestamp
            "#,
        )
        .bind(sender)
        .bind(text)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Message::from(model))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> StoreResult<Vec<Message>> {
        let models = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, sender, message, timestamp
            FROM messages
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(models.into_iter().map(Message::from).collect())
    }
}
