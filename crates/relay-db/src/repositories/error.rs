//! Error handling utilities for the stores

use relay_core::{MessageId, StoreError};
use sqlx::Error as SqlxError;

/// Convert a SQLx error to a StoreError
pub fn map_db_error(e: SqlxError) -> StoreError {
    StoreError::DatabaseError(e.to_string())
}

/// Map a foreign key violation to `ReferentialViolation`, anything else to a
/// generic database error
pub fn map_fk_violation(e: SqlxError, message_id: MessageId) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return StoreError::ReferentialViolation(message_id);
        }
    }
    StoreError::DatabaseError(e.to_string())
}
