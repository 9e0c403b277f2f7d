//! Store errors - error types for the persistence layer

use thiserror::Error;

use crate::value_objects::MessageId;

/// Store layer errors
///
/// Nothing here is process-fatal: a failed append or tally is logged by the
/// caller and the connection carries on. Only open/init failures at startup
/// escalate, and those travel through the application error type instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A reaction referenced a message id the store never assigned
    #[error("Reaction references unknown message: {0}")]
    ReferentialViolation(MessageId),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl StoreError {
    /// Get an error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::ReferentialViolation(_) => "REFERENTIAL_VIOLATION",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a referential integrity failure
    pub fn is_referential_violation(&self) -> bool {
        matches!(self, Self::ReferentialViolation(_))
    }
}
