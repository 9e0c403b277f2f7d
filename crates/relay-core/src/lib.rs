//! # relay-core
//!
//! Domain layer containing entities, value objects, store traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Message, Reaction, ReactionTally};
pub use error::StoreError;
pub use traits::{MessageStore, ReactionStore, StoreResult};
pub use value_objects::MessageId;
