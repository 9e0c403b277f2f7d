//! Store implementations
//!
//! SQLite implementations of the store traits defined in relay-core.

mod error;
mod message;
mod reaction;

pub use message::SqliteMessageStore;
pub use reaction::SqliteReactionStore;
