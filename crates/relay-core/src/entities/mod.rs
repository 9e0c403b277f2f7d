//! Domain entities - core business objects

mod message;
mod reaction;

pub use message::Message;
pub use reaction::{Reaction, ReactionTally};
