//! Database models - SQLx-compatible structs for the SQLite tables

mod message;
mod reaction;

pub use message::MessageModel;
pub use reaction::{ReactionModel, ReactionTallyModel};
