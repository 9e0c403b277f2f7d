//! Store traits (ports)

mod stores;

pub use stores::{MessageStore, ReactionStore, StoreResult};
