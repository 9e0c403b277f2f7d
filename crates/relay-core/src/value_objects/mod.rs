//! Value objects - immutable types that represent domain concepts

mod message_id;

pub use message_id::MessageId;
