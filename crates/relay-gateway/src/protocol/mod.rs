//! Wire protocol
//!
//! Frame types for both directions and the inbound codec.

mod codec;
mod frames;

pub use codec::{decode, DecodeError};
pub use frames::{ChatRequest, HistoryEntry, OutboundFrame, ReactionRequest, Request, TallyEntry};
