//! History replay
//!
//! Builds the full-log snapshot sent to newly connected clients.

mod assembler;

pub use assembler::HistoryAssembler;
