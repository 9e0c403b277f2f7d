//! Broadcast fan-out
//!
//! Delivers one outbound frame to every registered connection.

mod router;

pub use router::BroadcastRouter;
