//! Connection tracking
//!
//! Per-connection state and the registry of live connections.

mod connection;
mod registry;

pub use connection::{Connection, ConnectionState};
pub use registry::ConnectionRegistry;
