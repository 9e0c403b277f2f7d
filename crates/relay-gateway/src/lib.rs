//! # relay-gateway
//!
//! WebSocket relay server: connection registry, broadcast fan-out, durable
//! message and reaction logs, and history replay for new clients.

pub mod broadcast;
pub mod connection;
pub mod history;
pub mod protocol;
pub mod server;
