//! # relay-db
//!
//! Database layer implementing the store traits with SQLite via SQLx.
//!
//! ## Overview
//!
//! This crate provides SQLite implementations for the store traits defined
//! in `relay-core`. It handles:
//!
//! - Connection pool management (WAL mode, foreign keys on)
//! - Embedded schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Store implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relay_common::DatabaseConfig;
//! use relay_core::traits::MessageStore;
//! use relay_db::{create_pool, run_migrations, SqliteMessageStore};
//!
//! async fn example(config: &DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(config).await?;
//!     run_migrations(&pool).await?;
//!     let messages = SqliteMessageStore::new(pool);
//!
//!     let persisted = messages.append("alice", "hello").await?;
//!     println!("assigned id {}", persisted.id);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, SqlitePool};
pub use repositories::{SqliteMessageStore, SqliteReactionStore};
