//! Shared relay state
//!
//! The stores, connection registry, and shutdown flag shared by every
//! handler.

use crate::broadcast::BroadcastRouter;
use crate::connection::ConnectionRegistry;
use crate::history::HistoryAssembler;
use relay_common::AppConfig;
use relay_core::{MessageStore, ReactionStore};
use relay_db::SqlitePool;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared state for the relay server
///
/// Cheap to clone; every field is a shared handle.
#[derive(Clone)]
pub struct RelayState {
    /// Durable chat message log
    messages: Arc<dyn MessageStore>,
    /// Durable reaction log
    reactions: Arc<dyn ReactionStore>,
    /// Live connections
    registry: Arc<ConnectionRegistry>,
    /// Fan-out over the registry
    router: BroadcastRouter,
    /// History replay builder
    assembler: HistoryAssembler,
    /// Held across append and fan-out enqueue so delivery order matches id
    /// order on every connection
    publish_lock: Arc<Mutex<()>>,
    /// Set once when shutdown begins
    closing: Arc<AtomicBool>,
    /// Kept so shutdown can close it
    pool: SqlitePool,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl RelayState {
    /// Wire up shared state over the storage layer
    pub fn new(
        messages: Arc<dyn MessageStore>,
        reactions: Arc<dyn ReactionStore>,
        pool: SqlitePool,
        config: AppConfig,
    ) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let router = BroadcastRouter::new(registry.clone());
        let assembler = HistoryAssembler::new(messages.clone(), reactions.clone());

        Self {
            messages,
            reactions,
            registry,
            router,
            assembler,
            publish_lock: Arc::new(Mutex::new(())),
            closing: Arc::new(AtomicBool::new(false)),
            pool,
            config: Arc::new(config),
        }
    }

    /// Durable chat message log
    pub fn messages(&self) -> &dyn MessageStore {
        self.messages.as_ref()
    }

    /// Durable reaction log
    pub fn reactions(&self) -> &dyn ReactionStore {
        self.reactions.as_ref()
    }

    /// Connection registry
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Broadcast router
    pub fn router(&self) -> &BroadcastRouter {
        &self.router
    }

    /// History assembler
    pub fn assembler(&self) -> &HistoryAssembler {
        &self.assembler
    }

    /// Lock serializing append-and-enqueue on the publish paths
    pub fn publish_lock(&self) -> &Mutex<()> {
        &self.publish_lock
    }

    /// Application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Whether shutdown has begun
    pub fn is_closing(&self) -> bool {
        self.closing.load(Ordering::SeqCst)
    }

    /// Stop accepting new connections and release the store. A second call
    /// is a no-op.
    pub async fn close(&self) {
        if self.closing.swap(true, Ordering::SeqCst) {
            return;
        }

        tracing::info!("Closing relay state");
        self.pool.close().await;
    }
}

impl std::fmt::Debug for RelayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayState")
            .field("registry", &self.registry)
            .field("closing", &self.is_closing())
            .finish_non_exhaustive()
    }
}
