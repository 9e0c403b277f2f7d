//! Relay server setup
//!
//! Router construction, dependency wiring, and the run loop.

mod handler;
mod state;

pub use handler::ws_handler;
pub use state::RelayState;

use axum::response::Html;
use axum::{routing::get, Router};
use relay_common::{AppConfig, AppError};
use relay_core::{MessageStore, ReactionStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Create the relay router
pub fn create_router() -> Router<RelayState> {
    Router::new()
        .route("/", get(index))
        .route("/ws", get(ws_handler))
        .route("/health", get(health_check))
}

/// Bundled client page
async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: RelayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open the database, run migrations, and build the shared state
pub async fn create_relay_state(config: AppConfig) -> Result<RelayState, AppError> {
    tracing::info!(url = %config.database.url, "Opening SQLite database");
    let pool = relay_db::create_pool(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    relay_db::run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    tracing::info!("Database ready");

    let messages: Arc<dyn MessageStore> =
        Arc::new(relay_db::SqliteMessageStore::new(pool.clone()));
    let reactions: Arc<dyn ReactionStore> =
        Arc::new(relay_db::SqliteReactionStore::new(pool.clone()));

    Ok(RelayState::new(messages, reactions, pool, config))
}

/// Run the relay server until shutdown
pub async fn run_server(app: Router, state: RelayState, addr: String) -> Result<(), AppError> {
    let listener = TcpListener::bind(&addr).await.map_err(AppError::Io)?;

    tracing::info!("Relay listening on ws://{addr}/ws");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(AppError::Io)?;

    Ok(())
}

/// Resolve on ctrl-c, then drive the shutdown hook
async fn shutdown_signal(state: RelayState) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Shutdown signal received");
            state.close().await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
        }
    }
}

/// Run the complete relay with the given configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();
    let state = create_relay_state(config).await?;
    let app = create_app(state.clone());

    run_server(app, state, addr).await
}
