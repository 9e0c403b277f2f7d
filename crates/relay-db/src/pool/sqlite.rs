//! SQLite connection pool management

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use relay_common::DatabaseConfig;

static MIGRATOR: Migrator = sqlx::migrate!();

/// Create a new SQLite connection pool
///
/// The database file is created if missing. Every pooled connection runs
/// with WAL journaling and foreign key enforcement switched on; the latter
/// is what turns a reaction against a missing message into a constraint
/// failure instead of a silently dangling row.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Run the embedded migrations, creating the schema when absent
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
