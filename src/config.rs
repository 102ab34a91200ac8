use anyhow::Result;
use sea_orm::{Database, DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

use crate::schemas::{AppState, PersistenceFailureMode};

/// Open a connection pool for `database_url`.
///
/// SQLite pools get a `regexp` function, which the `users.email` check
/// constraint calls, and enforce foreign keys. An in-memory SQLite database
/// lives only as long as its connection, so that pool keeps exactly one
/// connection open for its whole lifetime.
pub async fn connect_database(database_url: &str) -> Result<DatabaseConnection> {
    info!("Connecting to database");
    debug!("Database URL: {}", database_url);

    if !database_url.starts_with("sqlite:") {
        return Ok(Database::connect(database_url).await?);
    }

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .with_regexp();

    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool_options = if in_memory {
        debug!("Using a single persistent connection for in-memory SQLite");
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };

    let pool = pool_options.connect_with(options).await?;
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// Initialize application state for the given database
pub async fn initialize_app_state_with_url(
    database_url: &str,
    api_key: String,
    persistence_failure: PersistenceFailureMode,
) -> Result<AppState> {
    let db = connect_database(database_url).await?;

    Ok(AppState {
        db,
        api_key,
        persistence_failure,
    })
}
