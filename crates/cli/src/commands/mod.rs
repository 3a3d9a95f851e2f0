//! CLI subcommand implementations.

pub mod admin;
pub mod init;

use secrecy::SecretString;
use sqlx::SqlitePool;
use thiserror::Error;

use repair_desk_server::config::{ConfigError, ServerConfig};
use repair_desk_server::db::{self, RepositoryError};
use repair_desk_server::services::{self, AuthError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Environment configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema setup or query failed.
    #[error("Store error: {0}")]
    Repository(#[from] RepositoryError),

    /// Admin credential operation failed.
    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Resolve the database URL: an explicit `--database-url` wins over the environment.
///
/// # Errors
///
/// Returns `CommandError::Config` if the environment cannot be parsed.
pub fn database_url(explicit: Option<String>) -> Result<SecretString, CommandError> {
    match explicit {
        Some(url) => Ok(SecretString::from(url)),
        None => Ok(ServerConfig::from_env()?.database_url),
    }
}

/// Connect to the store and make sure the schema exists.
///
/// # Errors
///
/// Returns `CommandError` if the connection or schema setup fails.
pub async fn open_store(database_url: &SecretString) -> Result<SqlitePool, CommandError> {
    tracing::info!("Connecting to database...");
    let pool = db::create_pool(database_url).await?;
    services::initialize_store(&pool).await?;
    Ok(pool)
}
