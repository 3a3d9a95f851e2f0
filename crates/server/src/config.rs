//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `REPAIR_DESK_DATABASE_URL` - SQLite database URL (falls back to `DATABASE_URL`,
//!   default: `sqlite://repair.db`)
//! - `REPAIR_DESK_HOST` - Bind address (default: 127.0.0.1)
//! - `REPAIR_DESK_PORT` - Listen port (falls back to `PORT`, default: 3000)
//! - `REPAIR_DESK_STATIC_DIR` - Directory served for non-API paths (default: public)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g., production)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Default database location, relative to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://repair.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Repair Desk server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite database URL
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory of static assets served as the fallback route
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = SecretString::from(database_url(&lookup));

        let host = lookup("REPAIR_DESK_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_owned())
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("REPAIR_DESK_HOST".to_string(), e.to_string())
            })?;

        let (port_key, port) = match lookup("REPAIR_DESK_PORT") {
            Some(value) => ("REPAIR_DESK_PORT", value),
            None => ("PORT", lookup("PORT").unwrap_or_else(|| "3000".to_owned())),
        };
        let port = port
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar(port_key.to_string(), e.to_string()))?;

        let static_dir = PathBuf::from(
            lookup("REPAIR_DESK_STATIC_DIR").unwrap_or_else(|| "public".to_owned()),
        );

        Ok(Self {
            database_url,
            host,
            port,
            static_dir,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get the database URL, preferring the namespaced variable over `DATABASE_URL`.
fn database_url<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("REPAIR_DESK_DATABASE_URL")
        .or_else(|| lookup("DATABASE_URL"))
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned())
}
