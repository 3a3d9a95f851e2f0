//! Database operations for the repair desk SQLite file.
//!
//! # Database: single on-disk SQLite file (default `repair.db`)
//!
//! ## Tables
//!
//! - `repairs` - Customer repair requests and their lifecycle status
//! - `admins` - Admin credentials (Argon2 password hashes)
//!
//! # Initialization
//!
//! [`initialize`] creates missing tables and, the first time the `admins`
//! table is created, seeds the default admin. It runs on every server start
//! and via:
//! ```bash
//! cargo run -p repair-desk-cli -- init
//! ```

pub mod admins;
pub mod repairs;

use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use repair_desk_core::RepairStatus;
use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use admins::AdminRepository;
pub use repairs::RepairRepository;

/// Username of the admin seeded on first initialization.
pub const DEFAULT_ADMIN_USERNAME: &str = "202312420";

/// Password of the admin seeded on first initialization.
pub const DEFAULT_ADMIN_PASSWORD: &str = "335177Ff";

const CREATE_REPAIRS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS repairs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL DEFAULT '',
        phone TEXT NOT NULL DEFAULT '',
        email TEXT NOT NULL DEFAULT '',
        service TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        date TEXT NOT NULL DEFAULT '',
        location TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT 'pending',
        reason TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL,
        completed_at TEXT
    )
";

const CREATE_REPAIRS_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS repairs_created_at_idx ON repairs (created_at)";

const CREATE_ADMINS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS admins (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The requested status change is not allowed from the current status.
    #[error("cannot move a {from} request to {to}")]
    InvalidTransition {
        from: RepairStatus,
        to: RepairStatus,
    },
}

/// Create a SQLite connection pool from a database URL.
///
/// # Arguments
///
/// * `database_url` - SQLite URL such as `sqlite://repair.db` (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the file cannot be opened.
pub async fn create_pool(database_url: &SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?;
    create_pool_with(options).await
}

/// Create a SQLite connection pool with sensible defaults.
///
/// The file is created if missing. WAL journaling plus a busy timeout let
/// concurrent writers queue behind SQLite's write lock instead of failing.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool_with(options: SqliteConnectOptions) -> Result<SqlitePool, sqlx::Error> {
    let options = options
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create tables if absent and seed the default admin on first creation.
///
/// `default_admin_hash` is the PHC string stored for
/// [`DEFAULT_ADMIN_USERNAME`]; it is only written when the `admins` table is
/// new. Safe to call on every startup. Returns `true` if this call created
/// the schema (and therefore seeded the default admin).
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any statement fails; the whole
/// initialization is rolled back.
pub async fn initialize(
    pool: &SqlitePool,
    default_admin_hash: &str,
) -> Result<bool, RepositoryError> {
    let mut tx = pool.begin().await?;

    let admins_exist: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'admins'",
    )
    .fetch_one(&mut *tx)
    .await?;

    for statement in [
        CREATE_REPAIRS_TABLE,
        CREATE_REPAIRS_CREATED_AT_INDEX,
        CREATE_ADMINS_TABLE,
    ] {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    let first_run = admins_exist == 0;
    if first_run {
        sqlx::query("INSERT INTO admins (username, password_hash, created_at) VALUES (?, ?, ?)")
            .bind(DEFAULT_ADMIN_USERNAME)
            .bind(default_admin_hash)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    if first_run {
        tracing::info!(
            username = DEFAULT_ADMIN_USERNAME,
            "Database initialized, default admin account created"
        );
    } else {
        tracing::debug!("Database schema already present");
    }

    Ok(first_run)
}

/// Map a unique-constraint violation to `RepositoryError::Conflict`.
pub(crate) fn map_unique_violation(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(err)
}
