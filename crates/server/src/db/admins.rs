//! Admin credential repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use repair_desk_core::AdminId;

use super::{RepositoryError, map_unique_violation};
use crate::models::admin::AdminCredential;

/// Database row for the `admins` table.
#[derive(sqlx::FromRow)]
struct AdminRow {
    id: AdminId,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<AdminRow> for AdminCredential {
    fn from(row: AdminRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

/// Repository for admin credential database operations.
pub struct AdminRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an admin credential by exact (case-sensitive) username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminCredential>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            "SELECT id, username, password_hash, created_at FROM admins WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(AdminCredential::from))
    }

    /// Create a new admin credential from an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<AdminCredential, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            INSERT INTO admins (username, password_hash, created_at)
            VALUES (?, ?, ?)
            RETURNING id, username, password_hash, created_at
            ",
        )
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "username"))?;

        Ok(row.into())
    }

    /// List all admin credentials, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<AdminCredential>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminRow>(
            "SELECT id, username, password_hash, created_at FROM admins ORDER BY id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(AdminCredential::from).collect())
    }
}
