//! Repair request repository for database operations.
//!
//! Status changes are applied with a single conditional `UPDATE` so the
//! legality check and the write cannot interleave with another request.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use repair_desk_core::{RepairId, RepairStatus};

use super::RepositoryError;
use crate::models::repair::{NewRepairRequest, RepairRequest, StatusUpdate};

const REPAIR_COLUMNS: &str = "id, name, phone, email, service, description, date, location, \
     status, reason, created_at, completed_at";

/// Database row for the `repairs` table.
#[derive(Debug, sqlx::FromRow)]
struct RepairRow {
    id: RepairId,
    name: String,
    phone: String,
    email: String,
    service: String,
    description: String,
    date: String,
    location: String,
    status: String,
    reason: String,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<RepairRow> for RepairRequest {
    type Error = RepositoryError;

    fn try_from(row: RepairRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<RepairStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("repair {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            service: row.service,
            description: row.description,
            date: row.date,
            location: row.location,
            status,
            reason: row.reason,
            created_at: row.created_at,
            completed_at: row.completed_at,
        })
    }
}

/// Repository for repair request database operations.
pub struct RepairRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RepairRepository<'a> {
    /// Create a new repair repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every repair request, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored status is unknown.
    pub async fn list_all(&self) -> Result<Vec<RepairRequest>, RepositoryError> {
        let rows = sqlx::query_as::<_, RepairRow>(&format!(
            "SELECT {REPAIR_COLUMNS} FROM repairs ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(RepairRequest::try_from).collect()
    }

    /// Get a repair request by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored status is unknown.
    pub async fn get(&self, id: RepairId) -> Result<Option<RepairRequest>, RepositoryError> {
        let row = sqlx::query_as::<_, RepairRow>(&format!(
            "SELECT {REPAIR_COLUMNS} FROM repairs WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(RepairRequest::try_from).transpose()
    }

    /// Insert a new pending repair request.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewRepairRequest) -> Result<RepairRequest, RepositoryError> {
        let row = sqlx::query_as::<_, RepairRow>(&format!(
            r"
            INSERT INTO repairs
                (name, phone, email, service, description, date, location,
                 status, reason, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, '', ?)
            RETURNING {REPAIR_COLUMNS}
            "
        ))
        .bind(&new.name)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(&new.service)
        .bind(&new.description)
        .bind(&new.date)
        .bind(&new.location)
        .bind(RepairStatus::Pending.as_str())
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        RepairRequest::try_from(row)
    }

    /// Move a repair request to a new status.
    ///
    /// The update only applies if the current status is a legal predecessor
    /// of the target status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the request doesn't exist.
    /// Returns `RepositoryError::InvalidTransition` if the current status doesn't allow it.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: RepairId,
        update: &StatusUpdate,
    ) -> Result<RepairRequest, RepositoryError> {
        let target = update.target();

        let mut query = QueryBuilder::<Sqlite>::new("UPDATE repairs SET status = ");
        query.push_bind(target.as_str());

        match update {
            StatusUpdate::Confirm => {}
            StatusUpdate::Reject { reason } => {
                query.push(", reason = ");
                query.push_bind(reason.clone());
            }
            StatusUpdate::Complete { completed_at } => {
                query.push(", completed_at = ");
                query.push_bind(*completed_at);
            }
        }

        query.push(" WHERE id = ");
        query.push_bind(id);
        query.push(" AND status IN (");
        let mut allowed = query.separated(", ");
        for from in target.predecessors() {
            allowed.push_bind(from.as_str());
        }
        allowed.push_unseparated(")");
        query.push(" RETURNING ");
        query.push(REPAIR_COLUMNS);

        let row = query
            .build_query_as::<RepairRow>()
            .fetch_optional(self.pool)
            .await?;

        if let Some(row) = row {
            return RepairRequest::try_from(row);
        }

        // Nothing changed: either the request is gone or its status forbids the move.
        let current: Option<String> = sqlx::query_scalar("SELECT status FROM repairs WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        match current {
            None => Err(RepositoryError::NotFound),
            Some(status) => {
                let from = status.parse::<RepairStatus>().map_err(|e| {
                    RepositoryError::DataCorruption(format!("repair {id}: {e}"))
                })?;
                Err(RepositoryError::InvalidTransition { from, to: target })
            }
        }
    }

    /// Permanently delete a repair request.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the request doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: RepairId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM repairs WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
