//! Repair request service.
//!
//! Thin orchestration over [`RepairRepository`]: each operation maps to one
//! store call. Transition legality is enforced by the repository's
//! conditional update.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

use repair_desk_core::RepairId;

use crate::db::{RepairRepository, RepositoryError};
use crate::models::repair::{NewRepairRequest, RepairRequest, StatusUpdate};

/// Reason recorded when a request is rejected without one.
pub const DEFAULT_REJECT_REASON: &str = "无原因";

/// Repair request service.
pub struct RepairService<'a> {
    repairs: RepairRepository<'a>,
}

impl<'a> RepairService<'a> {
    /// Create a new repair service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            repairs: RepairRepository::new(pool),
        }
    }

    /// List all repair requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn list(&self) -> Result<Vec<RepairRequest>, RepositoryError> {
        self.repairs.list_all().await
    }

    /// Get a single repair request.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the request doesn't exist.
    pub async fn get(&self, id: RepairId) -> Result<RepairRequest, RepositoryError> {
        self.repairs.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Submit a new repair request. It starts out pending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the insert fails.
    #[instrument(skip_all, fields(service = %new.service))]
    pub async fn submit(&self, new: &NewRepairRequest) -> Result<RepairRequest, RepositoryError> {
        let repair = self.repairs.create(new).await?;
        tracing::info!(repair_id = %repair.id, "Repair request submitted");
        Ok(repair)
    }

    /// Confirm a pending request.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` or `RepositoryError::InvalidTransition`.
    pub async fn confirm(&self, id: RepairId) -> Result<RepairRequest, RepositoryError> {
        self.transition(id, StatusUpdate::Confirm).await
    }

    /// Reject a pending request.
    ///
    /// A missing or blank reason is replaced by [`DEFAULT_REJECT_REASON`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` or `RepositoryError::InvalidTransition`.
    pub async fn reject(
        &self,
        id: RepairId,
        reason: Option<String>,
    ) -> Result<RepairRequest, RepositoryError> {
        let reason = reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REJECT_REASON.to_owned());

        self.transition(id, StatusUpdate::Reject { reason }).await
    }

    /// Mark a pending or confirmed request as completed now.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` or `RepositoryError::InvalidTransition`.
    pub async fn complete(&self, id: RepairId) -> Result<RepairRequest, RepositoryError> {
        self.transition(
            id,
            StatusUpdate::Complete {
                completed_at: Utc::now(),
            },
        )
        .await
    }

    /// Permanently delete a request.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the request doesn't exist.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: RepairId) -> Result<(), RepositoryError> {
        self.repairs.delete(id).await?;
        tracing::info!(repair_id = %id, "Repair request deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(status = %update.target()))]
    async fn transition(
        &self,
        id: RepairId,
        update: StatusUpdate,
    ) -> Result<RepairRequest, RepositoryError> {
        let repair = self.repairs.update_status(id, &update).await?;
        tracing::info!(repair_id = %id, status = %repair.status, "Repair status changed");
        Ok(repair)
    }
}
