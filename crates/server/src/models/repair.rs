//! Repair request domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use repair_desk_core::{RepairId, RepairStatus};

use super::lenient;

/// A customer repair request (domain type).
///
/// Serialized with camelCase timestamps to match the public JSON API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairRequest {
    /// Unique request ID, assigned on creation.
    pub id: RepairId,
    /// Customer name.
    pub name: String,
    /// Customer phone number.
    pub phone: String,
    /// Customer email address.
    pub email: String,
    /// Requested service type.
    pub service: String,
    /// Free-text problem description.
    pub description: String,
    /// Requested appointment date, as entered by the customer.
    pub date: String,
    /// Where the repair should happen.
    pub location: String,
    /// Current lifecycle status.
    pub status: RepairStatus,
    /// Rejection reason; empty unless rejected.
    pub reason: String,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
    /// When the request was completed.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Customer-supplied fields for a new repair request.
///
/// Every field is an opaque pass-through string: missing fields and `null`
/// become empty, and numbers or booleans are kept as their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewRepairRequest {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(deserialize_with = "lenient::text")]
    pub service: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
}

/// An admin action that moves a request to a new status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    /// Accept the request.
    Confirm,
    /// Decline the request with a reason.
    Reject { reason: String },
    /// Mark the work as finished at the given time.
    Complete { completed_at: DateTime<Utc> },
}

impl StatusUpdate {
    /// The status this update moves a request into.
    #[must_use]
    pub const fn target(&self) -> RepairStatus {
        match self {
            Self::Confirm => RepairStatus::Confirmed,
            Self::Reject { .. } => RepairStatus::Rejected,
            Self::Complete { .. } => RepairStatus::Completed,
        }
    }
}
