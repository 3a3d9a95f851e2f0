//! Repair request lifecycle.
//!
//! A request starts out `pending` and is moved by explicit admin actions:
//!
//! ```text
//! pending ──► confirmed ──► completed
//!    │                         ▲
//!    ├─────────────────────────┘
//!    └──► rejected
//! ```
//!
//! `rejected` and `completed` are terminal. Nothing moves backwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status of a repair request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepairStatus {
    /// Submitted, awaiting an admin decision.
    #[default]
    Pending,
    /// Accepted by an admin; work is scheduled.
    Confirmed,
    /// Declined by an admin, with a reason.
    Rejected,
    /// Work finished.
    Completed,
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid repair status: {0}")]
pub struct ParseStatusError(pub String);

impl RepairStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Rejected,
        Self::Completed,
    ];

    /// The lowercase name stored in the database and sent over the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Whether an admin action may move a request from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Rejected | Self::Completed)
                | (Self::Confirmed, Self::Completed)
        )
    }

    /// Statuses from which a request may legally move into `self`.
    ///
    /// Empty for `Pending`, which is only ever assigned on creation.
    #[must_use]
    pub fn predecessors(self) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|from| from.can_transition_to(self))
            .collect()
    }

    /// Whether no further transition is defined from this status.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !Self::ALL.into_iter().any(|next| self.can_transition_to(next))
    }
}

impl std::fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RepairStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseStatusError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(RepairStatus::Pending.can_transition_to(RepairStatus::Confirmed));
        assert!(RepairStatus::Pending.can_transition_to(RepairStatus::Rejected));
        assert!(RepairStatus::Pending.can_transition_to(RepairStatus::Completed));
        assert!(RepairStatus::Confirmed.can_transition_to(RepairStatus::Completed));
    }

    #[test]
    fn test_illegal_transitions() {
        // Can't go back
        assert!(!RepairStatus::Confirmed.can_transition_to(RepairStatus::Pending));
        assert!(!RepairStatus::Completed.can_transition_to(RepairStatus::Confirmed));
        // Can't reject once confirmed
        assert!(!RepairStatus::Confirmed.can_transition_to(RepairStatus::Rejected));
        // Can't re-apply the same status
        for status in RepairStatus::ALL {
            assert!(!status.can_transition_to(status), "{status} -> {status}");
        }
        // Nothing leaves a terminal state
        for next in RepairStatus::ALL {
            assert!(!RepairStatus::Rejected.can_transition_to(next));
            assert!(!RepairStatus::Completed.can_transition_to(next));
        }
    }

    #[test]
    fn test_predecessors() {
        assert!(RepairStatus::Pending.predecessors().is_empty());
        assert_eq!(
            RepairStatus::Confirmed.predecessors(),
            vec![RepairStatus::Pending]
        );
        assert_eq!(
            RepairStatus::Rejected.predecessors(),
            vec![RepairStatus::Pending]
        );
        assert_eq!(
            RepairStatus::Completed.predecessors(),
            vec![RepairStatus::Pending, RepairStatus::Confirmed]
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(RepairStatus::Rejected.is_terminal());
        assert!(RepairStatus::Completed.is_terminal());
        assert!(!RepairStatus::Pending.is_terminal());
        assert!(!RepairStatus::Confirmed.is_terminal());
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in RepairStatus::ALL {
            assert_eq!(status.as_str().parse::<RepairStatus>().unwrap(), status);
        }
        assert!("done".parse::<RepairStatus>().is_err());
        assert!("Pending".parse::<RepairStatus>().is_err());
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&RepairStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
        let status: RepairStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(status, RepairStatus::Rejected);
    }
}
