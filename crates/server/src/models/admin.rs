//! Admin credential domain types.

use chrono::{DateTime, Utc};

use repair_desk_core::AdminId;

/// A stored admin credential (domain type).
///
/// Only the Argon2 PHC string is kept; the raw password never reaches the
/// database.
#[derive(Clone)]
pub struct AdminCredential {
    /// Unique admin ID.
    pub id: AdminId,
    /// Login name (unique, case-sensitive).
    pub username: String,
    /// Argon2 password hash in PHC string format.
    pub password_hash: String,
    /// When the credential was created.
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}
