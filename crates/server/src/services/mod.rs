//! Business logic services for the repair desk.
//!
//! # Services
//!
//! - `auth` - Admin authentication and credential management (Argon2)
//! - `repairs` - Repair request submission and lifecycle transitions
//!
//! Services borrow the connection pool owned by `AppState`; they hold no
//! state of their own.

pub mod auth;
pub mod repairs;

pub use auth::{AuthError, AuthService, initialize_store};
pub use repairs::{DEFAULT_REJECT_REASON, RepairService};
