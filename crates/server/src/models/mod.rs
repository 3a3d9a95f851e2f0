//! Domain models for the repair desk.
//!
//! These types represent validated domain objects separate from database row types.

pub mod admin;
pub mod lenient;
pub mod repair;

pub use admin::AdminCredential;
pub use repair::{NewRepairRequest, RepairRequest, StatusUpdate};
