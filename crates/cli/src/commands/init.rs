//! Schema setup command.
//!
//! # Usage
//!
//! ```bash
//! # Create tables in the configured database
//! repair-cli init
//!
//! # Target a specific file
//! repair-cli --database-url sqlite://data/repair.db init
//! ```
//!
//! # Environment Variables
//!
//! - `REPAIR_DESK_DATABASE_URL` - SQLite URL (falls back to `DATABASE_URL`)
//!
//! Running it against an existing database is a no-op.

use secrecy::SecretString;

use repair_desk_server::{db, services};

use super::CommandError;

/// Create the schema, seeding the default admin if the database is new.
///
/// Returns `true` when this run created the schema.
///
/// # Errors
///
/// Returns `CommandError` if the database cannot be opened or initialized.
pub async fn run(database_url: &SecretString) -> Result<bool, CommandError> {
    tracing::info!("Connecting to database...");
    let pool = db::create_pool(database_url).await?;

    let seeded = services::initialize_store(&pool).await?;
    if seeded {
        tracing::info!("Schema created");
        tracing::warn!(
            username = db::DEFAULT_ADMIN_USERNAME,
            "Default admin seeded. Add your own with 'repair-cli admin add'."
        );
    } else {
        tracing::info!("Schema already present, nothing to do");
    }

    pool.close().await;
    Ok(seeded)
}
