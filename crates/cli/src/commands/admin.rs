//! Admin credential management commands.
//!
//! # Usage
//!
//! ```bash
//! # Add an admin credential
//! repair-cli admin add -u alice -p 'correct horse'
//!
//! # List admin usernames
//! repair-cli admin list
//! ```

use secrecy::SecretString;

use repair_desk_server::services::AuthService;

use super::{CommandError, open_store};

/// Add a new admin credential.
///
/// Returns the username that was stored.
///
/// # Errors
///
/// Returns `CommandError::Auth` if the username is taken or the input is empty.
pub async fn add(
    database_url: &SecretString,
    username: &str,
    password: &SecretString,
) -> Result<String, CommandError> {
    let pool = open_store(database_url).await?;

    let admin = AuthService::new(&pool).add_admin(username, password).await?;
    tracing::info!(
        "Admin added successfully! ID: {}, Username: {}",
        admin.id,
        admin.username
    );

    pool.close().await;
    Ok(admin.username)
}

/// List admin usernames in creation order.
///
/// # Errors
///
/// Returns `CommandError` if the database cannot be read.
pub async fn list(database_url: &SecretString) -> Result<Vec<String>, CommandError> {
    let pool = open_store(database_url).await?;

    let admins = AuthService::new(&pool).list_admins().await?;
    pool.close().await;

    #[allow(clippy::print_stdout)]
    {
        for admin in &admins {
            println!(
                "{}\t{}\t{}",
                admin.id,
                admin.username,
                admin.created_at.to_rfc3339()
            );
        }
    }

    Ok(admins.into_iter().map(|a| a.username).collect())
}
