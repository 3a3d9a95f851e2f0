//! Authentication service.
//!
//! Verifies admin logins and adds new admin credentials. Passwords are
//! hashed with Argon2id and a random salt; verification is done by the
//! hasher, which compares digests in constant time.

mod error;

pub use error::AuthError;

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use tracing::instrument;

use crate::db::{self, DEFAULT_ADMIN_PASSWORD, RepositoryError};
use crate::db::admins::AdminRepository;
use crate::models::admin::AdminCredential;

/// Hash verified against when a username is unknown, so a miss costs the
/// same Argon2 work as a wrong password.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("no such admin").unwrap_or_default());

/// Authentication service.
///
/// Handles admin login and admin account creation.
pub struct AuthService<'a> {
    admins: AdminRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            admins: AdminRepository::new(pool),
        }
    }

    /// Login with username and password.
    ///
    /// The username match is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username/password is wrong.
    /// Returns `AuthError::Repository` if the lookup fails.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<AdminCredential, AuthError> {
        let Some(admin) = self.admins.get_by_username(username).await? else {
            let _ = verify_password(password.expose_secret(), &DUMMY_HASH);
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password.expose_secret(), &admin.password_hash)?;

        Ok(admin)
    }

    /// Add a new admin credential.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidInput` if the username or password is empty.
    /// Returns `AuthError::UserAlreadyExists` if the username is taken.
    /// Returns `AuthError::Repository` for other database errors.
    #[instrument(skip(self, password))]
    pub async fn add_admin(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<AdminCredential, AuthError> {
        validate_credentials(username, password.expose_secret())?;

        let password_hash = hash_password(password.expose_secret())?;

        let admin = self
            .admins
            .create(username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(admin_id = %admin.id, username = %admin.username, "Admin added");
        Ok(admin)
    }

    /// List all admin credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the query fails.
    pub async fn list_admins(&self) -> Result<Vec<AdminCredential>, AuthError> {
        Ok(self.admins.list_all().await?)
    }
}

/// Create the schema, seeding the default admin with a freshly salted hash.
///
/// Returns `true` if this call created the schema.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing the seed password fails.
/// Returns `AuthError::Repository` if any schema statement fails.
pub async fn initialize_store(pool: &SqlitePool) -> Result<bool, AuthError> {
    let seed_hash = hash_password(DEFAULT_ADMIN_PASSWORD)?;
    Ok(db::initialize(pool, &seed_hash).await?)
}

/// Reject blank usernames and empty passwords.
fn validate_credentials(username: &str, password: &str) -> Result<(), AuthError> {
    if username.trim().is_empty() {
        return Err(AuthError::InvalidInput("username is required".to_string()));
    }
    if password.is_empty() {
        return Err(AuthError::InvalidInput("password is required".to_string()));
    }
    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
