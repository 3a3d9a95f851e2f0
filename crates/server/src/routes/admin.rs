//! Admin credential route handlers.
//!
//! Login is a stateless credential check: no session or token is issued.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use super::{json_rejection, ok_body};
use crate::error::{AppError, Result};
use crate::models::lenient;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Credentials posted to both admin endpoints.
///
/// Missing, `null` or numeric fields are read as text so a malformed login
/// is reported as bad credentials rather than a parse failure.
#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default, deserialize_with = "lenient::text")]
    pub user: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub pass: String,
}

impl std::fmt::Debug for CredentialsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsForm")
            .field("user", &self.user)
            .field("pass", &"[REDACTED]")
            .finish()
    }
}

/// Check admin credentials.
///
/// POST /api/admin/login
///
/// Responds `{"ok": true}` on a match and `401 {"ok": false}` otherwise.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CredentialsForm>, JsonRejection>,
) -> Result<Response> {
    let Json(form) = payload.map_err(|e| json_rejection(&e))?;
    let password = SecretString::from(form.pass);

    match AuthService::new(state.pool()).login(&form.user, &password).await {
        Ok(admin) => {
            tracing::info!(username = %admin.username, "Admin login succeeded");
            Ok(Json(ok_body()).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(username = %form.user, "Admin login failed");
            Ok((StatusCode::UNAUTHORIZED, Json(json!({ "ok": false }))).into_response())
        }
        Err(e) => Err(AppError::Auth(e)),
    }
}

/// Add a new admin credential.
///
/// POST /api/admin/add
///
/// Responds `409` if the username is already taken.
#[instrument(skip_all)]
pub async fn add(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CredentialsForm>, JsonRejection>,
) -> Result<Json<serde_json::Value>> {
    let Json(form) = payload.map_err(|e| json_rejection(&e))?;
    let password = SecretString::from(form.pass);

    AuthService::new(state.pool())
        .add_admin(&form.user, &password)
        .await?;

    Ok(Json(ok_body()))
}
