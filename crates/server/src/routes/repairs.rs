//! Repair request route handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use repair_desk_core::RepairId;

use super::{json_rejection, ok_body};
use crate::error::{AppError, Result};
use crate::models::repair::{NewRepairRequest, RepairRequest};
use crate::services::RepairService;
use crate::state::AppState;

/// Response for a successful submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub id: RepairId,
}

/// Optional body of a reject action.
#[derive(Debug, Default, Deserialize)]
pub struct RejectBody {
    #[serde(default)]
    pub reason: Option<String>,
}

/// List all repair requests.
///
/// GET /api/repairs
#[instrument(skip_all)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<RepairRequest>>> {
    let repairs = RepairService::new(state.pool()).list().await?;
    Ok(Json(repairs))
}

/// Submit a new repair request.
///
/// POST /api/repairs
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewRepairRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>> {
    let Json(new) = payload.map_err(|e| json_rejection(&e))?;

    let repair = RepairService::new(state.pool()).submit(&new).await?;
    Ok(Json(SubmitResponse { id: repair.id }))
}

/// Confirm a pending request.
///
/// POST /api/repairs/{id}/confirm
#[instrument(skip_all)]
pub async fn confirm(
    State(state): State<AppState>,
    id: std::result::Result<Path<RepairId>, PathRejection>,
) -> Result<Json<serde_json::Value>> {
    let id = repair_id(id)?;
    RepairService::new(state.pool()).confirm(id).await?;
    Ok(Json(ok_body()))
}

/// Reject a pending request, optionally with a reason.
///
/// POST /api/repairs/{id}/reject
///
/// The body may be empty, `{}`, or `{"reason": "..."}`.
#[instrument(skip_all)]
pub async fn reject(
    State(state): State<AppState>,
    id: std::result::Result<Path<RepairId>, PathRejection>,
    body: Bytes,
) -> Result<Json<serde_json::Value>> {
    let id = repair_id(id)?;
    let body = parse_reject_body(&body)?;

    RepairService::new(state.pool())
        .reject(id, body.reason)
        .await?;
    Ok(Json(ok_body()))
}

/// Mark a request as completed.
///
/// POST /api/repairs/{id}/complete
#[instrument(skip_all)]
pub async fn complete(
    State(state): State<AppState>,
    id: std::result::Result<Path<RepairId>, PathRejection>,
) -> Result<Json<serde_json::Value>> {
    let id = repair_id(id)?;
    RepairService::new(state.pool()).complete(id).await?;
    Ok(Json(ok_body()))
}

/// Permanently delete a request.
///
/// DELETE /api/repairs/{id}
#[instrument(skip_all)]
pub async fn remove(
    State(state): State<AppState>,
    id: std::result::Result<Path<RepairId>, PathRejection>,
) -> Result<Json<serde_json::Value>> {
    let id = repair_id(id)?;
    RepairService::new(state.pool()).remove(id).await?;
    Ok(Json(ok_body()))
}

fn repair_id(path: std::result::Result<Path<RepairId>, PathRejection>) -> Result<RepairId> {
    path.map(|Path(id)| id)
        .map_err(|e| AppError::BadRequest(format!("invalid repair id: {}", e.body_text())))
}

fn parse_reject_body(body: &[u8]) -> Result<RejectBody> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RejectBody::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("invalid reject body: {e}")))
}
