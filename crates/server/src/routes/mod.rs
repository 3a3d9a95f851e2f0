//! HTTP route handlers for the repair desk.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Liveness check
//! GET    /health/ready                - Readiness check (database)
//!
//! # Repairs
//! GET    /api/repairs                 - List all requests, newest first
//! POST   /api/repairs                 - Submit a request -> {id}
//! POST   /api/repairs/{id}/confirm    - pending -> confirmed
//! POST   /api/repairs/{id}/reject     - pending -> rejected ({reason?})
//! POST   /api/repairs/{id}/complete   - pending|confirmed -> completed
//! DELETE /api/repairs/{id}            - Delete permanently
//!
//! # Admin
//! POST   /api/admin/login             - Check credentials -> {ok}
//! POST   /api/admin/add               - Add an admin credential
//!
//! GET    /*                           - Static files (fallback)
//! ```

pub mod admin;
pub mod health;
pub mod repairs;

use axum::{
    Router,
    body::Body,
    extract::rejection::JsonRejection,
    http::Request,
    middleware,
    routing::{get, post},
};
use serde_json::json;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::error::AppError;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the repair routes router.
pub fn repair_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(repairs::list).post(repairs::submit))
        .route("/{id}", axum::routing::delete(repairs::remove))
        .route("/{id}/confirm", post(repairs::confirm))
        .route("/{id}/reject", post(repairs::reject))
        .route("/{id}/complete", post(repairs::complete))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin::login))
        .route("/add", post(admin::add))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/repairs", repair_routes())
        .nest("/api/admin", admin_routes())
}

/// Build the full application: routes, static files, and middleware.
pub fn app(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config().static_dir);

    routes()
        .fallback_service(static_files)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Map a JSON body rejection to a `400` with the standard error shape.
pub(crate) fn json_rejection(rejection: &JsonRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

/// The `{"ok": true}` acknowledgement body.
pub(crate) fn ok_body() -> serde_json::Value {
    json!({ "ok": true })
}
