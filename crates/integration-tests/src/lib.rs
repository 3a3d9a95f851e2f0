//! Integration tests for Repair Desk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p repair-desk-integration-tests
//! ```
//!
//! Every test gets its own [`TestContext`]: a fresh SQLite file in a
//! temporary directory, initialized exactly like a production startup, and
//! the full application router driven in-process with `tower::ServiceExt`.
//!
//! # Test Categories
//!
//! - `repairs_api` - Repair request lifecycle over HTTP
//! - `admin_api` - Admin login and credential management over HTTP
//! - `store` - Store initialization and concurrency

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::collections::HashMap;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use repair_desk_server::{config::ServerConfig, db, routes, services, state::AppState};

/// Largest response body the helpers will buffer.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// An isolated server instance backed by a throwaway database.
pub struct TestContext {
    /// Holds the database file and static directory alive for the test.
    pub dir: TempDir,
    pub pool: SqlitePool,
    pub app: Router,
}

/// Status, headers, and decoded body of a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub request_id: Option<String>,
    /// Parsed JSON body, or `Value::String` for non-JSON bodies.
    pub body: Value,
}

impl TestContext {
    /// Create a fresh database, initialize it, and build the router.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");

        let static_dir = dir.path().join("public");
        std::fs::create_dir(&static_dir).expect("create static dir");
        std::fs::write(
            static_dir.join("index.html"),
            "<!doctype html><title>Repair Desk</title>",
        )
        .expect("write index.html");

        let vars: HashMap<&str, String> = HashMap::from([
            (
                "REPAIR_DESK_DATABASE_URL",
                format!("sqlite://{}", dir.path().join("repair.db").display()),
            ),
            (
                "REPAIR_DESK_STATIC_DIR",
                static_dir.display().to_string(),
            ),
        ]);
        let config =
            ServerConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid test config");

        let pool = db::create_pool(&config.database_url)
            .await
            .expect("open test database");
        services::initialize_store(&pool).await.expect("initialize schema");

        let app = routes::app(AppState::new(config, pool.clone()));

        Self { dir, pool, app }
    }

    /// Send a request with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<&Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        self.send(request).await
    }

    /// Send a prebuilt request.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        TestResponse::read(response).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn post_empty(&self, uri: &str) -> TestResponse {
        self.request(Method::POST, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// Submit a request with every field filled and return its id.
    pub async fn submit_sample(&self, name: &str) -> i64 {
        let response = self
            .post(
                "/api/repairs",
                &serde_json::json!({
                    "name": name,
                    "phone": "13800000000",
                    "email": "customer@example.com",
                    "service": "screen",
                    "description": "cracked display",
                    "date": "2024-06-01",
                    "location": "Library, 2F",
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

        response.body["id"].as_i64().expect("numeric id")
    }

    /// Fetch the list and return the entry with the given id, if any.
    pub async fn find(&self, id: i64) -> Option<Value> {
        let response = self.get("/api/repairs").await;
        assert_eq!(response.status, StatusCode::OK);

        response
            .body
            .as_array()
            .expect("list is an array")
            .iter()
            .find(|r| r["id"].as_i64() == Some(id))
            .cloned()
    }
}

impl TestResponse {
    async fn read(response: Response) -> Self {
        let status = response.status();
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("read body");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        Self {
            status,
            request_id,
            body,
        }
    }
}
