//! Integration tests for the repair request API.
//!
//! Drives the full router: submission, the status lifecycle, deletion,
//! and the error responses for bad input.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use repair_desk_integration_tests::TestContext;
use repair_desk_server::services::DEFAULT_REJECT_REASON;

fn timestamp(value: &Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

// =============================================================================
// Submission & Listing
// =============================================================================

#[tokio::test]
async fn test_submit_starts_pending() {
    let ctx = TestContext::new().await;

    let id = ctx.submit_sample("Li Lei").await;
    let repair = ctx.find(id).await.unwrap();

    assert_eq!(repair["status"], "pending");
    assert_eq!(repair["reason"], "");
    assert_eq!(repair["name"], "Li Lei");
    assert_eq!(repair["location"], "Library, 2F");
    assert!(repair["completedAt"].is_null());
    assert!(repair["createdAt"].is_string());
}

#[tokio::test]
async fn test_submit_assigns_unique_ids() {
    let ctx = TestContext::new().await;

    let first = ctx.submit_sample("a").await;
    let second = ctx.submit_sample("b").await;
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_submit_missing_fields_become_empty() {
    let ctx = TestContext::new().await;

    let response = ctx.post("/api/repairs", &json!({ "name": "only a name" })).await;
    assert_eq!(response.status, StatusCode::OK);

    let repair = ctx.find(response.body["id"].as_i64().unwrap()).await.unwrap();
    assert_eq!(repair["name"], "only a name");
    assert_eq!(repair["phone"], "");
    assert_eq!(repair["description"], "");
}

#[tokio::test]
async fn test_submit_null_and_numeric_fields_pass_through() {
    let ctx = TestContext::new().await;

    let response = ctx
        .post(
            "/api/repairs",
            &json!({ "name": "a", "phone": null, "email": null, "date": 20240601 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let repair = ctx.find(response.body["id"].as_i64().unwrap()).await.unwrap();
    assert_eq!(repair["name"], "a");
    assert_eq!(repair["phone"], "");
    assert_eq!(repair["email"], "");
    assert_eq!(repair["date"], "20240601");
}

#[tokio::test]
async fn test_submit_object_field_is_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx
        .post("/api/repairs", &json!({ "name": { "first": "a" } }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(ctx.get("/api/repairs").await.body, json!([]));
}

#[tokio::test]
async fn test_submit_without_json_is_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx.post_empty("/api/repairs").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let ctx = TestContext::new().await;

    let first = ctx.submit_sample("first").await;
    let second = ctx.submit_sample("second").await;
    let third = ctx.submit_sample("third").await;

    let response = ctx.get("/api/repairs").await;
    let ids: Vec<i64> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![third, second, first]);
}

#[tokio::test]
async fn test_list_empty_store() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/api/repairs").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

// =============================================================================
// Status Lifecycle
// =============================================================================

#[tokio::test]
async fn test_confirm_then_complete() {
    let ctx = TestContext::new().await;
    let id = ctx.submit_sample("x").await;

    let response = ctx.post_empty(&format!("/api/repairs/{id}/confirm")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "ok": true }));
    assert_eq!(ctx.find(id).await.unwrap()["status"], "confirmed");

    let response = ctx.post_empty(&format!("/api/repairs/{id}/complete")).await;
    assert_eq!(response.status, StatusCode::OK);

    let repair = ctx.find(id).await.unwrap();
    assert_eq!(repair["status"], "completed");
    assert!(timestamp(&repair["completedAt"]) >= timestamp(&repair["createdAt"]));
}

#[tokio::test]
async fn test_complete_directly_from_pending() {
    let ctx = TestContext::new().await;
    let id = ctx.submit_sample("x").await;

    let response = ctx.post_empty(&format!("/api/repairs/{id}/complete")).await;
    assert_eq!(response.status, StatusCode::OK);

    let repair = ctx.find(id).await.unwrap();
    assert_eq!(repair["status"], "completed");
    assert!(!repair["completedAt"].is_null());
}

#[tokio::test]
async fn test_reject_with_reason() {
    let ctx = TestContext::new().await;
    let id = ctx.submit_sample("x").await;

    let response = ctx
        .post(
            &format!("/api/repairs/{id}/reject"),
            &json!({ "reason": "broken screen" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let repair = ctx.find(id).await.unwrap();
    assert_eq!(repair["status"], "rejected");
    assert_eq!(repair["reason"], "broken screen");
}

#[tokio::test]
async fn test_reject_without_reason_uses_default() {
    let ctx = TestContext::new().await;

    let empty_body = ctx.submit_sample("empty body").await;
    let empty_object = ctx.submit_sample("empty object").await;
    let blank = ctx.submit_sample("blank").await;

    ctx.post_empty(&format!("/api/repairs/{empty_body}/reject"))
        .await;
    ctx.post(&format!("/api/repairs/{empty_object}/reject"), &json!({}))
        .await;
    ctx.post(
        &format!("/api/repairs/{blank}/reject"),
        &json!({ "reason": "   " }),
    )
    .await;

    for id in [empty_body, empty_object, blank] {
        let repair = ctx.find(id).await.unwrap();
        assert_eq!(repair["status"], "rejected");
        assert_eq!(repair["reason"], DEFAULT_REJECT_REASON);
    }
}

#[tokio::test]
async fn test_reject_with_malformed_body_is_bad_request() {
    let ctx = TestContext::new().await;
    let id = ctx.submit_sample("x").await;

    let response = ctx
        .send(
            axum::http::Request::builder()
                .method("POST")
                .uri(format!("/api/repairs/{id}/reject"))
                .header("content-type", "application/json")
                .body(axum::body::Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(ctx.find(id).await.unwrap()["status"], "pending");
}

#[tokio::test]
async fn test_illegal_transitions_conflict_and_leave_record_unchanged() {
    let ctx = TestContext::new().await;
    let id = ctx.submit_sample("x").await;

    ctx.post_empty(&format!("/api/repairs/{id}/complete")).await;
    let before = ctx.find(id).await.unwrap();

    for action in ["confirm", "reject", "complete"] {
        let response = ctx.post_empty(&format!("/api/repairs/{id}/{action}")).await;
        assert_eq!(response.status, StatusCode::CONFLICT, "{action}");
        assert!(response.body["error"].is_string());
    }

    assert_eq!(ctx.find(id).await.unwrap(), before);
}

#[tokio::test]
async fn test_rejected_cannot_be_confirmed() {
    let ctx = TestContext::new().await;
    let id = ctx.submit_sample("x").await;

    ctx.post_empty(&format!("/api/repairs/{id}/reject")).await;

    let response = ctx.post_empty(&format!("/api/repairs/{id}/confirm")).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(ctx.find(id).await.unwrap()["status"], "rejected");
}

#[tokio::test]
async fn test_confirmed_cannot_be_rejected() {
    let ctx = TestContext::new().await;
    let id = ctx.submit_sample("x").await;

    ctx.post_empty(&format!("/api/repairs/{id}/confirm")).await;

    let response = ctx.post_empty(&format!("/api/repairs/{id}/reject")).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

// =============================================================================
// Deletion & Missing Records
// =============================================================================

#[tokio::test]
async fn test_delete_removes_from_list() {
    let ctx = TestContext::new().await;
    let keep = ctx.submit_sample("keep").await;
    let gone = ctx.submit_sample("gone").await;

    let response = ctx.delete(&format!("/api/repairs/{gone}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "ok": true }));

    assert!(ctx.find(gone).await.is_none());
    assert!(ctx.find(keep).await.is_some());
}

#[tokio::test]
async fn test_missing_id_is_not_found() {
    let ctx = TestContext::new().await;

    for action in ["confirm", "reject", "complete"] {
        let response = ctx.post_empty(&format!("/api/repairs/999/{action}")).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{action}");
    }

    let response = ctx.delete("/api/repairs/999").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let ctx = TestContext::new().await;
    let id = ctx.submit_sample("x").await;

    assert_eq!(
        ctx.delete(&format!("/api/repairs/{id}")).await.status,
        StatusCode::OK
    );
    assert_eq!(
        ctx.delete(&format!("/api/repairs/{id}")).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let ctx = TestContext::new().await;

    let response = ctx.post_empty("/api/repairs/abc/confirm").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());

    let response = ctx.delete("/api/repairs/abc").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Ambient Routes
// =============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, Value::String("ok".to_string()));

    let response = ctx.get("/health/ready").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_fails_when_pool_closed() {
    let ctx = TestContext::new().await;
    ctx.pool.close().await;

    let response = ctx.get("/health/ready").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_static_fallback_serves_index() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.as_str().unwrap().contains("Repair Desk"));

    let response = ctx.get("/no-such-page.html").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_every_response_has_request_id() {
    let ctx = TestContext::new().await;

    assert!(ctx.get("/api/repairs").await.request_id.is_some());
    assert!(ctx.delete("/api/repairs/999").await.request_id.is_some());
    assert!(ctx.get("/").await.request_id.is_some());
}
