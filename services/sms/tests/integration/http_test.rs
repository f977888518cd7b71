use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use smsrelay_sms::router::build_router;

use crate::helpers::{Failure, MemoryStore, TEST_RECEIVED_AT, TEST_SENDER, test_state};

fn server(store: MemoryStore) -> TestServer {
    TestServer::new(build_router(test_state(store))).unwrap()
}

// ── POST /api/receive_sms ────────────────────────────────────────────────────

#[tokio::test]
async fn should_receive_sms_and_return_extracted_code() {
    let store = MemoryStore::new();
    let server = server(store.clone());

    let resp = server
        .post("/api/receive_sms")
        .json(&json!({
            "from": TEST_SENDER,
            "content": "您的验证码是：123456，5分钟内有效",
            "received_at": TEST_RECEIVED_AT,
        }))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(
        body,
        json!({
            "status": "success",
            "message": "sms received",
            "data": {
                "cache_key": "sms:15900000000:1700000000000",
                "from": TEST_SENDER,
                "timestamp": TEST_RECEIVED_AT,
                "code": "123456",
            },
        })
    );
    assert!(store.raw("latest_sms:15900000000").is_some());
}

#[tokio::test]
async fn should_accept_quoted_received_at() {
    let server = server(MemoryStore::new());

    let resp = server
        .post("/api/receive_sms")
        .json(&json!({
            "from": TEST_SENDER,
            "content": "code 7788",
            "received_at": "1700000000000",
        }))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["data"]["timestamp"], TEST_RECEIVED_AT);
}

#[tokio::test]
async fn should_reject_content_without_code() {
    let store = MemoryStore::new();
    let server = server(store.clone());

    let resp = server
        .post("/api/receive_sms")
        .json(&json!({
            "from": TEST_SENDER,
            "content": "hello there",
            "received_at": TEST_RECEIVED_AT,
        }))
        .expect_failure()
        .await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "NO_CODE_FOUND");
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn should_reject_missing_sender() {
    let server = server(MemoryStore::new());

    let resp = server
        .post("/api/receive_sms")
        .json(&json!({
            "content": "code 7788",
            "received_at": TEST_RECEIVED_AT,
        }))
        .expect_failure()
        .await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "INVALID_REQUEST");
}

#[tokio::test]
async fn should_reject_malformed_json() {
    let server = server(MemoryStore::new());

    let resp = server
        .post("/api/receive_sms")
        .text("{not json")
        .content_type("application/json")
        .expect_failure()
        .await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "INVALID_REQUEST");
}

#[tokio::test]
async fn should_return_503_when_store_is_down() {
    let server = server(MemoryStore::new().fail_writes("sms:", Failure::Unavailable));

    let resp = server
        .post("/api/receive_sms")
        .json(&json!({
            "from": TEST_SENDER,
            "content": "code 7788",
            "received_at": TEST_RECEIVED_AT,
        }))
        .expect_failure()
        .await;

    assert_eq!(resp.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "STORE_UNAVAILABLE");
}

#[tokio::test]
async fn should_succeed_when_only_latest_write_fails() {
    let server = server(MemoryStore::new().fail_writes("latest_sms:", Failure::Rejected));

    let resp = server
        .post("/api/receive_sms")
        .json(&json!({
            "from": TEST_SENDER,
            "content": "code 7788",
            "received_at": TEST_RECEIVED_AT,
        }))
        .await;

    resp.assert_status_ok();
}

// ── GET /api/latest_sms/{phone} ──────────────────────────────────────────────

#[tokio::test]
async fn should_return_latest_sms_for_phone() {
    let server = server(MemoryStore::new());

    for (content, at) in [("code 1111", TEST_RECEIVED_AT), ("code 2222", TEST_RECEIVED_AT + 1)] {
        server
            .post("/api/receive_sms")
            .json(&json!({ "from": TEST_SENDER, "content": content, "received_at": at }))
            .await
            .assert_status_ok();
    }

    let resp = server.get("/api/latest_sms/15900000000").await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(
        body,
        json!({
            "status": "success",
            "data": {
                "from": TEST_SENDER,
                "content": "2222",
                "received_at": TEST_RECEIVED_AT + 1,
            },
        })
    );
}

#[tokio::test]
async fn should_return_404_for_unknown_phone() {
    let server = server(MemoryStore::new());

    let resp = server.get("/api/latest_sms/13800000000").expect_failure().await;

    assert_eq!(resp.status_code(), StatusCode::NOT_FOUND);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "NOT_FOUND");
}

#[tokio::test]
async fn should_return_500_for_corrupt_record() {
    let store = MemoryStore::new();
    store.insert_raw(
        "latest_sms:15900000000",
        b"{\"from\":1}",
        std::time::Duration::from_secs(60),
    );
    let server = server(store);

    let resp = server.get("/api/latest_sms/15900000000").expect_failure().await;

    assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "CORRUPT_RECORD");
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_liveness_and_readiness() {
    let server = server(MemoryStore::new());

    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_report_not_ready_when_store_is_down() {
    let server = server(MemoryStore::new().fail_reads(Failure::Unavailable));

    let resp = server.get("/readyz").expect_failure().await;

    assert_eq!(resp.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_attach_request_id() {
    let server = server(MemoryStore::new());

    let resp = server.get("/healthz").await;

    let id = resp.header("x-request-id");
    assert!(!id.is_empty());
}
