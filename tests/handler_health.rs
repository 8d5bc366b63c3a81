mod common;

use serde_json::Value;
use std::sync::atomic::Ordering;

use common::MemoryBackend;

#[tokio::test]
async fn test_health_endpoint_success() {
    let backend = MemoryBackend::new();
    let server = common::create_test_server(&backend);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let backend = MemoryBackend::new();
    backend.listings_broken.store(true, Ordering::SeqCst);
    let server = common::create_test_server(&backend);

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
}
