//! Health endpoint test.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, build_test_app};
use tower::ServiceExt;

use gather_admission::MemoryStore;

#[tokio::test]
async fn health_reports_ok_without_auth() {
    let app = build_test_app(Arc::new(MemoryStore::new()));

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["store_healthy"], true);
    assert!(json["version"].as_str().is_some());
}
