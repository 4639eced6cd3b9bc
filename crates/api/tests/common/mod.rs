//! Shared fixtures for the HTTP integration tests.
//!
//! Tests run the full router (same middleware stack as production) over
//! the in-memory store, so no database is required.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use gather_admission::{Admissions, AdmissionStore, MemoryStore, StoreProfileDirectory};
use gather_api::auth::jwt::{generate_access_token, JwtConfig};
use gather_api::config::ServerConfig;
use gather_api::router::build_app_router;
use gather_api::state::AppState;
use gather_core::model::AttendeeProfile;
use gather_core::types::UserId;
use gather_events::NotificationBus;

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router over the given in-memory store.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let profiles = Arc::new(StoreProfileDirectory::new(
        store.clone() as Arc<dyn AdmissionStore>
    ));
    let admissions = Arc::new(Admissions::new(
        store.clone(),
        profiles,
        Arc::new(NotificationBus::default()),
    ));

    let state = AppState {
        admissions,
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a bearer token for a user with the test secret.
pub fn bearer_for(user_id: UserId) -> String {
    let token = generate_access_token(user_id, &test_config().jwt).expect("mint token");
    format!("Bearer {token}")
}

/// Store a complete profile so the eligibility gate passes.
pub async fn seed_profile(store: &MemoryStore, user_id: UserId) {
    store
        .upsert_profile(AttendeeProfile {
            user_id,
            first_name: Some("Test".into()),
            last_name: Some("Attendee".into()),
            phone: Some("+1 555 0100".into()),
            email: Some("attendee@example.com".into()),
            shirt_size: Some("M".into()),
            dietary_restrictions: Some("none".into()),
            accessibility_needs: Some("none".into()),
            updated_at: None,
        })
        .await
        .expect("seed profile");
}

pub async fn seed_user(store: &MemoryStore) -> UserId {
    let user_id = Uuid::new_v4();
    seed_profile(store, user_id).await;
    user_id
}

// -- request helpers --------------------------------------------------------

pub async fn get(app: Router, user_id: UserId, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", bearer_for(user_id))
        .body(Body::empty())
        .expect("build request");
    app.oneshot(request).await.expect("send request")
}

pub async fn post_json(
    app: Router,
    user_id: UserId,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", bearer_for(user_id))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");
    app.oneshot(request).await.expect("send request")
}

pub async fn put_json(
    app: Router,
    user_id: UserId,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("authorization", bearer_for(user_id))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");
    app.oneshot(request).await.expect("send request")
}

pub async fn delete(app: Router, user_id: UserId, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", bearer_for(user_id))
        .body(Body::empty())
        .expect("build request");
    app.oneshot(request).await.expect("send request")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse body as JSON")
}

/// Assert a status and return the parsed body.
pub async fn expect_status(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
