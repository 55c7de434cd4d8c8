//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use maple_content::fs_content_store::FsContentStore;
use maple_core::ids::UuidV7Generator;
use maple_store::pg_save_ledger::PgSaveLedger;
use maple_store::pg_session_identity::{PgSessionIdentityProvider, token_digest};
use maple_test_support::SteppingClock;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use maple_api::state::AppState;

/// Scene files shipped with the server.
const SCENES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scenes");

/// Build the full app router against Postgres and the shipped scenes, with a
/// clock that ticks one millisecond per read.
pub fn build_test_app(pool: PgPool) -> Router {
    let clock = SteppingClock::new(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
        chrono::TimeDelta::milliseconds(1),
    );
    let app_state = AppState::new(
        Arc::new(clock),
        Arc::new(UuidV7Generator),
        Arc::new(FsContentStore::new(SCENES_DIR)),
        Arc::new(PgSaveLedger::new(pool.clone())),
        Arc::new(PgSessionIdentityProvider::new(pool)),
    );
    maple_api::app(app_state)
}

/// Register a non-expiring session and return its player id.
pub async fn create_session(pool: &PgPool, token: &str) -> Uuid {
    let player_id = Uuid::new_v4();
    sqlx::query("INSERT INTO player_sessions (token_sha256, player_id) VALUES ($1, $2)")
        .bind(token_digest(token))
        .bind(player_id)
        .execute(pool)
        .await
        .unwrap();
    player_id
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send an authenticated POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send an authenticated GET request and return the response.
pub async fn get_json(app: Router, uri: &str, token: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}
