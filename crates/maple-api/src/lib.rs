//! Blood on Maple Leaves — HTTP API.
//!
//! Library half of the server so integration tests can build the same
//! router the binary serves.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use crate::state::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with the game client's origins.
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/scenes", routes::scenes::router())
        .nest("/api/v1/progress", routes::progress::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
