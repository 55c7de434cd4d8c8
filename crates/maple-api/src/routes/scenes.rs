//! Routes for reading scenes and making choices.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get, routing::post};
use maple_core::save::StatTotals;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use maple_progression::application::command_handlers;
use maple_progression::application::query_handlers::{self, SceneView};
use maple_progression::domain::commands;

use crate::auth::AuthenticatedPlayer;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /{scene_id}/choose.
#[derive(Debug, Deserialize)]
pub struct ChooseRequest {
    /// The choice made in the scene.
    pub choice_id: String,
}

/// Response body for POST /{scene_id}/choose.
#[derive(Debug, Serialize)]
pub struct ChooseResponse {
    /// The scene the player moved to.
    pub next_scene_id: String,
    /// The save that recorded the move.
    pub save_id: Uuid,
    /// Totals after the choice's effects.
    pub stats: StatTotals,
}

/// GET /{scene_id}
#[instrument(skip(state), fields(player_id = %player.0))]
async fn get_scene(
    State(state): State<AppState>,
    player: AuthenticatedPlayer,
    Path(scene_id): Path<String>,
) -> Result<Json<SceneView>, ApiError> {
    let view = query_handlers::get_scene_view(
        player.0,
        &scene_id,
        &state.policy,
        &*state.content,
        &*state.ledger,
    )
    .await?;
    Ok(Json(view))
}

/// POST /{scene_id}/choose
#[instrument(skip(state, request), fields(player_id = %player.0, choice_id = %request.choice_id))]
async fn choose(
    State(state): State<AppState>,
    player: AuthenticatedPlayer,
    Path(scene_id): Path<String>,
    Json(request): Json<ChooseRequest>,
) -> Result<Json<ChooseResponse>, ApiError> {
    let command = commands::AdvanceScene {
        correlation_id: Uuid::new_v4(),
        player_id: player.0,
        scene_id,
        choice_id: request.choice_id,
    };

    info!(correlation_id = %command.correlation_id, "handling advance_scene command");

    let outcome = command_handlers::handle_advance(
        &command,
        &state.policy,
        state.clock.as_ref(),
        state.ids.as_ref(),
        &*state.content,
        &*state.ledger,
    )
    .await?;

    Ok(Json(ChooseResponse {
        next_scene_id: outcome.next_scene_id,
        save_id: outcome.save.id,
        stats: outcome.save.stats,
    }))
}

/// Returns the router for scenes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{scene_id}", get(get_scene))
        .route("/{scene_id}/choose", post(choose))
}
