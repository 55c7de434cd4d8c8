//! Routes for a player's own progress.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use maple_core::save::StatTotals;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use maple_progression::application::command_handlers;
use maple_progression::application::query_handlers::{self, ProgressView};
use maple_progression::domain::commands;

use crate::auth::AuthenticatedPlayer;
use crate::error::ApiError;
use crate::state::AppState;

/// Response body for POST /start.
#[derive(Debug, Serialize)]
pub struct StartProgressResponse {
    /// The player's current save.
    pub save_id: Uuid,
    /// The scene the player is in.
    pub scene_id: String,
    /// The player's current totals.
    pub stats: StatTotals,
    /// `false` if the player had already started.
    pub created: bool,
}

/// POST /start
///
/// Responds `201 Created` when this call seeded the player, `200 OK` when
/// progress already existed.
#[instrument(skip(state), fields(player_id = %player.0))]
async fn start_progress(
    State(state): State<AppState>,
    player: AuthenticatedPlayer,
) -> Result<(StatusCode, Json<StartProgressResponse>), ApiError> {
    let command = commands::StartProgress {
        correlation_id: Uuid::new_v4(),
        player_id: player.0,
        start_scene_id: state.start_scene_id.to_string(),
    };

    info!(correlation_id = %command.correlation_id, "handling start_progress command");

    let outcome = command_handlers::handle_start_progress(
        &command,
        &state.policy,
        state.clock.as_ref(),
        state.ids.as_ref(),
        &*state.content,
        &*state.ledger,
    )
    .await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(StartProgressResponse {
            save_id: outcome.save.id,
            scene_id: outcome.save.scene_id,
            stats: outcome.save.stats,
            created: outcome.created,
        }),
    ))
}

/// GET /
#[instrument(skip(state), fields(player_id = %player.0))]
async fn current_progress(
    State(state): State<AppState>,
    player: AuthenticatedPlayer,
) -> Result<Json<ProgressView>, ApiError> {
    let view = query_handlers::get_current_progress(player.0, &state.policy, &*state.ledger).await?;
    Ok(Json(view))
}

/// Returns the router for player progress.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(current_progress))
        .route("/start", post(start_progress))
}
