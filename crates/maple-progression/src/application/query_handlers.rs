//! Query handlers for the progression context.
//!
//! Read-only views over the content store and the player's latest save.

use chrono::{DateTime, Utc};
use maple_core::content::ContentStore;
use maple_core::error::DomainError;
use maple_core::ledger::SaveLedger;
use maple_core::save::StatTotals;
use maple_core::scene::Scene;
use serde::Serialize;
use uuid::Uuid;

use crate::application::policy::{ProgressionPolicy, bounded};

/// A scene as seen by one player.
#[derive(Debug, Serialize)]
pub struct SceneView {
    /// The requested scene.
    pub scene: Scene,
    /// The player's current totals; absent if the player has no save yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatTotals>,
}

/// Read-only view of a player's current save.
#[derive(Debug, Serialize)]
pub struct ProgressView {
    /// The current save.
    pub save_id: Uuid,
    /// The scene the player is in.
    pub scene_id: String,
    /// The player's current totals.
    pub stats: StatTotals,
    /// When the current save was written.
    pub created_at: DateTime<Utc>,
}

/// Loads `scene_id` together with the player's current totals.
///
/// # Errors
///
/// Returns `DomainError::SceneNotFound` if the scene does not exist and
/// `DomainError::LedgerUnavailable` on storage faults. A player without a
/// save is not an error; `stats` is simply `None`.
pub async fn get_scene_view(
    player_id: Uuid,
    scene_id: &str,
    policy: &ProgressionPolicy,
    content: &dyn ContentStore,
    ledger: &dyn SaveLedger,
) -> Result<SceneView, DomainError> {
    let scene = content.scene(scene_id).await?;
    let latest = bounded(policy, "latest", ledger.latest(player_id)).await?;
    Ok(SceneView {
        scene,
        stats: latest.map(|save| save.stats),
    })
}

/// Returns the player's current save.
///
/// # Errors
///
/// Returns `DomainError::NoProgress` if the player has never been seeded.
pub async fn get_current_progress(
    player_id: Uuid,
    policy: &ProgressionPolicy,
    ledger: &dyn SaveLedger,
) -> Result<ProgressView, DomainError> {
    let save = bounded(policy, "latest", ledger.latest(player_id))
        .await?
        .ok_or(DomainError::NoProgress(player_id))?;
    Ok(ProgressView {
        save_id: save.id,
        scene_id: save.scene_id,
        stats: save.stats,
        created_at: save.created_at,
    })
}
