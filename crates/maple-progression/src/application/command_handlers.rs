//! Command handlers for the progression context.
//!
//! Each handler reads the player's latest save, applies domain rules, and
//! appends the resulting save with an optimistic parent check.

use maple_core::clock::Clock;
use maple_core::command::Command;
use maple_core::content::ContentStore;
use maple_core::error::DomainError;
use maple_core::ids::SaveIdGenerator;
use maple_core::ledger::SaveLedger;
use maple_core::save::Save;
use tracing::{debug, info, instrument, warn};

use crate::application::policy::{ProgressionPolicy, bounded};
use crate::domain::commands::{AdvanceScene, StartProgress};
use crate::domain::progression::next_save;
use crate::domain::resolver::resolve;

/// Result of a successfully applied choice.
#[derive(Debug, Clone)]
pub struct AdvanceOutcome {
    /// The scene the player moved to.
    pub next_scene_id: String,
    /// The save that was appended.
    pub save: Save,
    /// How many attempts it took to append.
    pub attempts: u32,
}

/// Result of a start-progress command.
#[derive(Debug, Clone)]
pub struct StartOutcome {
    /// The player's current save.
    pub save: Save,
    /// `false` when the player had already been seeded.
    pub created: bool,
}

/// Handles the `AdvanceScene` command.
///
/// Reads the latest save, resolves the choice against the scene, and
/// appends the successor save. If another writer appended for the same
/// player in between, the whole step is redone against the new latest
/// save, up to `policy.max_attempts` times.
///
/// # Errors
///
/// Returns `NoProgress`, `SceneNotFound`, `ChoiceNotFound` or `Validation`
/// without touching the ledger. Returns `ConcurrentModification` when all
/// attempts conflicted and `LedgerUnavailable` on storage faults or
/// timeouts.
#[instrument(
    skip_all,
    fields(
        correlation_id = %command.correlation_id,
        player_id = %command.player_id,
        scene_id = %command.scene_id,
        choice_id = %command.choice_id,
    )
)]
pub async fn handle_advance(
    command: &AdvanceScene,
    policy: &ProgressionPolicy,
    clock: &dyn Clock,
    ids: &dyn SaveIdGenerator,
    content: &dyn ContentStore,
    ledger: &dyn SaveLedger,
) -> Result<AdvanceOutcome, DomainError> {
    let max_attempts = policy.attempts();
    let mut attempt = 1;
    loop {
        match try_advance(command, policy, clock, ids, content, ledger).await {
            Ok(save) => {
                info!(
                    command_type = command.command_type(),
                    save_id = %save.id,
                    next_scene_id = %save.scene_id,
                    attempt,
                    "choice applied"
                );
                return Ok(AdvanceOutcome {
                    next_scene_id: save.scene_id.clone(),
                    save,
                    attempts: attempt,
                });
            }
            Err(err @ DomainError::ConcurrentModification { .. }) if attempt < max_attempts => {
                debug!(attempt, error = %err, "ledger moved underneath advance, retrying");
                attempt += 1;
            }
            Err(err) => {
                warn!(attempt, error = %err, "advance failed");
                return Err(err);
            }
        }
    }
}

async fn try_advance(
    command: &AdvanceScene,
    policy: &ProgressionPolicy,
    clock: &dyn Clock,
    ids: &dyn SaveIdGenerator,
    content: &dyn ContentStore,
    ledger: &dyn SaveLedger,
) -> Result<Save, DomainError> {
    let previous = bounded(policy, "latest", ledger.latest(command.player_id))
        .await?
        .ok_or(DomainError::NoProgress(command.player_id))?;

    let scene = content.scene(&command.scene_id).await?;
    let choice = resolve(&scene, &command.choice_id)?;

    let save = next_save(&previous, choice, ids.next_id(), clock.now())?;
    bounded(policy, "append", ledger.append(&save)).await?;
    Ok(save)
}

/// Handles the `StartProgress` command: seeds a zero-stat save in the
/// starting scene unless the player already has progress.
///
/// Safe to repeat. A second call, or a call racing another seed, returns
/// the save that is already current instead of appending.
///
/// # Errors
///
/// Returns `SceneNotFound` if the starting scene does not exist and
/// `LedgerUnavailable` on storage faults or timeouts.
#[instrument(
    skip_all,
    fields(
        correlation_id = %command.correlation_id,
        player_id = %command.player_id,
        start_scene_id = %command.start_scene_id,
    )
)]
pub async fn handle_start_progress(
    command: &StartProgress,
    policy: &ProgressionPolicy,
    clock: &dyn Clock,
    ids: &dyn SaveIdGenerator,
    content: &dyn ContentStore,
    ledger: &dyn SaveLedger,
) -> Result<StartOutcome, DomainError> {
    if let Some(save) = bounded(policy, "latest", ledger.latest(command.player_id)).await? {
        debug!(save_id = %save.id, "player already has progress");
        return Ok(StartOutcome {
            save,
            created: false,
        });
    }

    content.scene(&command.start_scene_id).await?;

    let seed = Save::seed(
        ids.next_id(),
        command.player_id,
        &command.start_scene_id,
        clock.now(),
    );

    match bounded(policy, "append", ledger.append(&seed)).await {
        Ok(()) => {
            info!(
                command_type = command.command_type(),
                save_id = %seed.id,
                "progress started"
            );
            Ok(StartOutcome {
                save: seed,
                created: true,
            })
        }
        Err(DomainError::ConcurrentModification { .. }) => {
            let save = bounded(policy, "latest", ledger.latest(command.player_id))
                .await?
                .ok_or(DomainError::NoProgress(command.player_id))?;
            debug!(save_id = %save.id, "concurrent seed won");
            Ok(StartOutcome {
                save,
                created: false,
            })
        }
        Err(err) => Err(err),
    }
}
