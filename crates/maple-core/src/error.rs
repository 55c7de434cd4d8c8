//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The player has no seeded save yet.
    #[error("no progress recorded for player {0}")]
    NoProgress(Uuid),

    /// The content store has no scene with this identifier.
    #[error("scene not found: {0}")]
    SceneNotFound(String),

    /// The scene has no choice with this identifier.
    #[error("choice {choice_id} not found in scene {scene_id}")]
    ChoiceNotFound {
        /// The scene that was searched.
        scene_id: String,
        /// The choice that was requested.
        choice_id: String,
    },

    /// Bad input, malformed content, or a stat total that left the `i64` range.
    #[error("validation error: {0}")]
    Validation(String),

    /// The caller's credentials did not resolve to a player.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Optimistic append conflict: the player's latest save changed between
    /// read and append.
    #[error(
        "concurrent modification for player {player_id}: expected latest save {expected:?}, found {actual:?}"
    )]
    ConcurrentModification {
        /// The player whose ledger moved.
        player_id: Uuid,
        /// The latest save id the writer built on.
        expected: Option<Uuid>,
        /// The latest save id actually in the ledger.
        actual: Option<Uuid>,
    },

    /// Transient storage fault or ledger timeout.
    #[error("ledger unavailable: {0}")]
    LedgerUnavailable(String),

    /// The content source could not be read or decoded.
    #[error("content unavailable: {0}")]
    ContentUnavailable(String),

    /// The identity provider could not be reached.
    #[error("identity provider unavailable: {0}")]
    IdentityUnavailable(String),
}

impl DomainError {
    /// Returns `true` when repeating the operation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConcurrentModification { .. }
                | Self::LedgerUnavailable(_)
                | Self::ContentUnavailable(_)
                | Self::IdentityUnavailable(_)
        )
    }
}
