//! Save ledger abstraction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;
use crate::save::Save;

/// Append-only store of every save a player has produced.
///
/// Saves are never updated or deleted. Current state is derived with
/// [`crate::save::latest_of`]'s ordering: latest `created_at`, ties broken
/// by the greatest id.
#[async_trait]
pub trait SaveLedger: Send + Sync {
    /// Atomically appends `save` if the player's current latest save id
    /// equals `save.parent_id` (`None` meaning the player has no saves).
    ///
    /// Appending a save whose id is already stored with identical content
    /// is acknowledged without writing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ConcurrentModification` when the latest save
    /// moved and nothing was written, `DomainError::Validation` when the id
    /// is reused for different content or `created_at` is not after the
    /// current latest save, or `DomainError::LedgerUnavailable` on storage
    /// faults.
    async fn append(&self, save: &Save) -> Result<(), DomainError>;

    /// Returns the player's current save, or `None` if none was ever written.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::LedgerUnavailable` on storage faults.
    async fn latest(&self, player_id: Uuid) -> Result<Option<Save>, DomainError>;

    /// Returns how many saves the player has.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::LedgerUnavailable` on storage faults.
    async fn count(&self, player_id: Uuid) -> Result<i64, DomainError>;
}
