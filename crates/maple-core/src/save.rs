//! Save records: immutable snapshots of a player's progression.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::scene::StatEffects;

/// Cumulative stat totals. Unbounded within `i64`, never clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatTotals {
    /// Honor total.
    pub honor: i64,
    /// Rage total.
    pub rage: i64,
    /// Karma total.
    pub karma: i64,
}

impl StatTotals {
    /// Totals of a freshly seeded player.
    pub const ZERO: Self = Self {
        honor: 0,
        rage: 0,
        karma: 0,
    };

    /// Returns these totals with `effects` added.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a total would leave the `i64` range.
    pub fn apply(self, effects: &StatEffects) -> Result<Self, DomainError> {
        Ok(Self {
            honor: checked_total("honor", self.honor, effects.honor)?,
            rage: checked_total("rage", self.rage, effects.rage)?,
            karma: checked_total("karma", self.karma, effects.karma)?,
        })
    }
}

fn checked_total(stat: &str, total: i64, delta: i64) -> Result<i64, DomainError> {
    total
        .checked_add(delta)
        .ok_or_else(|| DomainError::Validation(format!("{stat} total out of range")))
}

/// One point-in-time snapshot of a player's progression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Save {
    /// Unique save identifier.
    pub id: Uuid,
    /// The owning player.
    pub player_id: Uuid,
    /// The scene the player is in after this save.
    pub scene_id: String,
    /// Cumulative stat totals.
    pub stats: StatTotals,
    /// Creation timestamp, microsecond precision.
    pub created_at: DateTime<Utc>,
    /// The save this one was derived from. `None` only for a seed.
    pub parent_id: Option<Uuid>,
}

impl Save {
    /// Builds the zero-stat save that opens a player's history.
    #[must_use]
    pub fn seed(id: Uuid, player_id: Uuid, scene_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            id,
            player_id,
            scene_id: scene_id.to_owned(),
            stats: StatTotals::ZERO,
            created_at: now.trunc_subsecs(6),
            parent_id: None,
        }
    }

    /// Builds the save that follows this one.
    ///
    /// The successor's timestamp is pushed past this save's timestamp when
    /// the clock has not moved, so the successor is always the latest.
    #[must_use]
    pub fn successor(
        &self,
        id: Uuid,
        scene_id: &str,
        stats: StatTotals,
        now: DateTime<Utc>,
    ) -> Self {
        let floor = self.created_at + TimeDelta::microseconds(1);
        Self {
            id,
            player_id: self.player_id,
            scene_id: scene_id.to_owned(),
            stats,
            created_at: now.trunc_subsecs(6).max(floor),
            parent_id: Some(self.id),
        }
    }

    /// Returns `true` if this save outranks `other` as current state:
    /// later `created_at`, or the same instant and a greater id.
    #[must_use]
    pub fn is_newer_than(&self, other: &Save) -> bool {
        (self.created_at, self.id) > (other.created_at, other.id)
    }
}

/// Picks the authoritative save from a player's history, independent of
/// the order the saves were appended in.
#[must_use]
pub fn latest_of<'a, I>(saves: I) -> Option<&'a Save>
where
    I: IntoIterator<Item = &'a Save>,
{
    saves
        .into_iter()
        .fold(None, |best: Option<&Save>, save| match best {
            Some(current) if !save.is_newer_than(current) => Some(current),
            _ => Some(save),
        })
}
