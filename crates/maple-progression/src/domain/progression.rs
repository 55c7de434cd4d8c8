//! The progression step: previous save plus a resolved choice gives the
//! next save.

use chrono::{DateTime, Utc};
use maple_core::error::DomainError;
use maple_core::save::Save;
use maple_core::scene::Choice;
use uuid::Uuid;

/// Builds the save that results from taking `choice` on top of `previous`.
///
/// The new save sits in `choice.next`, carries `previous` totals plus the
/// choice's effects, and names `previous` as its parent.
///
/// # Errors
///
/// Returns `DomainError::Validation` if a stat total would overflow.
pub fn next_save(
    previous: &Save,
    choice: &Choice,
    save_id: Uuid,
    now: DateTime<Utc>,
) -> Result<Save, DomainError> {
    let stats = previous.stats.apply(&choice.effects)?;
    Ok(previous.successor(save_id, &choice.next, stats, now))
}
