//! Bounds applied to every ledger interaction.

use std::future::Future;
use std::time::Duration;

use maple_core::error::DomainError;

/// Retry and timeout bounds for progression handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressionPolicy {
    /// Total attempts `handle_advance` makes when its append conflicts.
    pub max_attempts: u32,
    /// Upper bound on each ledger read or append.
    pub ledger_timeout: Duration,
}

impl ProgressionPolicy {
    /// Attempts to make, never fewer than one.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for ProgressionPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            ledger_timeout: Duration::from_secs(5),
        }
    }
}

/// Runs a ledger call under `policy.ledger_timeout`.
///
/// A timed-out append was a single transaction, so it either committed
/// whole or not at all.
///
/// # Errors
///
/// Returns the call's own error, or `DomainError::LedgerUnavailable` if the
/// timeout elapsed first.
pub(crate) async fn bounded<T, F>(
    policy: &ProgressionPolicy,
    operation: &str,
    call: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    tokio::time::timeout(policy.ledger_timeout, call)
        .await
        .map_err(|_| {
            DomainError::LedgerUnavailable(format!(
                "ledger {operation} timed out after {}ms",
                policy.ledger_timeout.as_millis()
            ))
        })?
}
