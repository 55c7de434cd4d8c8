//! Test ledgers — `SaveLedger` implementations for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use maple_core::error::DomainError;
use maple_core::ledger::SaveLedger;
use maple_core::save::{Save, latest_of};
use tokio::sync::Barrier;
use uuid::Uuid;

/// A ledger held in memory with the same conditional-append rules as the
/// Postgres ledger. The check and the insert happen under one lock.
#[derive(Debug, Default)]
pub struct InMemorySaveLedger {
    saves: Mutex<Vec<Save>>,
}

impl InMemorySaveLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger that already holds `saves`, bypassing the parent check.
    #[must_use]
    pub fn with_saves(saves: impl IntoIterator<Item = Save>) -> Self {
        Self {
            saves: Mutex::new(saves.into_iter().collect()),
        }
    }

    /// Returns every stored save in append order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saves(&self) -> Vec<Save> {
        self.saves.lock().unwrap().clone()
    }

    /// Returns the number of stored saves across all players.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn len(&self) -> usize {
        self.saves.lock().unwrap().len()
    }

    /// Returns `true` if no save was ever stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SaveLedger for InMemorySaveLedger {
    async fn append(&self, save: &Save) -> Result<(), DomainError> {
        let mut saves = self.saves.lock().unwrap();

        if let Some(existing) = saves.iter().find(|s| s.id == save.id) {
            return if existing == save {
                Ok(())
            } else {
                Err(DomainError::Validation(format!(
                    "save id {} already used by a different save",
                    save.id
                )))
            };
        }

        let latest = latest_of(saves.iter().filter(|s| s.player_id == save.player_id));
        let actual = latest.map(|s| s.id);
        if actual != save.parent_id {
            return Err(DomainError::ConcurrentModification {
                player_id: save.player_id,
                expected: save.parent_id,
                actual,
            });
        }
        if latest.is_some_and(|latest| save.created_at <= latest.created_at) {
            return Err(DomainError::Validation(format!(
                "save {} is not newer than its parent",
                save.id
            )));
        }

        saves.push(save.clone());
        Ok(())
    }

    async fn latest(&self, player_id: Uuid) -> Result<Option<Save>, DomainError> {
        let saves = self.saves.lock().unwrap();
        Ok(latest_of(saves.iter().filter(|s| s.player_id == player_id)).cloned())
    }

    async fn count(&self, player_id: Uuid) -> Result<i64, DomainError> {
        let saves = self.saves.lock().unwrap();
        let count = saves.iter().filter(|s| s.player_id == player_id).count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

/// An in-memory ledger whose first `parties` calls to `latest` wait for
/// each other before returning, so concurrent writers all read the same
/// baseline. Later reads pass straight through.
#[derive(Debug)]
pub struct LockstepSaveLedger {
    inner: InMemorySaveLedger,
    barrier: Barrier,
    parties: usize,
    reads: AtomicUsize,
}

impl LockstepSaveLedger {
    /// Wrap `inner`, holding the first `parties` reads at a barrier.
    #[must_use]
    pub fn new(inner: InMemorySaveLedger, parties: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(parties),
            parties,
            reads: AtomicUsize::new(0),
        }
    }

    /// The wrapped ledger.
    #[must_use]
    pub fn inner(&self) -> &InMemorySaveLedger {
        &self.inner
    }
}

#[async_trait]
impl SaveLedger for LockstepSaveLedger {
    async fn append(&self, save: &Save) -> Result<(), DomainError> {
        self.inner.append(save).await
    }

    async fn latest(&self, player_id: Uuid) -> Result<Option<Save>, DomainError> {
        let latest = self.inner.latest(player_id).await?;
        if self.reads.fetch_add(1, Ordering::SeqCst) < self.parties {
            self.barrier.wait().await;
        }
        Ok(latest)
    }

    async fn count(&self, player_id: Uuid) -> Result<i64, DomainError> {
        self.inner.count(player_id).await
    }
}

/// A ledger that always returns `LedgerUnavailable`. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingSaveLedger;

#[async_trait]
impl SaveLedger for FailingSaveLedger {
    async fn append(&self, _save: &Save) -> Result<(), DomainError> {
        Err(DomainError::LedgerUnavailable("connection refused".into()))
    }

    async fn latest(&self, _player_id: Uuid) -> Result<Option<Save>, DomainError> {
        Err(DomainError::LedgerUnavailable("connection refused".into()))
    }

    async fn count(&self, _player_id: Uuid) -> Result<i64, DomainError> {
        Err(DomainError::LedgerUnavailable("connection refused".into()))
    }
}

/// A ledger whose calls never complete. Useful for testing timeouts.
#[derive(Debug)]
pub struct StalledSaveLedger;

#[async_trait]
impl SaveLedger for StalledSaveLedger {
    async fn append(&self, _save: &Save) -> Result<(), DomainError> {
        std::future::pending().await
    }

    async fn latest(&self, _player_id: Uuid) -> Result<Option<Save>, DomainError> {
        std::future::pending().await
    }

    async fn count(&self, _player_id: Uuid) -> Result<i64, DomainError> {
        std::future::pending().await
    }
}
