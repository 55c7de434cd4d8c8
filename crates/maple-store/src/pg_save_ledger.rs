//! `PostgreSQL` implementation of the `SaveLedger` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use maple_core::error::DomainError;
use maple_core::ledger::SaveLedger;
use maple_core::save::{Save, StatTotals};

use crate::queries;

const SAVES_PKEY: &str = "saves_pkey";
/// SQLSTATE `string_data_right_truncation`.
const VALUE_TOO_LONG: &str = "22001";

/// One row of the `saves` table.
#[derive(Debug, sqlx::FromRow)]
struct SaveRow {
    id: Uuid,
    player_id: Uuid,
    scene_id: String,
    honor: i64,
    rage: i64,
    karma: i64,
    created_at: DateTime<Utc>,
    parent_id: Option<Uuid>,
}

impl From<SaveRow> for Save {
    fn from(row: SaveRow) -> Self {
        Self {
            id: row.id,
            player_id: row.player_id,
            scene_id: row.scene_id,
            stats: StatTotals {
                honor: row.honor,
                rage: row.rage,
                karma: row.karma,
            },
            created_at: row.created_at,
            parent_id: row.parent_id,
        }
    }
}

fn unavailable(e: &sqlx::Error) -> DomainError {
    DomainError::LedgerUnavailable(e.to_string())
}

/// PostgreSQL-backed save ledger.
///
/// Appends for one player are serialized with a transaction-scoped
/// advisory lock; the partial unique indexes on `parent_id` back this up.
#[derive(Debug, Clone)]
pub struct PgSaveLedger {
    pool: PgPool,
}

impl PgSaveLedger {
    /// Creates a new `PgSaveLedger`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn latest_in(
        tx: &mut Transaction<'_, Postgres>,
        player_id: Uuid,
    ) -> Result<Option<Save>, DomainError> {
        let row: Option<SaveRow> = sqlx::query_as(queries::SELECT_LATEST_SAVE)
            .bind(player_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| unavailable(&e))?;
        Ok(row.map(Save::from))
    }
}

#[async_trait]
impl SaveLedger for PgSaveLedger {
    async fn append(&self, save: &Save) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| unavailable(&e))?;

        sqlx::query(queries::LOCK_PLAYER)
            .bind(save.player_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| unavailable(&e))?;

        let existing: Option<SaveRow> = sqlx::query_as(queries::SELECT_SAVE_BY_ID)
            .bind(save.id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| unavailable(&e))?;
        if let Some(existing) = existing {
            return if Save::from(existing) == *save {
                debug!(save_id = %save.id, "save already stored");
                Ok(())
            } else {
                Err(DomainError::Validation(format!(
                    "save id {} already used by a different save",
                    save.id
                )))
            };
        }

        let latest = Self::latest_in(&mut tx, save.player_id).await?;
        let actual = latest.as_ref().map(|s| s.id);
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

        let inserted = sqlx::query(queries::INSERT_SAVE)
            .bind(save.id)
            .bind(save.player_id)
            .bind(&save.scene_id)
            .bind(save.stats.honor)
            .bind(save.stats.rage)
            .bind(save.stats.karma)
            .bind(save.created_at)
            .bind(save.parent_id)
            .execute(&mut *tx)
            .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(if db.constraint() == Some(SAVES_PKEY) {
                    DomainError::Validation(format!("save id {} already used", save.id))
                } else {
                    DomainError::ConcurrentModification {
                        player_id: save.player_id,
                        expected: save.parent_id,
                        actual,
                    }
                });
            }
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(VALUE_TOO_LONG) => {
                return Err(DomainError::Validation(format!(
                    "save {} does not fit the ledger: {}",
                    save.id,
                    db.message()
                )));
            }
            Err(e) => return Err(unavailable(&e)),
        }

        tx.commit().await.map_err(|e| unavailable(&e))?;
        debug!(save_id = %save.id, player_id = %save.player_id, "save appended");
        Ok(())
    }

    async fn latest(&self, player_id: Uuid) -> Result<Option<Save>, DomainError> {
        let row: Option<SaveRow> = sqlx::query_as(queries::SELECT_LATEST_SAVE)
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unavailable(&e))?;
        Ok(row.map(Save::from))
    }

    async fn count(&self, player_id: Uuid) -> Result<i64, DomainError> {
        let (count,): (i64,) = sqlx::query_as(queries::COUNT_SAVES)
            .bind(player_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| unavailable(&e))?;
        Ok(count)
    }
}
