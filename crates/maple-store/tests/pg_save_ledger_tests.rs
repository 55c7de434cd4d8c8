//! Integration tests for `PgSaveLedger`.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use maple_core::error::DomainError;
use maple_core::ledger::SaveLedger;
use maple_core::save::{Save, StatTotals};
use maple_store::pg_save_ledger::PgSaveLedger;
use sqlx::PgPool;
use uuid::Uuid;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

fn totals(honor: i64, rage: i64, karma: i64) -> StatTotals {
    StatTotals { honor, rage, karma }
}

/// Writes a row directly, bypassing the conditional append.
async fn insert_raw(pool: &PgPool, save: &Save) {
    sqlx::query(
        "INSERT INTO saves (id, player_id, scene_id, honor, rage, karma, created_at, parent_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(save.id)
    .bind(save.player_id)
    .bind(&save.scene_id)
    .bind(save.stats.honor)
    .bind(save.stats.rage)
    .bind(save.stats.karma)
    .bind(save.created_at)
    .bind(save.parent_id)
    .execute(pool)
    .await
    .unwrap();
}

// --- latest ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_latest_returns_none_for_unknown_player(pool: PgPool) {
    let ledger = PgSaveLedger::new(pool);

    let latest = ledger.latest(Uuid::new_v4()).await.unwrap();

    assert!(latest.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_append_and_latest_round_trip(pool: PgPool) {
    let ledger = PgSaveLedger::new(pool);
    let player_id = Uuid::new_v4();
    let seed = Save::seed(Uuid::now_v7(), player_id, "intro", t0());
    let next = seed.successor(Uuid::now_v7(), "hallway", totals(0, 1, 0), t0());

    ledger.append(&seed).await.unwrap();
    ledger.append(&next).await.unwrap();

    let latest = ledger.latest(player_id).await.unwrap().unwrap();
    assert_eq!(latest, next);
    assert_eq!(latest.parent_id, Some(seed.id));
    assert_eq!(ledger.count(player_id).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_latest_orders_by_created_at_not_insert_order(pool: PgPool) {
    let ledger = PgSaveLedger::new(pool.clone());
    let player_id = Uuid::new_v4();
    let seed = Save::seed(Uuid::now_v7(), player_id, "intro", t0());
    let mut later = seed.successor(Uuid::now_v7(), "hallway", totals(0, 1, 0), t0());
    later.created_at = t0() + TimeDelta::seconds(5);
    let mut earlier = later.successor(Uuid::now_v7(), "backdoor", totals(1, 1, 0), t0());
    earlier.created_at = t0() + TimeDelta::seconds(2);
    insert_raw(&pool, &seed).await;
    insert_raw(&pool, &later).await;
    insert_raw(&pool, &earlier).await;

    let latest = ledger.latest(player_id).await.unwrap().unwrap();

    assert_eq!(latest.id, later.id);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_latest_breaks_timestamp_ties_by_greatest_id(pool: PgPool) {
    let ledger = PgSaveLedger::new(pool.clone());
    let player_id = Uuid::new_v4();
    let tie = t0() + TimeDelta::seconds(1);
    let seed = Save::seed(Uuid::from_u128(0x10), player_id, "intro", t0());
    let mut high = seed.successor(Uuid::from_u128(0x30), "hallway", totals(0, 1, 0), t0());
    high.created_at = tie;
    let mut low = high.successor(Uuid::from_u128(0x20), "backdoor", totals(1, 1, 0), t0());
    low.created_at = tie;
    insert_raw(&pool, &seed).await;
    insert_raw(&pool, &high).await;
    insert_raw(&pool, &low).await;

    let latest = ledger.latest(player_id).await.unwrap().unwrap();

    assert_eq!(latest.id, high.id);
}

// --- append ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_append_rejects_stale_parent(pool: PgPool) {
    let ledger = PgSaveLedger::new(pool);
    let player_id = Uuid::new_v4();
    let seed = Save::seed(Uuid::now_v7(), player_id, "intro", t0());
    ledger.append(&seed).await.unwrap();
    let first = seed.successor(Uuid::now_v7(), "hallway", totals(0, 1, 0), t0());
    let second = seed.successor(Uuid::now_v7(), "backdoor", totals(1, 0, 0), t0());
    ledger.append(&first).await.unwrap();

    let result = ledger.append(&second).await;

    match result {
        Err(DomainError::ConcurrentModification {
            player_id: conflict_player,
            expected,
            actual,
        }) => {
            assert_eq!(conflict_player, player_id);
            assert_eq!(expected, Some(seed.id));
            assert_eq!(actual, Some(first.id));
        }
        other => panic!("expected ConcurrentModification, got {other:?}"),
    }
    assert_eq!(ledger.count(player_id).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_second_seed_is_rejected(pool: PgPool) {
    let ledger = PgSaveLedger::new(pool);
    let player_id = Uuid::new_v4();
    let seed = Save::seed(Uuid::now_v7(), player_id, "intro", t0());
    ledger.append(&seed).await.unwrap();

    let result = ledger
        .append(&Save::seed(Uuid::now_v7(), player_id, "intro", t0()))
        .await;

    assert!(matches!(
        result,
        Err(DomainError::ConcurrentModification { expected: None, .. })
    ));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_reappending_identical_save_is_idempotent(pool: PgPool) {
    let ledger = PgSaveLedger::new(pool);
    let player_id = Uuid::new_v4();
    let seed = Save::seed(Uuid::now_v7(), player_id, "intro", t0());

    ledger.append(&seed).await.unwrap();
    ledger.append(&seed).await.unwrap();

    assert_eq!(ledger.count(player_id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_reused_id_with_different_content_is_rejected(pool: PgPool) {
    let ledger = PgSaveLedger::new(pool);
    let seed = Save::seed(Uuid::now_v7(), Uuid::new_v4(), "intro", t0());
    ledger.append(&seed).await.unwrap();
    let mut forged = seed.clone();
    forged.scene_id = "throne".into();

    let result = ledger.append(&forged).await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_child_not_newer_than_parent_is_rejected(pool: PgPool) {
    let ledger = PgSaveLedger::new(pool);
    let player_id = Uuid::new_v4();
    let seed = Save::seed(Uuid::now_v7(), player_id, "intro", t0());
    ledger.append(&seed).await.unwrap();
    let mut child = seed.successor(Uuid::now_v7(), "hallway", totals(0, 1, 0), t0());
    child.created_at = seed.created_at;

    let result = ledger.append(&child).await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(ledger.count(player_id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_overlong_scene_id_is_rejected_as_validation(pool: PgPool) {
    let ledger = PgSaveLedger::new(pool);
    let player_id = Uuid::new_v4();
    let seed = Save::seed(Uuid::now_v7(), player_id, "intro", t0());
    ledger.append(&seed).await.unwrap();
    let child = seed.successor(Uuid::now_v7(), &"x".repeat(129), totals(0, 1, 0), t0());

    let result = ledger.append(&child).await;

    match result {
        Err(err @ DomainError::Validation(_)) => assert!(!err.is_retryable()),
        other => panic!("expected Validation, got {other:?}"),
    }
    assert_eq!(ledger.count(player_id).await.unwrap(), 1);
}

// --- concurrency ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_concurrent_appends_on_same_parent_admit_exactly_one(pool: PgPool) {
    let ledger = PgSaveLedger::new(pool);
    let player_id = Uuid::new_v4();
    let seed = Save::seed(Uuid::now_v7(), player_id, "intro", t0());
    ledger.append(&seed).await.unwrap();
    let children: Vec<Save> = (0..8)
        .map(|i| seed.successor(Uuid::now_v7(), "hallway", totals(0, i, 0), t0()))
        .collect();

    let handles: Vec<_> = children
        .into_iter()
        .map(|child| {
            let ledger = ledger.clone();
            tokio::spawn(async move { ledger.append(&child).await })
        })
        .collect();
    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => accepted += 1,
            Err(DomainError::ConcurrentModification { .. }) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(ledger.count(player_id).await.unwrap(), 2);
}

// --- player isolation ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_players_have_independent_histories(pool: PgPool) {
    let ledger = PgSaveLedger::new(pool);
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    ledger
        .append(&Save::seed(Uuid::now_v7(), alice, "intro", t0()))
        .await
        .unwrap();
    ledger
        .append(&Save::seed(Uuid::now_v7(), bob, "hallway", t0()))
        .await
        .unwrap();

    assert_eq!(ledger.latest(alice).await.unwrap().unwrap().scene_id, "intro");
    assert_eq!(ledger.latest(bob).await.unwrap().unwrap().scene_id, "hallway");
    assert_eq!(ledger.count(alice).await.unwrap(), 1);
}
