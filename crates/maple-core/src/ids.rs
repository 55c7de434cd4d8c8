//! Save identifier generation.
//!
//! In production, identifiers are time-ordered UUIDv7 values. In tests, a
//! recorded sequence is injected so saves are reproducible.

use uuid::Uuid;

/// Source of fresh save identifiers. Every call must return an id that has
/// never been handed out before.
pub trait SaveIdGenerator: Send + Sync {
    /// Returns the next save identifier.
    fn next_id(&self) -> Uuid;
}

/// Production generator backed by `Uuid::now_v7`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Generator;

impl SaveIdGenerator for UuidV7Generator {
    fn next_id(&self) -> Uuid {
        Uuid::now_v7()
    }
}
