//! Test id generator — deterministic `SaveIdGenerator` for tests.

use std::sync::atomic::{AtomicU64, Ordering};

use maple_core::ids::SaveIdGenerator;
use uuid::Uuid;

/// Hands out `Uuid::from_u128(start)`, `start + 1`, ... in call order.
#[derive(Debug)]
pub struct SequenceIdGenerator {
    next: AtomicU64,
}

impl SequenceIdGenerator {
    /// Create a generator whose first id is `Uuid::from_u128(start)`.
    #[must_use]
    pub fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl Default for SequenceIdGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SaveIdGenerator for SequenceIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::from_u128(u128::from(self.next.fetch_add(1, Ordering::SeqCst)))
    }
}
