//! Shared test doubles and fixtures for the Maple progression backend.

mod clock;
mod content;
mod fixtures;
mod identity;
mod ids;
mod ledger;

pub use clock::{FixedClock, SteppingClock};
pub use content::StaticContentStore;
pub use fixtures::{hallway_scene, intro_scene, seed_save, story_content};
pub use identity::StaticIdentityProvider;
pub use ids::SequenceIdGenerator;
pub use ledger::{FailingSaveLedger, InMemorySaveLedger, LockstepSaveLedger, StalledSaveLedger};
