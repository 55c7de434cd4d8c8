//! Story fixtures shared by tests across crates.

use chrono::{DateTime, Utc};
use maple_core::save::Save;
use maple_core::scene::{Choice, Scene, StatEffects};
use uuid::Uuid;

use crate::content::StaticContentStore;

/// "intro": `attack` leads to "hallway" with `{rage: 1}`, `sneak` leads to
/// "backdoor" with `{honor: 1}`.
#[must_use]
pub fn intro_scene() -> Scene {
    Scene {
        id: "intro".to_owned(),
        text: "Smoke drifts over the burning gate.".to_owned(),
        choices: vec![
            Choice {
                id: "attack".to_owned(),
                text: "Charge the guards".to_owned(),
                next: "hallway".to_owned(),
                effects: StatEffects {
                    rage: 1,
                    ..StatEffects::default()
                },
            },
            Choice {
                id: "sneak".to_owned(),
                text: "Slip through the garden".to_owned(),
                next: "backdoor".to_owned(),
                effects: StatEffects {
                    honor: 1,
                    ..StatEffects::default()
                },
            },
        ],
    }
}

/// "hallway": `bow` returns to "intro" with `{honor: 2, karma: -1}`.
#[must_use]
pub fn hallway_scene() -> Scene {
    Scene {
        id: "hallway".to_owned(),
        text: "Lanterns sway along the corridor.".to_owned(),
        choices: vec![Choice {
            id: "bow".to_owned(),
            text: "Bow to the old master".to_owned(),
            next: "intro".to_owned(),
            effects: StatEffects {
                honor: 2,
                rage: 0,
                karma: -1,
            },
        }],
    }
}

/// A content store holding [`intro_scene`] and [`hallway_scene`].
#[must_use]
pub fn story_content() -> StaticContentStore {
    StaticContentStore::new([intro_scene(), hallway_scene()])
}

/// A zero-stat seed save for `player_id` in "intro".
#[must_use]
pub fn seed_save(player_id: Uuid, created_at: DateTime<Utc>) -> Save {
    Save::seed(Uuid::new_v4(), player_id, "intro", created_at)
}
