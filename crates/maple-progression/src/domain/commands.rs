//! Commands for the progression context.

use maple_core::command::Command;
use uuid::Uuid;

/// Command to apply a choice the player made in a scene.
#[derive(Debug, Clone)]
pub struct AdvanceScene {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player making the choice.
    pub player_id: Uuid,
    /// The scene the choice belongs to.
    pub scene_id: String,
    /// The chosen choice, scoped to `scene_id`.
    pub choice_id: String,
}

impl Command for AdvanceScene {
    fn command_type(&self) -> &'static str {
        "progression.advance_scene"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn player_id(&self) -> Uuid {
        self.player_id
    }
}

/// Command to open a player's save history at the starting scene.
#[derive(Debug, Clone)]
pub struct StartProgress {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player to seed.
    pub player_id: Uuid,
    /// The designated starting scene.
    pub start_scene_id: String,
}

impl Command for StartProgress {
    fn command_type(&self) -> &'static str {
        "progression.start_progress"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn player_id(&self) -> Uuid {
        self.player_id
    }
}
