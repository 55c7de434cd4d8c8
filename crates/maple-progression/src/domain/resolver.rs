//! Scene resolver: maps a choice id to a choice within one scene.

use maple_core::error::DomainError;
use maple_core::scene::{Choice, Scene};

/// Finds the choice `choice_id` in `scene`.
///
/// Choice ids are only unique within their scene. If an author reused an
/// id inside one scene, the first matching choice wins.
///
/// # Errors
///
/// Returns `DomainError::ChoiceNotFound` if the scene has no such choice.
pub fn resolve<'a>(scene: &'a Scene, choice_id: &str) -> Result<&'a Choice, DomainError> {
    scene
        .choices
        .iter()
        .find(|choice| choice.id == choice_id)
        .ok_or_else(|| DomainError::ChoiceNotFound {
            scene_id: scene.id.clone(),
            choice_id: choice_id.to_owned(),
        })
}
