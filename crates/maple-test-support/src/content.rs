//! Test content store — serves scenes from memory.

use std::collections::HashMap;

use async_trait::async_trait;
use maple_core::content::ContentStore;
use maple_core::error::DomainError;
use maple_core::scene::Scene;

/// A content store backed by a fixed set of scenes.
#[derive(Debug, Default)]
pub struct StaticContentStore {
    scenes: HashMap<String, Scene>,
}

impl StaticContentStore {
    /// Create a store holding `scenes`, keyed by their ids.
    #[must_use]
    pub fn new(scenes: impl IntoIterator<Item = Scene>) -> Self {
        Self {
            scenes: scenes
                .into_iter()
                .map(|scene| (scene.id.clone(), scene))
                .collect(),
        }
    }
}

#[async_trait]
impl ContentStore for StaticContentStore {
    async fn scene(&self, scene_id: &str) -> Result<Scene, DomainError> {
        self.scenes
            .get(scene_id)
            .cloned()
            .ok_or_else(|| DomainError::SceneNotFound(scene_id.to_owned()))
    }
}
