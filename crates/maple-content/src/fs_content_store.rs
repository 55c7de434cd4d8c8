//! Filesystem implementation of the `ContentStore` trait.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use maple_core::content::ContentStore;
use maple_core::error::DomainError;
use maple_core::scene::Scene;
use tracing::debug;

const MAX_SCENE_ID_LEN: usize = 128;

/// Reads scenes from YAML files under a root directory.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Scene ids become file names, so only `[A-Za-z0-9_-]` is allowed.
fn is_well_formed(scene_id: &str) -> bool {
    !scene_id.is_empty()
        && scene_id.len() <= MAX_SCENE_ID_LEN
        && scene_id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn check_scene(scene_id: &str, scene: &Scene) -> Result<(), DomainError> {
    if scene.id != scene_id {
        return Err(DomainError::ContentUnavailable(format!(
            "scene file {scene_id}.yaml declares id {:?}",
            scene.id
        )));
    }
    if let Some(choice) = scene.choices.iter().find(|c| c.id.is_empty()) {
        return Err(DomainError::ContentUnavailable(format!(
            "scene {scene_id} has a choice without id leading to {:?}",
            choice.next
        )));
    }
    // Targets are loaded only when travelled, but they must be storable ids.
    if let Some(choice) = scene.choices.iter().find(|c| !is_well_formed(&c.next)) {
        return Err(DomainError::ContentUnavailable(format!(
            "scene {scene_id} choice {} has malformed target {:?}",
            choice.id, choice.next
        )));
    }
    Ok(())
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn scene(&self, scene_id: &str) -> Result<Scene, DomainError> {
        // No file can exist under a malformed id.
        if !is_well_formed(scene_id) {
            return Err(DomainError::SceneNotFound(scene_id.to_owned()));
        }

        let path = self.root.join(format!("{scene_id}.yaml"));
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DomainError::SceneNotFound(scene_id.to_owned()));
            }
            Err(e) => {
                return Err(DomainError::ContentUnavailable(format!(
                    "reading {}: {e}",
                    path.display()
                )));
            }
        };

        let scene: Scene = serde_yaml::from_slice(&bytes).map_err(|e| {
            DomainError::ContentUnavailable(format!("decoding scene {scene_id}: {e}"))
        })?;
        check_scene(scene_id, &scene)?;

        debug!(scene_id, choices = scene.choices.len(), "scene loaded");
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maple_core::scene::StatEffects;
    use tempfile::TempDir;

    const INTRO: &str = r"
id: intro
text: Smoke drifts over the burning gate.
choices:
  - id: attack
    text: Charge the guards
    next: hallway
    effects:
      rage: 1
  - id: wait
    text: Wait for nightfall
    next: garden
";

    fn store_with(files: &[(&str, &str)]) -> (TempDir, FsContentStore) {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in files {
            std::fs::write(dir.path().join(name), body).unwrap();
        }
        let store = FsContentStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_scene_loads_yaml_with_default_effects() {
        // Arrange
        let (_dir, store) = store_with(&[("intro.yaml", INTRO)]);

        // Act
        let scene = store.scene("intro").await.unwrap();

        // Assert
        assert_eq!(scene.id, "intro");
        assert_eq!(scene.choices.len(), 2);
        assert_eq!(scene.choices[0].effects.rage, 1);
        assert_eq!(scene.choices[1].effects, StatEffects::default());
    }

    #[tokio::test]
    async fn test_missing_file_is_scene_not_found() {
        let (_dir, store) = store_with(&[]);

        let result = store.scene("hallway").await;

        match result {
            Err(DomainError::SceneNotFound(id)) => assert_eq!(id, "hallway"),
            other => panic!("expected SceneNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_ids_are_scene_not_found() {
        let (_dir, store) = store_with(&[("intro.yaml", INTRO)]);
        let too_long = "x".repeat(MAX_SCENE_ID_LEN + 1);

        for scene_id in ["../intro", "a/b", "", "intro.yaml", "intro.v2", too_long.as_str()] {
            let result = store.scene(scene_id).await;
            assert!(
                matches!(&result, Err(DomainError::SceneNotFound(id)) if id == scene_id),
                "{scene_id:?} gave {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_overlong_target_is_content_error() {
        let body = format!("id: intro\nchoices:\n  - id: leap\n    next: {}\n", "x".repeat(129));
        let (_dir, store) = store_with(&[("intro.yaml", body.as_str())]);

        let result = store.scene("intro").await;

        assert!(matches!(result, Err(DomainError::ContentUnavailable(_))));
    }

    #[tokio::test]
    async fn test_target_with_path_characters_is_content_error() {
        let body = "id: intro\nchoices:\n  - id: climb\n    next: ../secrets\n";
        let (_dir, store) = store_with(&[("intro.yaml", body)]);

        let result = store.scene("intro").await;

        assert!(matches!(result, Err(DomainError::ContentUnavailable(_))));
    }

    #[tokio::test]
    async fn test_unknown_stat_key_is_content_error() {
        let body = "id: intro\nchoices:\n  - id: pray\n    next: shrine\n    effects:\n      luck: 3\n";
        let (_dir, store) = store_with(&[("intro.yaml", body)]);

        let result = store.scene("intro").await;

        assert!(matches!(result, Err(DomainError::ContentUnavailable(_))));
    }

    #[tokio::test]
    async fn test_mismatched_id_is_content_error() {
        let (_dir, store) = store_with(&[("hallway.yaml", INTRO)]);

        let result = store.scene("hallway").await;

        assert!(matches!(result, Err(DomainError::ContentUnavailable(_))));
    }

    #[tokio::test]
    async fn test_choice_without_target_is_content_error() {
        let body = "id: intro\nchoices:\n  - id: stay\n    next: ''\n";
        let (_dir, store) = store_with(&[("intro.yaml", body)]);

        let result = store.scene("intro").await;

        assert!(matches!(result, Err(DomainError::ContentUnavailable(_))));
    }
}
