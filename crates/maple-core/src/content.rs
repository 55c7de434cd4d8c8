//! Content store abstraction.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::scene::Scene;

/// Read-only source of immutable scene definitions.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Loads the scene with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SceneNotFound` when no such scene exists and
    /// `DomainError::ContentUnavailable` when the source cannot be read.
    async fn scene(&self, scene_id: &str) -> Result<Scene, DomainError>;
}
