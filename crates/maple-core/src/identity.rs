//! Identity provider abstraction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;

/// Resolves request credentials to a stable player identifier.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves a bearer token to the player it was issued for.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthorized` for unknown or expired tokens.
    async fn resolve_player(&self, token: &str) -> Result<Uuid, DomainError>;
}
