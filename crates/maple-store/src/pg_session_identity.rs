//! Bearer-token identity backed by the `player_sessions` table.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use maple_core::error::DomainError;
use maple_core::identity::IdentityProvider;

use crate::queries;

/// Hex-encoded SHA-256 of a bearer token. Only digests are stored.
#[must_use]
pub fn token_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Resolves bearer tokens against sessions issued by the identity service.
#[derive(Debug, Clone)]
pub struct PgSessionIdentityProvider {
    pool: PgPool,
}

impl PgSessionIdentityProvider {
    /// Creates a new `PgSessionIdentityProvider`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityProvider for PgSessionIdentityProvider {
    async fn resolve_player(&self, token: &str) -> Result<Uuid, DomainError> {
        if token.is_empty() {
            return Err(DomainError::Unauthorized("empty bearer token".into()));
        }
        let row: Option<(Uuid,)> = sqlx::query_as(queries::SELECT_SESSION_PLAYER)
            .bind(token_digest(token))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::IdentityUnavailable(e.to_string()))?;
        row.map(|(player_id,)| player_id)
            .ok_or_else(|| DomainError::Unauthorized("unknown or expired session".into()))
    }
}
