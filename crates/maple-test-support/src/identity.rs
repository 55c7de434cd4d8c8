//! Test identity provider — fixed token table.

use std::collections::HashMap;

use async_trait::async_trait;
use maple_core::error::DomainError;
use maple_core::identity::IdentityProvider;
use uuid::Uuid;

/// Resolves tokens from an in-memory table.
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    tokens: HashMap<String, Uuid>,
}

impl StaticIdentityProvider {
    /// Create a provider that knows only `token`, issued for `player_id`.
    #[must_use]
    pub fn single(token: &str, player_id: Uuid) -> Self {
        Self {
            tokens: HashMap::from([(token.to_owned(), player_id)]),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn resolve_player(&self, token: &str) -> Result<Uuid, DomainError> {
        self.tokens
            .get(token)
            .copied()
            .ok_or_else(|| DomainError::Unauthorized("unknown session token".into()))
    }
}
