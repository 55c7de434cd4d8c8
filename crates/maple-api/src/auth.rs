//! Bearer-token authentication.
//!
//! Every progression route takes an [`AuthenticatedPlayer`]; the token in
//! `Authorization: Bearer <token>` is resolved through the configured
//! `IdentityProvider`. Player ids never come from the request body.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use maple_core::error::DomainError;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// The player the request was authenticated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedPlayer(pub Uuid);

fn bearer_token(parts: &Parts) -> Result<&str, DomainError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| DomainError::Unauthorized("missing Authorization header".into()))?
        .to_str()
        .map_err(|_| DomainError::Unauthorized("malformed Authorization header".into()))?;

    let (scheme, token) = header
        .split_once(' ')
        .ok_or_else(|| DomainError::Unauthorized("expected a bearer token".into()))?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(DomainError::Unauthorized("expected a bearer token".into()));
    }
    Ok(token)
}

impl FromRequestParts<AppState> for AuthenticatedPlayer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let player_id = state.identity.resolve_player(token).await?;
        Ok(Self(player_id))
    }
}
