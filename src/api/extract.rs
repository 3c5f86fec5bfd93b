//! Bearer-token extractors

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::core::auth::Claims;
use crate::domain::{ShiftSyncError, UserId};
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// A verified session; rejects the request with 401 when absent or invalid
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: UserId,
    pub claims: Claims,
}

/// Session on routes guarded by `auth.require_auth`
///
/// With the flag off a missing token yields `None`, but a token that is sent
/// must still verify.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthSession>);

impl OptionalAuth {
    pub fn user_id(&self) -> Option<UserId> {
        self.0.as_ref().map(|session| session.user_id)
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, ApiError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| unauthorized("Invalid authorization header"))?;
    match value.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
        {
            Ok(Some(token.trim()))
        }
        _ => Err(unauthorized("Invalid authorization header")),
    }
}

fn unauthorized(message: &str) -> ApiError {
    ShiftSyncError::Authentication(message.to_string()).into()
}

fn verify(token: &str, state: &AppState) -> Result<AuthSession, ApiError> {
    let claims = state.tokens.verify(token)?;
    Ok(AuthSession {
        user_id: claims.user_id()?,
        claims,
    })
}

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or_else(|| unauthorized("Authentication required"))?;
        verify(token, state)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => verify(token, state).map(|session| OptionalAuth(Some(session))),
            None if state.require_auth => Err(unauthorized("Authentication required")),
            None => Ok(OptionalAuth(None)),
        }
    }
}
