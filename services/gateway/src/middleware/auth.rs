//! Bearer token authentication.

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use tracing::debug;

use crate::error::{GatewayError, UNAUTHORIZED};
use crate::state::AppState;

/// Identity carried by a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Token subject
    pub user_id: String,
    /// Email claim
    pub email: String,
}

/// Extractor that requires `Authorization: Bearer <token>` signed with the
/// shared secret and not expired.
#[derive(Debug, Clone)]
pub struct RequireBearer(pub AuthUser);

impl FromRequestParts<AppState> for RequireBearer {
    type Rejection = GatewayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            debug!("Missing bearer token");
            GatewayError::unauthorized(UNAUTHORIZED)
        })?;

        let claims = state.jwt.verify(token).map_err(|e| {
            debug!(reason = %e, "Bearer token rejected");
            GatewayError::unauthorized(UNAUTHORIZED)
        })?;

        Ok(Self(AuthUser {
            user_id: claims.user_id().to_string(),
            email: claims.email,
        }))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
