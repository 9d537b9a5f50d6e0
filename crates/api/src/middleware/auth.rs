//! Bearer token extractor for the admin API.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use glavtrub_core::error::CoreError;
use glavtrub_core::roles::Role;
use glavtrub_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The back-office user behind a request, taken from a valid access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: Role,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Expected a Bearer token"))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;
        // Tokens issued for a role that no longer exists are rejected outright.
        let role = claims
            .role
            .parse::<Role>()
            .map_err(|_| unauthorized("Token carries an unknown role"))?;

        Ok(AuthUser {
            user_id: claims.sub,
            role,
        })
    }
}
