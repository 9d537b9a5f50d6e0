//! Role guards for admin handlers.
//!
//! Put one of these first in a handler's argument list; the request is
//! rejected with 401 (no valid token) or 403 (role lacks the permission)
//! before the body is read.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use glavtrub_core::error::CoreError;
use glavtrub_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    allowed: fn(Role) -> bool,
    denied: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !allowed(user.role) {
        tracing::debug!(user_id = user.user_id, role = %user.role, denied, "Access denied");
        return Err(AppError::Core(CoreError::Forbidden(denied.into())));
    }
    Ok(user)
}

/// Site-wide administration: redirects, settings, imports and backups.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, Role::can_manage_site, "Admin role required")
            .await
            .map(RequireAdmin)
    }
}

/// Content and catalog editing, open to editors and admins.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, Role::can_edit_content, "Editor or admin role required")
            .await
            .map(RequireStaff)
    }
}
