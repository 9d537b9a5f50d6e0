//! Handlers for the `/auth` resource (login, current user).

use axum::extract::State;
use axum::Json;
use glavtrub_core::error::CoreError;
use glavtrub_db::models::user::UserResponse;
use glavtrub_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password and issue an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.can_sign_in() {
        tracing::warn!(user_id = user.id, role = %user.role, "Login refused for inactive account");
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(username = %user.username, "Failed login attempt");
        return Err(invalid_credentials());
    }

    UserRepo::record_login(&state.pool, user.id).await?;

    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(&user),
    }))
}

/// GET /api/v1/auth/me
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}
